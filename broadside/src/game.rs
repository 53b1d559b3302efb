// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! A single human vs. computer game, from ship placement to the final shot.
//!
//! [`GameSetup`] covers the placement phase. Once every human ship is placed,
//! [`GameSetup::start`] turns it into a [`Game`], where the two sides take turns firing
//! until one fleet is sunk. [`Game::restart`] goes back to a fresh setup.
use rand::{rngs::StdRng, Rng};
use tracing::{debug, info, instrument};

use crate::{
    agent::TargetingAgent,
    board::{
        auto_place_fleet, Coordinate, FleetPlacementError, Grid, Orientation, Placement,
        ShotOutcome,
    },
    ships::{Fleet, ShipId},
};

pub use self::errors::{CannotShootReason, SetupError};

mod errors;

/// One of the two sides of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    /// The player at the keyboard.
    Human,
    /// The [`TargetingAgent`].
    Computer,
}

impl Side {
    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

/// Placement phase. The computer's fleet is placed as soon as the setup is created;
/// the human places theirs one ship at a time or all at once.
#[derive(Debug)]
pub struct GameSetup<R = StdRng> {
    fleet: Fleet,
    human: Grid,
    computer: Grid,
    agent: TargetingAgent<R>,
    first: Side,
}

impl<R: Rng> GameSetup<R> {
    /// Begin a game against the given agent. Both sides use the agent's fleet.
    pub fn new(mut agent: TargetingAgent<R>) -> Result<Self, FleetPlacementError> {
        let computer = agent.place_ships()?;
        Ok(Self {
            fleet: agent.fleet().clone(),
            human: Grid::new(*agent.dimensions()),
            computer,
            agent,
            first: Side::Human,
        })
    }

    /// The fleet both sides place.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// The human's board as placed so far.
    pub fn human_board(&self) -> &Grid {
        &self.human
    }

    /// Choose which side fires first. Defaults to the human.
    pub fn set_first(&mut self, side: Side) {
        self.first = side;
    }

    /// Which side fires first.
    pub fn first(&self) -> Side {
        self.first
    }

    /// Where the given ship is placed, if it is.
    pub fn placement(&self, id: ShipId) -> Option<Placement> {
        self.human.placement_of(id)
    }

    /// Whether the given ship is placed.
    pub fn is_placed(&self, id: ShipId) -> bool {
        self.placement(id).is_some()
    }

    /// Ships that still need to be placed, in fleet order.
    pub fn pending_ships(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.fleet
            .iter()
            .map(|(id, _)| id)
            .filter(move |&id| !self.is_placed(id))
    }

    /// Returns true once every ship of the fleet is on the board.
    pub fn ready(&self) -> bool {
        self.pending_ships().next().is_none()
    }

    /// Check whether the ship could be placed at the given position, without placing it.
    pub fn check_placement(
        &self,
        id: ShipId,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<Placement, SetupError> {
        let ship = self.fleet.get(id).ok_or(SetupError::UnknownShip(id))?;
        if self.is_placed(id) {
            return Err(SetupError::AlreadyPlaced(id));
        }
        let placement = Placement::new(anchor, ship.len(), orientation);
        self.human.check_placement(&placement)?;
        Ok(placement)
    }

    /// Place the ship at the given position.
    pub fn place_ship(
        &mut self,
        id: ShipId,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<(), SetupError> {
        let placement = self.check_placement(id, anchor, orientation)?;
        self.human = self.human.place(&placement, id);
        debug!(%id, %anchor, ?orientation, "human placed ship");
        Ok(())
    }

    /// Take the ship off the board. Returns where it was, or `None` if it wasn't placed.
    pub fn unplace_ship(&mut self, id: ShipId) -> Option<Placement> {
        let removed = self.placement(id)?;
        let mut grid = Grid::new(*self.human.dimensions());
        for (other, _) in self.fleet.iter().filter(|&(other, _)| other != id) {
            if let Some(placement) = self.human.placement_of(other) {
                grid = grid.place(&placement, other);
            }
        }
        self.human = grid;
        Some(removed)
    }

    /// Turn a placed ship about its anchor. If the turned ship would not be legal, the
    /// ship stays where it was and the reason is returned.
    pub fn rotate_ship(&mut self, id: ShipId) -> Result<Placement, SetupError> {
        let current = self.placement(id).ok_or(SetupError::NotPlaced(id))?;
        self.unplace_ship(id);
        let turned = Placement::new(
            current.anchor(),
            current.len(),
            current.orientation().rotated(),
        );
        match self.human.check_placement(&turned) {
            Ok(()) => {
                self.human = self.human.place(&turned, id);
                debug!(%id, orientation = ?turned.orientation(), "human rotated ship");
                Ok(turned)
            }
            Err(reason) => {
                self.human = self.human.place(&current, id);
                Err(reason.into())
            }
        }
    }

    /// Randomly place the human's whole fleet, replacing any ships already placed.
    pub fn auto_place<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Result<(), FleetPlacementError> {
        self.human = auto_place_fleet(&self.fleet, *self.human.dimensions(), rng)?;
        Ok(())
    }

    /// Clear every human ship from the board.
    pub fn reset_ships(&mut self) {
        self.human = Grid::new(*self.human.dimensions());
    }

    /// Tries to start the game. If every ship is placed, returns a [`Game`], otherwise
    /// returns self.
    pub fn start(self) -> Result<Game<R>, Self> {
        if !self.ready() {
            return Err(self);
        }
        info!(first = ?self.first, "game started");
        Ok(Game {
            fleet: self.fleet,
            human: self.human,
            computer: self.computer,
            agent: self.agent,
            current: self.first,
            winner: None,
        })
    }
}

/// What a single shot did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TurnReport {
    /// Side that fired.
    pub shooter: Side,
    /// Cell that was fired at.
    pub coord: Coordinate,
    /// Result on the target board. Never [`ShotOutcome::AlreadyShot`]; such shots are
    /// refused.
    pub outcome: ShotOutcome,
    /// The ship that went down with this shot, if any.
    pub sunk: Option<ShipId>,
    /// The winner, if this shot ended the game.
    pub winner: Option<Side>,
}

/// Play phase. Turns strictly alternate, and a refused shot does not pass the turn.
#[derive(Debug)]
pub struct Game<R = StdRng> {
    fleet: Fleet,
    human: Grid,
    computer: Grid,
    agent: TargetingAgent<R>,
    current: Side,
    winner: Option<Side>,
}

impl<R: Rng> Game<R> {
    /// The fleet both sides placed.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Get the side whose turn it currently is.
    pub fn current(&self) -> Side {
        self.current
    }

    /// Get the winner, or `None` while the game is in progress.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// The human's board, fully revealed.
    pub fn human_board(&self) -> &Grid {
        &self.human
    }

    /// The computer's board, fully revealed. Front ends should only show the shot cells.
    pub fn computer_board(&self) -> &Grid {
        &self.computer
    }

    /// Fire the human's shot at the computer's board.
    pub fn fire(&mut self, coord: Coordinate) -> Result<TurnReport, CannotShootReason> {
        self.check_turn(Side::Human)?;
        self.resolve(Side::Human, coord)
    }

    /// Let the computer pick a cell and fire at the human's board.
    #[instrument(skip(self))]
    pub fn computer_turn(&mut self) -> Result<TurnReport, CannotShootReason> {
        self.check_turn(Side::Computer)?;
        let coord = self
            .agent
            .select_shot(&self.human)
            .ok_or(CannotShootReason::NoTargetsLeft)?;
        self.resolve(Side::Computer, coord)
    }

    /// Throw away this game and set up a new one with fresh boards against the same,
    /// reset, agent.
    pub fn restart(mut self) -> Result<GameSetup<R>, FleetPlacementError> {
        self.agent.reset();
        GameSetup::new(self.agent)
    }

    fn check_turn(&self, shooter: Side) -> Result<(), CannotShootReason> {
        if self.winner.is_some() {
            Err(CannotShootReason::GameOver)
        } else if self.current != shooter {
            Err(CannotShootReason::OutOfTurn)
        } else {
            Ok(())
        }
    }

    fn resolve(&mut self, shooter: Side, coord: Coordinate) -> Result<TurnReport, CannotShootReason> {
        let target = match shooter {
            Side::Human => &mut self.computer,
            Side::Computer => &mut self.human,
        };
        let (grid, outcome) = target
            .apply_shot(coord)
            .map_err(|_| CannotShootReason::OutOfBounds)?;
        if outcome == ShotOutcome::AlreadyShot {
            return Err(CannotShootReason::AlreadyShot);
        }
        *target = grid;

        let sunk = outcome.ship().filter(|&id| target.ship_sunk(id));
        if target.all_ships_sunk() {
            self.winner = Some(shooter);
            info!(winner = ?shooter, "game over");
        } else {
            self.current = shooter.opponent();
        }
        debug!(?shooter, %coord, ?outcome, ?sunk, "shot resolved");
        Ok(TurnReport {
            shooter,
            coord,
            outcome,
            sunk,
            winner: self.winner,
        })
    }
}
