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
//! The computer opponent: places its own fleet and picks where to fire.
//!
//! The agent hunts with random shots restricted to one colour of a checkerboard. Every
//! ship of length two or more covers at least one cell of each colour, so nothing is
//! missed while the search space is halved. After a hit it switches to targeting,
//! trying the orthogonal neighbors of the newest hit first.
use rand::{distributions::Distribution, rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, instrument, trace};

use crate::{
    board::{auto_place_fleet, Cell, Coordinate, Dimensions, FleetPlacementError, Grid},
    ships::Fleet,
};

pub use self::record::ShotRecord;

mod record;

/// Number of random hunt shots sampled before scanning the board in order.
pub const HUNT_SAMPLE_ATTEMPTS: usize = 100;

/// Which search the agent will use for its next shot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    /// No open leads; shots are sampled from the checkerboard.
    Hunt,
    /// Follow-up cells from an earlier hit are queued.
    Target,
}

/// Computer opponent for a single game. Construct a new one, or [`reset`][Self::reset]
/// this one, for every game.
#[derive(Debug)]
pub struct TargetingAgent<R = StdRng> {
    /// Ships the agent places on its own board.
    fleet: Fleet,

    /// Dimensions of the agent's own board.
    dim: Dimensions,

    /// Shot history and follow-up queue.
    record: ShotRecord,

    rng: R,
}

impl TargetingAgent<StdRng> {
    /// Create an agent for the given fleet on the standard board, seeded from system
    /// entropy.
    pub fn new(fleet: Fleet) -> Self {
        Self::with_rng(fleet, StdRng::from_entropy())
    }
}

impl<R: Rng> TargetingAgent<R> {
    /// Create an agent for the given fleet on the standard board, drawing randomness
    /// from `rng`.
    pub fn with_rng(fleet: Fleet, rng: R) -> Self {
        Self {
            fleet,
            dim: Dimensions::default(),
            record: ShotRecord::new(),
            rng,
        }
    }

    /// Change the dimensions of the board the agent places its own ships on.
    pub fn with_dimensions(mut self, dim: Dimensions) -> Self {
        self.dim = dim;
        self
    }

    /// The agent's fleet.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Dimensions of the agent's own board.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dim
    }

    /// Shot history and follow-up queue.
    pub fn record(&self) -> &ShotRecord {
        &self.record
    }

    /// Which search the next shot will come from. The agent is targeting while any
    /// queued follow-up is still unshot.
    pub fn mode(&self) -> Mode {
        let record = &self.record;
        if record.candidates().iter().any(|&c| !record.has_shot(c)) {
            Mode::Target
        } else {
            Mode::Hunt
        }
    }

    /// Randomly place the agent's fleet on an empty board. Independent of the targeting
    /// state.
    pub fn place_ships(&mut self) -> Result<Grid, FleetPlacementError> {
        auto_place_fleet(&self.fleet, self.dim, &mut self.rng)
    }

    /// Forget all shots and leads so the agent can play another game.
    pub fn reset(&mut self) {
        self.record.clear();
    }

    /// Choose the next cell to fire at on the opponent's grid and record it as shot.
    /// If the opponent has an unshot ship in that cell, its orthogonal neighbors are
    /// queued as follow-ups. The caller is responsible for applying the shot to the
    /// grid.
    ///
    /// Returns `None` once every cell of the grid has been fired at.
    #[instrument(skip(self, opponent), fields(shots = self.record.shots_taken()))]
    pub fn select_shot(&mut self, opponent: &Grid) -> Option<Coordinate> {
        let dim = *opponent.dimensions();
        let mode = self.mode();
        let coord = self
            .next_candidate(&dim)
            .or_else(|| self.hunt(&dim))
            .or_else(|| self.first_unshot(&dim, |_| true))?;
        self.record.record_shot(coord);

        let hit = matches!(opponent.get(coord), Some(Cell::Ship(_)));
        if hit {
            let follow_ups = dim.neighbors(coord);
            self.record.record_hit(coord, follow_ups);
            trace!(candidates = ?self.record.candidates(), "queued follow-ups");
        }
        debug!(%coord, ?mode, hit, "selected shot");
        Some(coord)
    }

    /// Next queued follow-up that is still on the board and not yet shot.
    fn next_candidate(&mut self, dim: &Dimensions) -> Option<Coordinate> {
        while let Some(coord) = self.record.pop_candidate() {
            if dim.contains(coord) {
                return Some(coord);
            }
            trace!(%coord, "dropped off-board candidate");
        }
        None
    }

    /// Random checkerboard shot. Falls back to the first unshot checkerboard cell in
    /// row-major order when sampling keeps landing on used cells.
    fn hunt(&mut self, dim: &Dimensions) -> Option<Coordinate> {
        for _ in 0..HUNT_SAMPLE_ATTEMPTS {
            let coord: Coordinate = dim.sample(&mut self.rng);
            if coord.is_even_parity() && !self.record.has_shot(coord) {
                return Some(coord);
            }
        }
        self.first_unshot(dim, Coordinate::is_even_parity)
    }

    /// First unshot cell in row-major order that passes the filter.
    fn first_unshot<F>(&self, dim: &Dimensions, mut filter: F) -> Option<Coordinate>
    where
        F: FnMut(&Coordinate) -> bool,
    {
        dim.coordinates()
            .find(|coord| filter(coord) && !self.record.has_shot(*coord))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        board::{Orientation, Placement},
        ships::ShipId,
    };

    fn agent(seed: u64) -> TargetingAgent<StdRng> {
        TargetingAgent::with_rng(Fleet::standard(), StdRng::seed_from_u64(seed))
    }

    fn single_ship(x: usize, y: usize, len: usize, orientation: Orientation) -> Grid {
        Grid::new(Dimensions::default()).place(
            &Placement::new(Coordinate::new(x, y), len, orientation),
            ShipId::new(1).unwrap(),
        )
    }

    #[test]
    fn never_repeats_a_shot() {
        for seed in 0..10 {
            let mut agent = agent(seed);
            let mut board = agent.place_ships().unwrap();
            let mut seen = HashSet::new();
            while let Some(coord) = agent.select_shot(&board) {
                assert!(seen.insert(coord), "{} returned twice", coord);
                board = board.apply_shot(coord).unwrap().0;
            }
            assert_eq!(seen.len(), 100);
            assert!(board.all_ships_sunk());
            assert_eq!(board.shot_count(), 100);
            assert_eq!(agent.select_shot(&board), None);
        }
    }

    #[test]
    fn hunts_on_checkerboard_until_exhausted() {
        // No ships means no hits, so every shot comes from hunting.
        let board = Grid::new(Dimensions::default());
        let mut agent = agent(42);
        let shots: Vec<_> = std::iter::from_fn(|| agent.select_shot(&board)).collect();
        assert_eq!(shots.len(), 100);
        assert!(shots[..50].iter().all(Coordinate::is_even_parity));
        assert!(shots[50..].iter().all(|c| !c.is_even_parity()));
        // Once the checkerboard is used up the rest come in row-major order.
        let mut odd = shots[50..].to_vec();
        odd.sort_by_key(|c| (c.y, c.x));
        assert_eq!(&shots[50..], &odd[..]);
    }

    #[test]
    fn follows_up_around_a_hit() {
        let board = single_ship(5, 5, 1, Orientation::Horizontal);
        let mut agent = agent(7);
        // Leave (5, 5) as the only checkerboard cell left.
        let target = Coordinate::new(5, 5);
        for coord in Dimensions::default().coordinates() {
            if coord.is_even_parity() && coord != target {
                agent.record.record_shot(coord);
            }
        }
        assert_eq!(agent.mode(), Mode::Hunt);
        assert_eq!(agent.select_shot(&board), Some(target));
        assert_eq!(agent.record().last_hit(), Some(target));
        assert_eq!(agent.mode(), Mode::Target);

        let next = agent.select_shot(&board).unwrap();
        let expected = [
            Coordinate::new(4, 5),
            Coordinate::new(6, 5),
            Coordinate::new(5, 4),
            Coordinate::new(5, 6),
        ];
        assert!(expected.contains(&next), "{} is not next to {}", next, target);
        // Newest candidate first: right was queued last.
        assert_eq!(next, Coordinate::new(6, 5));
    }

    #[test]
    fn follow_ups_stay_on_board() {
        let board = single_ship(0, 0, 1, Orientation::Horizontal);
        let mut agent = agent(3);
        for coord in Dimensions::default().coordinates() {
            if coord.is_even_parity() && coord != Coordinate::new(0, 0) {
                agent.record.record_shot(coord);
            }
        }
        assert_eq!(agent.select_shot(&board), Some(Coordinate::new(0, 0)));
        let mut queued = agent.record().candidates().to_vec();
        queued.sort();
        assert_eq!(queued, vec![Coordinate::new(0, 1), Coordinate::new(1, 0)]);
    }

    #[test]
    fn chases_a_ship_to_the_end() {
        let dim = Dimensions::default();
        for seed in 0..20 {
            let mut board = single_ship(2, 7, 4, Orientation::Horizontal);
            let mut agent = agent(seed);
            let mut hits: Vec<Coordinate> = Vec::new();
            while !board.all_ships_sunk() {
                let targeting = agent.mode() == Mode::Target;
                let coord = agent.select_shot(&board).unwrap();
                if targeting {
                    assert!(
                        hits.iter().any(|&hit| dim.neighbors(hit).any(|n| n == coord)),
                        "{} is not next to any hit",
                        coord
                    );
                }
                let (next, outcome) = board.apply_shot(coord).unwrap();
                if outcome.is_hit() {
                    hits.push(coord);
                }
                board = next;
            }
            assert_eq!(hits.len(), 4);
        }
    }

    #[test]
    fn misses_leave_the_queue_alone() {
        let board = single_ship(9, 9, 1, Orientation::Horizontal);
        let mut agent = agent(5);
        agent.record.record_shot(Coordinate::new(9, 9));
        let coord = agent.select_shot(&board).unwrap();
        assert_ne!(coord, Coordinate::new(9, 9));
        assert_eq!(agent.mode(), Mode::Hunt);
        assert_eq!(agent.record().last_hit(), None);
    }

    #[test]
    fn reset_forgets_the_last_game() {
        let mut agent = agent(9);
        let board = agent.place_ships().unwrap();
        for _ in 0..30 {
            agent.select_shot(&board);
        }
        assert_eq!(agent.record().shots_taken(), 30);
        agent.reset();
        assert_eq!(agent.record().shots_taken(), 0);
        assert_eq!(agent.mode(), Mode::Hunt);
        assert_eq!(agent.record().last_hit(), None);
    }

    #[test]
    fn places_its_own_fleet() {
        let mut agent = agent(1);
        let first = agent.place_ships().unwrap();
        assert_eq!(first.ship_cell_count(), 16);
        assert_eq!(first.remaining_ships().len(), agent.fleet().len());
        // Placement does not touch the shot history.
        assert_eq!(agent.record().shots_taken(), 0);

        let small = TargetingAgent::with_rng(
            Fleet::from_lengths(&[2]).unwrap(),
            StdRng::seed_from_u64(2),
        )
        .with_dimensions(Dimensions::new(2, 1));
        let mut small = small;
        let grid = small.place_ships().unwrap();
        assert_eq!(grid.ship_cell_count(), 2);
    }
}
