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
//! Types that make up the game board.
//!
//! A [`Grid`] is treated as a value: placing a ship or firing a shot returns a new grid
//! and leaves the original untouched. Cells only ever move from [`Cell::Empty`] to
//! [`Cell::Miss`] or from [`Cell::Ship`] to [`Cell::Hit`].

use crate::ships::ShipId;

pub use self::{
    coordinate::Coordinate,
    dimensions::Dimensions,
    errors::{CannotPlaceReason, FleetPlacementError, PlaceError, ShotError},
    grid::{Cell, Grid},
    placement::{Orientation, Placement},
    setup::{auto_place_fleet, MAX_PLACEMENT_ATTEMPTS},
};

mod coordinate;
mod dimensions;
mod errors;
mod grid;
mod placement;
mod setup;

/// Result of a shot on a single player's grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// The shot landed in open water.
    Miss,
    /// The shot hit the ship with the given ID.
    Hit(ShipId),
    /// The cell had already been shot. Nothing changed.
    AlreadyShot,
}

impl ShotOutcome {
    /// Get the id of the ship that was hit.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            ShotOutcome::Hit(id) => Some(id),
            ShotOutcome::Miss | ShotOutcome::AlreadyShot => None,
        }
    }

    /// Whether the shot hit a ship.
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit(_))
    }
}

impl Grid {
    /// Check whether a ship could be placed at the given position. The ship's cells must
    /// all be on the board and empty, and every on-board cell touching the ship,
    /// diagonals included, must be empty as well. Cells past the edge of the board do not
    /// block placement.
    pub fn check_placement(&self, placement: &Placement) -> Result<(), CannotPlaceReason> {
        if placement.len() == 0 {
            return Err(CannotPlaceReason::ZeroLength);
        }
        if !placement.fits(&self.dim) {
            return Err(CannotPlaceReason::OutOfBounds);
        }
        if placement
            .footprint()
            .any(|coord| self[coord] != Cell::Empty)
        {
            return Err(CannotPlaceReason::Occupied);
        }
        if placement
            .buffer(&self.dim)
            .any(|coord| self[coord] != Cell::Empty)
        {
            return Err(CannotPlaceReason::TooClose);
        }
        Ok(())
    }

    /// Returns true if [`check_placement`][Grid::check_placement] accepts the placement.
    pub fn is_placement_legal(&self, placement: &Placement) -> bool {
        self.check_placement(placement).is_ok()
    }

    /// Return a copy of this grid with the ship written into its cells. Performs no
    /// legality checks; the caller should have checked the placement first. Cells that
    /// would fall off the board are skipped.
    pub fn place(&self, placement: &Placement, id: ShipId) -> Grid {
        debug_assert!(
            self.is_placement_legal(placement),
            "placing ship {} at illegal position {:?}",
            id,
            placement
        );
        let mut grid = self.clone();
        for coord in placement.footprint() {
            if let Some(cell) = grid.get_mut(coord) {
                *cell = Cell::Ship(id);
            }
        }
        grid
    }

    /// Check the placement and, if it is legal, return a copy of this grid with the ship
    /// placed.
    pub fn try_place(&self, placement: &Placement, id: ShipId) -> Result<Grid, PlaceError> {
        self.check_placement(placement)
            .map_err(|reason| PlaceError::new(reason, *placement))?;
        Ok(self.place(placement, id))
    }

    /// Fire at the given cell. Returns the resulting grid and what the shot did. A cell
    /// that was already shot yields [`ShotOutcome::AlreadyShot`] and an unchanged grid.
    pub fn apply_shot(&self, coord: Coordinate) -> Result<(Grid, ShotOutcome), ShotError> {
        let cell = self.get(coord).ok_or_else(|| ShotError::new(coord))?;
        let (next, outcome) = match cell {
            Cell::Empty => (Cell::Miss, ShotOutcome::Miss),
            Cell::Ship(id) => (Cell::Hit(id), ShotOutcome::Hit(id)),
            Cell::Miss | Cell::Hit(_) => return Ok((self.clone(), ShotOutcome::AlreadyShot)),
        };
        let mut grid = self.clone();
        if let Some(cell) = grid.get_mut(coord) {
            *cell = next;
        }
        Ok((grid, outcome))
    }

    /// Recover the placement of the given ship from its cells. Returns `None` if the ship
    /// is not on this grid.
    pub fn placement_of(&self, id: ShipId) -> Option<Placement> {
        let cells: Vec<_> = self.ship_cells(id).collect();
        let anchor = *cells.first()?;
        let orientation = match cells.get(1) {
            Some(second) if second.x == anchor.x => Orientation::Vertical,
            _ => Orientation::Horizontal,
        };
        Some(Placement::new(anchor, cells.len(), orientation))
    }

    /// Returns true if no cell holds a ship that has not been hit.
    pub fn all_ships_sunk(&self) -> bool {
        !self.cells.iter().any(|cell| matches!(cell, Cell::Ship(_)))
    }
}

/// See [`Grid::is_placement_legal`].
pub fn is_placement_legal(grid: &Grid, placement: &Placement) -> bool {
    grid.is_placement_legal(placement)
}

/// See [`Grid::place`].
pub fn place(grid: &Grid, placement: &Placement, id: ShipId) -> Grid {
    grid.place(placement, id)
}

/// See [`Grid::apply_shot`].
pub fn apply_shot(grid: &Grid, coord: Coordinate) -> Result<(Grid, ShotOutcome), ShotError> {
    grid.apply_shot(coord)
}

/// See [`Grid::all_ships_sunk`].
pub fn all_ships_sunk(grid: &Grid) -> bool {
    grid.all_ships_sunk()
}
