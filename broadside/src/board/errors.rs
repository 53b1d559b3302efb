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
//! Errors used by the `Grid`.

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{
    board::{Coordinate, Placement},
    ships::ShipId,
};

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// The ship had no cells.
    #[error("the ship has zero length")]
    ZeroLength,
    /// One or more of the ship's cells would be off the board.
    #[error("the ship does not fit on the board at the requested position")]
    OutOfBounds,
    /// One or more of the ship's cells was already occupied.
    #[error("the requested position was already occupied")]
    Occupied,
    /// A cell touching the ship, diagonals included, was not empty water.
    #[error("the requested position touches another ship")]
    TooClose,
}

/// Error caused when attempting to place a ship in an invalid position.
#[derive(Error, Copy, Clone, Eq, PartialEq)]
#[error("could not place ship at {placement:?}: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    placement: Placement,
}

impl Debug for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlaceError {
    /// Construct a placement error from a reason and placement.
    pub(super) fn new(reason: CannotPlaceReason, placement: Placement) -> Self {
        Self { reason, placement }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get the placement that was attempted.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }
}

/// Error returned when trying to shoot a cell outside the grid. Shots at cells that
/// were already shot are not errors; they produce
/// [`ShotOutcome::AlreadyShot`][crate::board::ShotOutcome::AlreadyShot].
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("cannot shoot {coord}: out of bounds")]
pub struct ShotError {
    /// The coordinates of the cell.
    coord: Coordinate,
}

impl ShotError {
    pub(super) fn new(coord: Coordinate) -> Self {
        Self { coord }
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// Raised when random placement cannot fit a fleet onto a board. This means the fleet
/// is too large for the board it was configured with.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum FleetPlacementError {
    /// No legal position remained for the given ship after the ships before it were
    /// placed.
    #[error("no room left for ship {id} of length {len}")]
    DoesNotFit {
        /// Ship that could not be placed.
        id: ShipId,
        /// Length of that ship.
        len: usize,
    },
}
