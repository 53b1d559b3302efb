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
use thiserror::Error;

use crate::{board::CannotPlaceReason, ships::ShipId};

/// Reason a ship could not be placed during setup.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum SetupError {
    /// The fleet has no ship with the given id.
    #[error("no ship with id {0} in the fleet")]
    UnknownShip(ShipId),
    /// The ship was already placed.
    #[error("ship {0} was already placed")]
    AlreadyPlaced(ShipId),
    /// The ship has not been placed yet.
    #[error("ship {0} has not been placed")]
    NotPlaced(ShipId),
    /// The position was not legal.
    #[error(transparent)]
    Place(#[from] CannotPlaceReason),
}

/// Reason why a shot was refused.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The game is already over.
    #[error("the game is already over")]
    GameOver,

    /// It is the other side's turn.
    #[error("player attempted to shoot out of turn")]
    OutOfTurn,

    /// The specified cell is out of bounds for the grid.
    #[error("the target coordinate is out of bounds")]
    OutOfBounds,

    /// The specified cell has already been shot.
    #[error("the target cell was already shot")]
    AlreadyShot,

    /// The computer has fired at every cell of the board.
    #[error("no cells left to shoot")]
    NoTargetsLeft,
}
