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
//! Core of a two-player naval combat game, human against computer, on a 10x10 grid.
//!
//! - [`board`] holds the grid, placement legality with its one-cell buffer, shots, and
//!   random fleet placement.
//! - [`ships`] defines ship ids and the fleet each side places.
//! - [`agent`] is the computer opponent: checkerboard hunting and follow-up targeting
//!   after a hit.
//! - [`game`] ties the pieces into a placement phase and a turn-by-turn play phase.

pub mod agent;
pub mod board;
pub mod game;
pub mod ships;

pub use crate::{
    agent::TargetingAgent,
    board::{Coordinate, Grid, Orientation, ShotOutcome},
    game::{Game, GameSetup, Side},
    ships::{Fleet, ShipId},
};
