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
//! Ship identifiers and the set of ships each player brings to the game.
use std::{convert::TryFrom, fmt, num::NonZeroU8, str::FromStr};

use once_cell::sync::Lazy;
use thiserror::Error;

/// Lengths of the standard fleet, in placement order.
pub const STANDARD_LENGTHS: [usize; 7] = [4, 3, 3, 2, 2, 1, 1];

/// Names of the ships in the standard fleet, matching [`STANDARD_LENGTHS`].
const STANDARD_NAMES: [&str; 7] = [
    "Battleship",
    "Cruiser",
    "Submarine",
    "Destroyer",
    "Frigate",
    "Raft 1",
    "Raft 2",
];

static STANDARD: Lazy<Fleet> = Lazy::new(|| Fleet {
    ships: STANDARD_NAMES
        .iter()
        .zip(STANDARD_LENGTHS.iter())
        .map(|(&name, &len)| FleetShip {
            name: name.to_owned(),
            len,
        })
        .collect(),
});

/// Identifier of a ship within a single player's board. Always a small positive
/// integer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShipId(NonZeroU8);

impl ShipId {
    /// Construct a [`ShipId`]. Returns `None` for 0.
    pub fn new(id: u8) -> Option<Self> {
        NonZeroU8::new(id).map(ShipId)
    }

    /// The numeric value of this id.
    pub fn get(self) -> u8 {
        self.0.get()
    }

    /// Id of the ship at the given position in a fleet. Ids are assigned from 1 in fleet
    /// order.
    pub(crate) fn from_index(idx: usize) -> Option<Self> {
        u8::try_from(idx + 1).ok().and_then(Self::new)
    }

    /// Position of this ship in its fleet.
    pub(crate) fn index(self) -> usize {
        usize::from(self.get()) - 1
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A single ship of a [`Fleet`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FleetShip {
    name: String,
    len: usize,
}

impl FleetShip {
    /// Display name of the ship.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells the ship occupies.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the ship has no cells. Never true for a ship of a built [`Fleet`].
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Reason a fleet could not be built.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum FleetError {
    /// No ships were given.
    #[error("a fleet needs at least one ship")]
    Empty,
    /// More ships were given than can be assigned ids.
    #[error("a fleet can hold at most 255 ships, got {0}")]
    TooMany(usize),
    /// A ship had a length of zero.
    #[error("ship {0} has zero length")]
    ZeroLength(usize),
    /// A length in a fleet description could not be parsed.
    #[error("invalid ship length {0:?}")]
    InvalidLength(String),
}

/// Ordered set of ships placed by one player. Ship `i` (zero-based) gets id `i + 1`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Fleet {
    ships: Vec<FleetShip>,
}

impl Fleet {
    /// The standard seven ship fleet: one of length 4, two each of 3, 2 and 1.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Build a fleet from bare lengths. Ships are named `Ship 1`, `Ship 2`, ...
    pub fn from_lengths(lengths: &[usize]) -> Result<Self, FleetError> {
        Self::from_named(
            lengths
                .iter()
                .enumerate()
                .map(|(i, &len)| (format!("Ship {}", i + 1), len)),
        )
    }

    /// Build a fleet from `(name, length)` pairs.
    pub fn from_named<N, I>(ships: I) -> Result<Self, FleetError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, usize)>,
    {
        let ships: Vec<_> = ships
            .into_iter()
            .map(|(name, len)| FleetShip {
                name: name.into(),
                len,
            })
            .collect();
        if ships.is_empty() {
            return Err(FleetError::Empty);
        }
        if ships.len() > usize::from(u8::max_value()) {
            return Err(FleetError::TooMany(ships.len()));
        }
        if let Some(i) = ships.iter().position(|ship| ship.len == 0) {
            return Err(FleetError::ZeroLength(i + 1));
        }
        Ok(Self { ships })
    }

    /// Number of ships in the fleet.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Total number of cells covered by every ship of the fleet.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(FleetShip::len).sum()
    }

    /// Get the ship with the given id.
    pub fn get(&self, id: ShipId) -> Option<&FleetShip> {
        self.ships.get(id.index())
    }

    /// Iterate the ships of this fleet along with their ids, in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (ShipId, &FleetShip)> {
        self.ships.iter().enumerate().filter_map(|(i, ship)| {
            // Construction caps the fleet at u8::MAX ships so every index has an id.
            ShipId::from_index(i).map(|id| (id, ship))
        })
    }

    /// Ship lengths in placement order.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.ships.iter().map(FleetShip::len)
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Fleet {
    type Err = FleetError;

    /// Parse a comma separated list of ship lengths, such as `4,3,3,2,2,1,1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lengths = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse()
                    .map_err(|_| FleetError::InvalidLength(part.to_owned()))
            })
            .collect::<Result<Vec<usize>, _>>()?;
        Self::from_lengths(&lengths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fleet() {
        let fleet = Fleet::standard();
        assert_eq!(fleet.len(), 7);
        assert_eq!(fleet.total_cells(), 16);
        assert_eq!(fleet.lengths().collect::<Vec<_>>(), STANDARD_LENGTHS);
        let first = fleet.get(ShipId::new(1).unwrap()).unwrap();
        assert_eq!(first.name(), "Battleship");
        assert_eq!(first.len(), 4);
        assert!(fleet.iter().all(|(_, ship)| !ship.is_empty()));
        assert!(fleet.get(ShipId::new(8).unwrap()).is_none());
    }

    #[test]
    fn ids_follow_fleet_order() {
        let fleet = Fleet::from_lengths(&[2, 5]).unwrap();
        let ids: Vec<_> = fleet.iter().map(|(id, ship)| (id.get(), ship.len())).collect();
        assert_eq!(ids, vec![(1, 2), (2, 5)]);
        assert_eq!(fleet.get(ShipId::new(2).unwrap()).unwrap().name(), "Ship 2");
    }

    #[test]
    fn rejects_bad_fleets() {
        assert_eq!(Fleet::from_lengths(&[]), Err(FleetError::Empty));
        assert_eq!(Fleet::from_lengths(&[3, 0]), Err(FleetError::ZeroLength(2)));
        assert_eq!(
            Fleet::from_lengths(&[1; 256]),
            Err(FleetError::TooMany(256))
        );
        assert!(Fleet::from_lengths(&[1; 255]).is_ok());
    }

    #[test]
    fn parses_lengths() {
        let fleet: Fleet = "4, 3,3,2,2,1,1".parse().unwrap();
        assert_eq!(fleet.lengths().collect::<Vec<_>>(), STANDARD_LENGTHS);
        assert_eq!(
            "4,x".parse::<Fleet>(),
            Err(FleetError::InvalidLength("x".to_owned()))
        );
        assert_eq!("".parse::<Fleet>(), Err(FleetError::Empty));
    }
}
