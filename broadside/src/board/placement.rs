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
//! Straight-line ship placements.
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::board::{Coordinate, Dimensions};

/// Axis a ship extends along from its anchor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// The ship extends towards increasing `x`.
    Horizontal,
    /// The ship extends towards increasing `y`.
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Step from one cell of a ship to the next.
    fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Position of a straight ship: the anchor is the cell with the smallest coordinates
/// and the ship extends `len` cells from it along `orientation`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Placement {
    anchor: Coordinate,
    len: usize,
    orientation: Orientation,
}

impl Placement {
    /// Describe a ship of the given length at the given anchor. Does not check against
    /// any board.
    pub fn new(anchor: Coordinate, len: usize, orientation: Orientation) -> Self {
        Self {
            anchor,
            len,
            orientation,
        }
    }

    /// The cell with the smallest coordinates.
    pub fn anchor(&self) -> Coordinate {
        self.anchor
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the placement covers no cells at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Axis the ship extends along.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Last cell of the ship, if the ship has any cells and its end is representable.
    pub fn end(&self) -> Option<Coordinate> {
        let (dx, dy) = self.orientation.step();
        let last = self.len.checked_sub(1)?;
        Some(Coordinate {
            x: self.anchor.x.checked_add(dx * last)?,
            y: self.anchor.y.checked_add(dy * last)?,
        })
    }

    /// Whether every cell of the ship lies inside the given dimensions.
    pub fn fits(&self, dim: &Dimensions) -> bool {
        self.end().map_or(false, |end| dim.contains(end))
    }

    /// Cells occupied by the ship, starting from the anchor.
    pub fn footprint(&self) -> impl Iterator<Item = Coordinate> {
        let (dx, dy) = self.orientation.step();
        let anchor = self.anchor;
        (0..self.len).map(move |i| Coordinate {
            x: anchor.x + dx * i,
            y: anchor.y + dy * i,
        })
    }

    /// Whether the given cell is one of the ship's cells.
    pub fn covers(&self, coord: Coordinate) -> bool {
        match (self.orientation, self.end()) {
            (_, None) => false,
            (Orientation::Horizontal, Some(end)) => {
                coord.y == self.anchor.y && (self.anchor.x..=end.x).contains(&coord.x)
            }
            (Orientation::Vertical, Some(end)) => {
                coord.x == self.anchor.x && (self.anchor.y..=end.y).contains(&coord.y)
            }
        }
    }

    /// In-bounds cells that touch the ship, diagonals included, excluding the ship's own
    /// cells. Requires the placement to fit the dimensions; a placement that doesn't fit
    /// yields an empty iterator.
    pub fn buffer(&self, dim: &Dimensions) -> impl Iterator<Item = Coordinate> {
        let dim = *dim;
        let ship = *self;
        let (min, max) = match (self.fits(&dim), self.end()) {
            (true, Some(end)) => (
                Coordinate::new(
                    self.anchor.x.saturating_sub(1),
                    self.anchor.y.saturating_sub(1),
                ),
                Coordinate::new(
                    (end.x + 1).min(dim.width() - 1),
                    (end.y + 1).min(dim.height() - 1),
                ),
            ),
            // Empty range.
            _ => (Coordinate::new(1, 1), Coordinate::new(0, 0)),
        };
        (min.y..=max.y)
            .flat_map(move |y| (min.x..=max.x).map(move |x| Coordinate::new(x, y)))
            .filter(move |&c| !ship.covers(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_follows_orientation() {
        let h = Placement::new(Coordinate::new(2, 3), 3, Orientation::Horizontal);
        assert_eq!(
            h.footprint().collect::<Vec<_>>(),
            vec![
                Coordinate::new(2, 3),
                Coordinate::new(3, 3),
                Coordinate::new(4, 3)
            ]
        );
        let v = Placement::new(Coordinate::new(2, 3), 2, Orientation::Vertical);
        assert_eq!(
            v.footprint().collect::<Vec<_>>(),
            vec![Coordinate::new(2, 3), Coordinate::new(2, 4)]
        );
        assert_eq!(v.end(), Some(Coordinate::new(2, 4)));
    }

    #[test]
    fn fits_checks_length_axis() {
        let dim = Dimensions::default();
        assert!(!Placement::new(Coordinate::new(7, 0), 4, Orientation::Horizontal).fits(&dim));
        assert!(Placement::new(Coordinate::new(6, 0), 4, Orientation::Horizontal).fits(&dim));
        assert!(Placement::new(Coordinate::new(7, 0), 4, Orientation::Vertical).fits(&dim));
        let empty = Placement::new(Coordinate::new(0, 0), 0, Orientation::Vertical);
        assert!(empty.is_empty());
        assert!(!empty.fits(&dim));
        assert_eq!(empty.footprint().count(), 0);
        assert!(!Placement::new(Coordinate::new(10, 0), 1, Orientation::Vertical).fits(&dim));
    }

    #[test]
    fn buffer_surrounds_ship() {
        let dim = Dimensions::default();
        let mid = Placement::new(Coordinate::new(3, 3), 2, Orientation::Horizontal);
        // 4x3 box less the two ship cells.
        assert_eq!(mid.buffer(&dim).count(), 10);
        assert!(mid.buffer(&dim).all(|c| !mid.covers(c)));
        assert!(mid.buffer(&dim).any(|c| c == Coordinate::new(5, 4)));
        assert!(mid.buffer(&dim).any(|c| c == Coordinate::new(2, 2)));

        let corner = Placement::new(Coordinate::new(0, 0), 1, Orientation::Vertical);
        let ring: Vec<_> = corner.buffer(&dim).collect();
        assert_eq!(
            ring,
            vec![
                Coordinate::new(1, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 1)
            ]
        );

        let edge = Placement::new(Coordinate::new(9, 6), 4, Orientation::Vertical);
        assert_eq!(edge.buffer(&dim).count(), 6);
    }

    #[test]
    fn buffer_of_unfit_placement_is_empty() {
        let dim = Dimensions::default();
        let off = Placement::new(Coordinate::new(8, 0), 3, Orientation::Horizontal);
        assert_eq!(off.buffer(&dim).count(), 0);
    }
}
