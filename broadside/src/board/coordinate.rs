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
use std::fmt;

/// The coordinates of a single cell in a [`Grid`][crate::board::Grid].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Coordinate {
    /// Column of the cell.
    pub x: usize,
    /// Row of the cell.
    pub y: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether this cell falls on the even squares of a checkerboard laid over the grid.
    pub fn is_even_parity(&self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// Offset this coordinate by the given signed deltas. Returns `None` if either
    /// component would go negative. Does not check the upper bound of any grid.
    pub(crate) fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let x = offset_component(self.x, dx)?;
        let y = offset_component(self.y, dy)?;
        Some(Self { x, y })
    }
}

fn offset_component(v: usize, d: isize) -> Option<usize> {
    if d < 0 {
        v.checked_sub(d.unsigned_abs())
    } else {
        v.checked_add(d as usize)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_follows_checkerboard() {
        assert!(Coordinate::new(0, 0).is_even_parity());
        assert!(Coordinate::new(3, 5).is_even_parity());
        assert!(!Coordinate::new(0, 1).is_even_parity());
        assert!(!Coordinate::new(9, 4).is_even_parity());
    }

    #[test]
    fn offset_stops_at_zero() {
        let c = Coordinate::new(0, 4);
        assert_eq!(c.offset(-1, 0), None);
        assert_eq!(c.offset(1, -1), Some(Coordinate::new(1, 3)));
        assert_eq!(c.offset(0, -5), None);
    }
}
