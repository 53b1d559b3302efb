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
//! Bounds of a rectangular board.
use std::borrow::Borrow;

use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

use crate::board::Coordinate;

/// Offsets of the four orthogonal neighbors, in the order up, down, left, right.
const ORTHOGONAL: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Simple rectangular dimensions.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Dimensions {
    /// Width of the board. This cooresponds to the `x` [`Coordinate`].
    width: usize,
    /// Height of the board. This cooresponds to the `y` [`Coordinate`].
    height: usize,
}

impl Dimensions {
    /// Create new [`Dimensions`] with the specified width and height.
    /// Panics if `width * height` exceeds `usize::max_value()` or if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None if width == 0 || height == 0 => {
                panic!("Dimensions must be nonzero, got {}x{}", width, height)
            }
            None => panic!(
                "Dimensions too large: {} * {} > {}",
                width,
                height,
                usize::max_value()
            ),
        }
    }

    /// Create new [`Dimensions`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `usize::max_value()` or if `width` or
    /// `height` is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width.checked_mul(height).map(|_| Self { width, height })
        }
    }

    /// Get the width of these [`Dimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`Dimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells covered by these [`Dimensions`].
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Check if the given [`Coordinate`] is in bounds for these [`Dimensions`].
    #[inline]
    pub fn contains<B: Borrow<Coordinate>>(&self, coord: B) -> bool {
        let c = coord.borrow();
        c.x < self.width && c.y < self.height
    }

    /// Convert a coordinate to a row-major index within these dimensions.
    /// Returns `None` if the coordinate is out of range.
    pub fn try_linearize(&self, coord: &Coordinate) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y * self.width + coord.x)
        } else {
            None
        }
    }

    /// Convert a row-major index back into a [`Coordinate`].
    pub fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate {
            x: idx % self.width,
            y: idx / self.width,
        }
    }

    /// Iterate every coordinate in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let dim = *self;
        (0..dim.total_size()).map(move |idx| dim.un_linearize(idx))
    }

    /// Iterate the in-bounds orthogonal neighbors of the given coordinate: up, down,
    /// left, then right.
    pub fn neighbors(&self, coord: Coordinate) -> impl Iterator<Item = Coordinate> {
        let dim = *self;
        let offsets: &'static [(isize, isize)] = &ORTHOGONAL;
        offsets
            .iter()
            .filter_map(move |&(dx, dy)| coord.offset(dx, dy))
            .filter(move |c| dim.contains(c))
    }
}

impl Default for Dimensions {
    /// Construct the default dimensions, a 10x10 board.
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

impl Distribution<Coordinate> for Dimensions {
    /// Sample a coordinate uniformly from every cell of the board.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        let x = Uniform::new(0, self.width).sample(rng);
        let y = Uniform::new(0, self.height).sample(rng);
        Coordinate { x, y }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(Dimensions::try_new(0, 10), None);
        assert_eq!(Dimensions::try_new(10, 0), None);
        assert_eq!(Dimensions::try_new(usize::max_value(), 2), None);
        assert!(Dimensions::try_new(3, 4).is_some());
    }

    #[test]
    fn linearize_is_row_major() {
        let dim = Dimensions::default();
        assert_eq!(dim.try_linearize(&Coordinate::new(3, 2)), Some(23));
        assert_eq!(dim.try_linearize(&Coordinate::new(10, 0)), None);
        assert_eq!(dim.un_linearize(23), Coordinate::new(3, 2));
        let all: Vec<_> = dim.coordinates().collect();
        assert_eq!(all.len(), 100);
        assert_eq!(all[0], Coordinate::new(0, 0));
        assert_eq!(all[1], Coordinate::new(1, 0));
        assert_eq!(all[99], Coordinate::new(9, 9));
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let dim = Dimensions::default();
        let corner: Vec<_> = dim.neighbors(Coordinate::new(0, 0)).collect();
        assert_eq!(corner, vec![Coordinate::new(0, 1), Coordinate::new(1, 0)]);

        let center: Vec<_> = dim.neighbors(Coordinate::new(5, 5)).collect();
        assert_eq!(
            center,
            vec![
                Coordinate::new(5, 4),
                Coordinate::new(5, 6),
                Coordinate::new(4, 5),
                Coordinate::new(6, 5),
            ]
        );
    }

    #[test]
    fn samples_stay_in_bounds() {
        let dim = Dimensions::new(3, 7);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let c: Coordinate = dim.sample(&mut rng);
            assert!(dim.contains(c));
        }
    }
}
