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
//! Cell storage shared by the placement and shooting operations.

use std::{borrow::Borrow, ops::Index};

use crate::{
    board::{Coordinate, Dimensions},
    ships::ShipId,
};

/// State of a single cell in a player's grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    /// Open water that has not been shot.
    Empty,
    /// Part of the given ship, not yet shot.
    Ship(ShipId),
    /// Open water that has been shot.
    Miss,
    /// Part of the given ship, shot.
    Hit(ShipId),
}

impl Cell {
    /// Integer encoding of this cell: `0` for empty water, the ship id for an unshot ship
    /// cell, `-1` for a miss and `-2` for a hit.
    pub fn code(self) -> i16 {
        match self {
            Cell::Empty => 0,
            Cell::Ship(id) => i16::from(id.get()),
            Cell::Miss => -1,
            Cell::Hit(_) => -2,
        }
    }

    /// Whether a shot has already been fired at this cell.
    pub fn is_shot(self) -> bool {
        matches!(self, Cell::Miss | Cell::Hit(_))
    }

    /// The ship occupying this cell, whether or not it was hit.
    pub fn ship(self) -> Option<ShipId> {
        match self {
            Cell::Ship(id) | Cell::Hit(id) => Some(id),
            Cell::Empty | Cell::Miss => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// A player's side of the ocean.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    /// Dimensions of this grid.
    pub(super) dim: Dimensions,
    /// Cells in row-major order.
    pub(super) cells: Box<[Cell]>,
}

impl Grid {
    /// Construct an empty grid of the given dimensions.
    pub fn new(dim: Dimensions) -> Self {
        let cells = (0..dim.total_size()).map(|_| Cell::Empty).collect();
        Self { dim, cells }
    }

    /// Get the [`Dimensions`] of this grid.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dim
    }

    /// Get the cell at the given [`Coordinate`], or `None` if it is out of bounds.
    pub fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<Cell> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(|i| self.cells.get(i))
            .copied()
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(super) fn get_mut<B: Borrow<Coordinate>>(&mut self, coord: B) -> Option<&mut Cell> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Iterate every cell with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        let dim = self.dim;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (dim.un_linearize(i), cell))
    }

    /// Iterate the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dim.width())
    }

    /// Integer encoding of the whole grid, one `Vec` per row. See [`Cell::code`].
    pub fn codes(&self) -> Vec<Vec<i16>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    /// Number of cells that hold a ship that has not been hit.
    pub fn ship_cell_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Ship(_)))
            .count()
    }

    /// Number of cells that have been shot.
    pub fn shot_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_shot()).count()
    }

    /// Coordinates of every cell belonging to the given ship.
    pub fn ship_cells(&self, id: ShipId) -> impl Iterator<Item = Coordinate> + '_ {
        self.iter()
            .filter(move |(_, cell)| cell.ship() == Some(id))
            .map(|(coord, _)| coord)
    }

    /// Whether the ship is on this grid and every one of its cells has been hit.
    pub fn ship_sunk(&self, id: ShipId) -> bool {
        let mut cells = self
            .cells
            .iter()
            .filter(|cell| cell.ship() == Some(id))
            .peekable();
        cells.peek().is_some() && cells.all(|cell| cell.is_shot())
    }

    /// Ids of the ships that still have at least one cell that has not been hit, in
    /// ascending order.
    pub fn remaining_ships(&self) -> Vec<ShipId> {
        let mut ids: Vec<_> = self
            .cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::Ship(id) => Some(*id),
                _ => None,
            })
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl<B: Borrow<Coordinate>> Index<B> for Grid {
    type Output = Cell;

    fn index(&self, coord: B) -> &Self::Output {
        let coord = coord.borrow();
        match self.dim.try_linearize(coord) {
            Some(i) => &self.cells[i],
            None => panic!("{} is out of bounds for {:?}", coord, self.dim),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Orientation, Placement, ShotOutcome};

    fn id(n: u8) -> ShipId {
        ShipId::new(n).unwrap()
    }

    #[test]
    fn codes_encode_every_cell_state() {
        let anchors = [(0, 0), (2, 0), (4, 0), (6, 0), (0, 2), (2, 2), (4, 2)];
        let mut grid = Grid::new(Dimensions::new(7, 3));
        for (n, &(x, y)) in (1..).zip(anchors.iter()) {
            let placement = Placement::new(Coordinate::new(x, y), 1, Orientation::Horizontal);
            grid = grid.place(&placement, id(n));
        }
        let (grid, hit) = grid.apply_shot(Coordinate::new(2, 0)).unwrap();
        assert_eq!(hit, ShotOutcome::Hit(id(2)));
        let (grid, miss) = grid.apply_shot(Coordinate::new(1, 1)).unwrap();
        assert_eq!(miss, ShotOutcome::Miss);

        assert_eq!(
            grid.codes(),
            vec![
                vec![1, 0, -2, 0, 3, 0, 4],
                vec![0, -1, 0, 0, 0, 0, 0],
                vec![5, 0, 6, 0, 7, 0, 0],
            ]
        );
        assert_eq!(grid[Coordinate::new(6, 0)].code(), 4);
        assert_eq!(Cell::default().code(), 0);
    }
}
