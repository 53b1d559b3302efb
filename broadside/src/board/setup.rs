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
//! Random placement of a whole fleet.
use std::iter;

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::{
    board::{Coordinate, Dimensions, FleetPlacementError, Grid, Orientation, Placement},
    ships::Fleet,
};

/// Number of random positions tried for a single ship before falling back to scanning
/// every position in order.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Place every ship of the fleet at a random legal position on an empty grid of the
/// given dimensions, in fleet order. Ship ids are assigned from 1 in fleet order.
///
/// Each ship gets [`MAX_PLACEMENT_ATTEMPTS`] random tries. If those all land on illegal
/// positions, every anchor and orientation is scanned in row-major order and the first
/// legal one is used. If there is no legal position at all, the fleet does not fit the
/// board and an error naming the ship is returned.
#[instrument(skip(fleet, rng), fields(ships = fleet.len()))]
pub fn auto_place_fleet<R: Rng + ?Sized>(
    fleet: &Fleet,
    dim: Dimensions,
    rng: &mut R,
) -> Result<Grid, FleetPlacementError> {
    let mut grid = Grid::new(dim);
    for (id, ship) in fleet.iter() {
        let placement = match random_placement(&grid, ship.len(), rng) {
            Some(placement) => placement,
            None => {
                warn!(%id, len = ship.len(), "random placement exhausted, scanning");
                scan_placement(&grid, ship.len())
                    .ok_or(FleetPlacementError::DoesNotFit { id, len: ship.len() })?
            }
        };
        debug!(%id, anchor = %placement.anchor(), orientation = ?placement.orientation(), "placed ship");
        grid = grid.place(&placement, id);
    }
    Ok(grid)
}

/// Try random anchors and orientations until one is legal or attempts run out.
fn random_placement<R: Rng + ?Sized>(grid: &Grid, len: usize, rng: &mut R) -> Option<Placement> {
    let dim = grid.dimensions();
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orientation: Orientation = rng.gen();
        let last = match orientation {
            Orientation::Horizontal => (dim.width().checked_sub(len), Some(dim.height() - 1)),
            Orientation::Vertical => (Some(dim.width() - 1), dim.height().checked_sub(len)),
        };
        let (max_x, max_y) = match last {
            (Some(x), Some(y)) => (x, y),
            // Too long for this axis.
            _ => continue,
        };
        let anchor = Coordinate::new(rng.gen_range(0, max_x + 1), rng.gen_range(0, max_y + 1));
        let placement = Placement::new(anchor, len, orientation);
        if grid.is_placement_legal(&placement) {
            return Some(placement);
        }
    }
    None
}

/// Find the first legal placement in row-major order, trying horizontal before vertical
/// at each anchor.
fn scan_placement(grid: &Grid, len: usize) -> Option<Placement> {
    grid.dimensions()
        .coordinates()
        .flat_map(|anchor| {
            iter::once(Orientation::Horizontal)
                .chain(iter::once(Orientation::Vertical))
                .map(move |orientation| Placement::new(anchor, len, orientation))
        })
        .find(|placement| grid.is_placement_legal(placement))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::ships::ShipId;

    #[test]
    fn scan_finds_first_legal_position() {
        let grid = Grid::new(Dimensions::new(4, 3));
        let first = scan_placement(&grid, 3).unwrap();
        assert_eq!(
            first,
            Placement::new(Coordinate::new(0, 0), 3, Orientation::Horizontal)
        );

        let grid = grid.place(&first, ShipId::new(1).unwrap());
        // Row 1 is buffer, so the next horizontal fit is on row 2.
        assert_eq!(
            scan_placement(&grid, 3),
            Some(Placement::new(
                Coordinate::new(0, 2),
                3,
                Orientation::Horizontal
            ))
        );
        assert_eq!(scan_placement(&grid, 5), None);
    }

    #[test]
    fn random_placement_respects_axis_length() {
        // Only vertical placements fit on a tall, narrow board.
        let grid = Grid::new(Dimensions::new(1, 5));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let placement = random_placement(&grid, 4, &mut rng).unwrap();
            assert_eq!(placement.orientation(), Orientation::Vertical);
            assert!(placement.fits(grid.dimensions()));
        }
    }

    #[test]
    fn fleet_ids_follow_fleet_order() {
        let fleet = Fleet::from_lengths(&[3, 1]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let grid = auto_place_fleet(&fleet, Dimensions::default(), &mut rng).unwrap();
        assert_eq!(grid.ship_cells(ShipId::new(1).unwrap()).count(), 3);
        assert_eq!(grid.ship_cells(ShipId::new(2).unwrap()).count(), 1);
    }
}
