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
use std::collections::HashSet;

use crate::board::Coordinate;

/// Everything the computer remembers about its own shots during one game.
#[derive(Debug, Clone, Default)]
pub struct ShotRecord {
    /// Every coordinate the agent has fired at. Authoritative: nothing in here is ever
    /// returned again.
    shot: HashSet<Coordinate>,

    /// Follow-up cells queued after hits. Used as a stack so the newest lead is tried
    /// first.
    candidates: Vec<Coordinate>,

    /// The most recent shot that hit a ship.
    last_hit: Option<Coordinate>,
}

impl ShotRecord {
    /// Construct an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the agent has already fired at the given coordinate.
    pub fn has_shot(&self, coord: Coordinate) -> bool {
        self.shot.contains(&coord)
    }

    /// Number of shots fired so far.
    pub fn shots_taken(&self) -> usize {
        self.shot.len()
    }

    /// Queued follow-up cells, oldest first. The last entry is tried next.
    pub fn candidates(&self) -> &[Coordinate] {
        &self.candidates
    }

    /// The most recent shot that hit a ship, if any.
    pub fn last_hit(&self) -> Option<Coordinate> {
        self.last_hit
    }

    /// Mark the coordinate as shot. Returns false if it already was.
    pub(super) fn record_shot(&mut self, coord: Coordinate) -> bool {
        self.shot.insert(coord)
    }

    /// Remember a hit and queue the given follow-up cells, skipping any already shot.
    pub(super) fn record_hit<I>(&mut self, coord: Coordinate, follow_ups: I)
    where
        I: IntoIterator<Item = Coordinate>,
    {
        self.last_hit = Some(coord);
        let shot = &self.shot;
        self.candidates
            .extend(follow_ups.into_iter().filter(|c| !shot.contains(c)));
    }

    /// Pop the newest queued candidate that has not been shot since it was queued.
    /// Stale candidates are dropped along the way.
    pub(super) fn pop_candidate(&mut self) -> Option<Coordinate> {
        while let Some(coord) = self.candidates.pop() {
            if !self.shot.contains(&coord) {
                return Some(coord);
            }
        }
        None
    }

    /// Forget everything.
    pub(super) fn clear(&mut self) {
        self.shot.clear();
        self.candidates.clear();
        self.last_hit = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_candidates_are_dropped() {
        let mut record = ShotRecord::new();
        let a = Coordinate::new(1, 1);
        let b = Coordinate::new(2, 1);
        let c = Coordinate::new(3, 1);
        record.record_hit(Coordinate::new(0, 0), vec![a, b, c]);
        assert_eq!(record.candidates(), &[a, b, c]);

        // Shot through some other path after being queued.
        assert!(record.record_shot(c));
        assert!(record.record_shot(b));
        assert_eq!(record.pop_candidate(), Some(a));
        assert_eq!(record.pop_candidate(), None);
        assert!(record.candidates().is_empty());
    }

    #[test]
    fn hits_skip_cells_already_shot() {
        let mut record = ShotRecord::new();
        let hit = Coordinate::new(4, 4);
        record.record_shot(hit);
        record.record_shot(Coordinate::new(4, 3));
        record.record_hit(hit, vec![Coordinate::new(4, 3), Coordinate::new(4, 5)]);
        assert_eq!(record.candidates(), &[Coordinate::new(4, 5)]);
        assert_eq!(record.last_hit(), Some(hit));
        assert!(!record.record_shot(hit));
        assert_eq!(record.shots_taken(), 2);

        record.clear();
        assert_eq!(record.shots_taken(), 0);
        assert_eq!(record.last_hit(), None);
        assert!(record.candidates().is_empty());
        assert!(!record.has_shot(hit));
    }
}
