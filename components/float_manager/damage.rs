/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use app_units::Au;

/// The block ranges in which floats changed during reflow, so that lines
/// overlapping them can be marked dirty. Ranges are closed and kept sorted
/// and disjoint; overlapping or touching ranges are merged.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FloatDamage {
    intervals: Vec<(Au, Au)>,
}

impl FloatDamage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    pub fn intervals(&self) -> &[(Au, Au)] {
        &self.intervals
    }

    /// Adds `begin..=end`, merging it with every range it touches.
    pub fn include(&mut self, begin: Au, end: Au) {
        debug_assert!(begin <= end, "inverted damage interval");
        let first = self.intervals.partition_point(|&(_, e)| e < begin);
        let last = first +
            self.intervals[first..].partition_point(|&(b, _)| b <= end);

        let mut merged = (begin, end);
        if first < last {
            merged.0 = merged.0.min(self.intervals[first].0);
            merged.1 = merged.1.max(self.intervals[last - 1].1);
        }
        self.intervals.splice(first..last, std::iter::once(merged));
    }

    /// Whether any damaged range overlaps `begin..=end`.
    pub fn intersects(&self, begin: Au, end: Au) -> bool {
        self.intervals
            .iter()
            .take_while(|&&(b, _)| b <= end)
            .any(|&(_, e)| e >= begin)
    }
}
