// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::ops::Range;

use smallvec::{SmallVec, smallvec};

/// The ranges selected by one editing gesture.
///
/// Ranges are kept sorted, disjoint and non-adjacent: overlapping or touching ranges are
/// coalesced on construction, and a caret inside or at the edge of a selected range is absorbed
/// by it. A selection always holds at least one range; a collapsed selection holds only carets.
///
/// Positions are byte offsets. They are validated against the text when the selection is
/// applied, not when it is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    ranges: SmallVec<[Range<usize>; 1]>,
}

impl Selection {
    /// A collapsed selection at `position`.
    pub fn caret(position: usize) -> Self {
        Self {
            ranges: smallvec![position..position],
        }
    }

    /// A selection of one range.
    ///
    /// A reversed range (as produced by selecting backwards) is flipped.
    pub fn single(range: Range<usize>) -> Self {
        Self {
            ranges: smallvec![ordered(range)],
        }
    }

    /// A selection of any number of ranges, normalized.
    ///
    /// An empty input yields a caret at the start of the text.
    pub fn new(ranges: impl IntoIterator<Item = Range<usize>>) -> Self {
        let mut ranges: SmallVec<[Range<usize>; 1]> = ranges.into_iter().map(ordered).collect();
        if ranges.is_empty() {
            return Self::caret(0);
        }
        ranges.sort_unstable_by_key(|range| (range.start, range.end));
        let mut merged: SmallVec<[Range<usize>; 1]> = SmallVec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if range.start <= last.end => {
                    last.end = last.end.max(range.end);
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    /// All ranges, in text order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// The ranges that select at least one byte.
    pub fn non_empty_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.ranges
            .iter()
            .filter(|range| !range.is_empty())
            .cloned()
    }

    /// Returns `true` if no range selects any text.
    pub fn is_collapsed(&self) -> bool {
        self.ranges.iter().all(|range| range.is_empty())
    }

    /// The insertion point: the end of the last range.
    pub fn caret_position(&self) -> usize {
        self.ranges.last().map_or(0, |range| range.end)
    }

    /// The position whose preceding byte supplies the typing attributes.
    ///
    /// This is the caret of a collapsed selection, and one past the start of the first selected
    /// range otherwise, so that the first selected character is the one consulted.
    pub fn typing_position(&self) -> usize {
        match self.non_empty_ranges().next() {
            Some(range) => range.start + 1,
            None => self.caret_position(),
        }
    }

    /// Shifts the selection to a caret at `position`.
    pub fn collapse_to(&mut self, position: usize) {
        self.ranges = smallvec![position..position];
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::caret(0)
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::single(range)
    }
}

fn ordered(range: Range<usize>) -> Range<usize> {
    if range.start <= range.end {
        range
    } else {
        range.end..range.start
    }
}
