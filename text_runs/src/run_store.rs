// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use crate::{Attributes, Batch, BatchSummary, Error, TextRange, TextStorage};

/// A maximal span of text sharing one attribute set.
#[derive(Clone, Debug, PartialEq)]
pub struct Run<A> {
    /// The byte range covered by this run.
    pub range: Range<usize>,
    /// The attributes shared by every byte in the range.
    pub attributes: A,
}

impl<A> Run<A> {
    /// Creates a run.
    pub fn new(range: Range<usize>, attributes: A) -> Self {
        Self { range, attributes }
    }
}

/// A block of text with a run-length encoded attribute partition.
///
/// Outside of a [`Batch`], the runs always:
///
/// - cover `0..len` in order, with no gaps and no overlaps,
/// - are non-empty (an empty text has no runs),
/// - are maximal: neighbouring runs have different attributes.
#[derive(Clone, Debug)]
pub struct RunStore<T: Debug + TextStorage, A: Attributes> {
    pub(crate) text: T,
    pub(crate) runs: Vec<Run<A>>,
    pub(crate) generation: u64,
}

impl<T: Debug + TextStorage, A: Attributes> RunStore<T, A> {
    /// Creates a store with a single run carrying `attributes` over the whole text.
    pub fn new(text: T, attributes: A) -> Self {
        let len = text.len();
        let runs = if len == 0 {
            Vec::new()
        } else {
            alloc::vec![Run::new(0..len, attributes)]
        };
        Self {
            text,
            runs,
            generation: 0,
        }
    }

    /// Creates a store from a `(text, runs)` snapshot.
    ///
    /// The runs must partition the text in order and lie on character boundaries. Neighbouring
    /// runs with equal attributes are coalesced.
    pub fn from_runs(text: T, runs: impl IntoIterator<Item = Run<A>>) -> Result<Self, Error> {
        let len = text.len();
        let mut cursor = 0;
        let mut collected = Vec::new();
        for run in runs {
            let Range { start, end } = run.range;
            if start != cursor || start >= end || end > len {
                return Err(Error::invalid_runs(start..end, len));
            }
            TextRange::new(&text, start..end)?;
            cursor = end;
            collected.push(run);
        }
        if cursor != len {
            return Err(Error::invalid_runs(cursor..len, len));
        }
        let mut store = Self {
            text,
            runs: collected,
            generation: 0,
        };
        store.normalize();
        Ok(store)
    }

    /// Borrow the underlying text storage.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Returns the length of the underlying text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns the length of the underlying text, in Unicode scalar values.
    ///
    /// This is the character count shown to users. Positions passed to the store remain byte
    /// offsets.
    pub fn char_len(&self) -> usize {
        self.text.char_count()
    }

    /// Returns `true` if the underlying text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Borrow the underlying text as `&str` when the storage is contiguous.
    pub fn as_str(&self) -> &str
    where
        T: AsRef<str>,
    {
        self.text.as_ref()
    }

    /// The runs, in text order.
    pub fn runs(&self) -> &[Run<A>] {
        &self.runs
    }

    /// Returns the number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// A counter bumped once for every batch that changed the text or its attributes.
    ///
    /// Observers can compare generations instead of subscribing to per-write notifications.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the attributes of the run containing `position`.
    ///
    /// Fails with [`ErrorKind::OutOfBounds`](crate::ErrorKind::OutOfBounds) when
    /// `position >= len`.
    pub fn attributes_at(&self, position: usize) -> Result<&A, Error> {
        self.run_at(position).map(|run| &run.attributes)
    }

    /// Returns the run containing `position`.
    pub fn run_at(&self, position: usize) -> Result<&Run<A>, Error> {
        self.run_index_at(position)
            .map(|ix| &self.runs[ix])
            .ok_or_else(|| Error::position_out_of_bounds(position, self.len()))
    }

    /// Iterate over the runs overlapping `range`.
    ///
    /// A zero-length range overlaps nothing.
    pub fn runs_in(&self, range: Range<usize>) -> impl Iterator<Item = &Run<A>> + '_ {
        let first = if range.is_empty() {
            self.runs.len()
        } else {
            self.runs.partition_point(|run| run.range.end <= range.start)
        };
        self.runs[first..]
            .iter()
            .take_while(move |run| run.range.start < range.end)
    }

    /// Opens a batch of mutations.
    ///
    /// The batch re-normalizes the runs when it ends (or is dropped).
    pub fn begin_batch(&mut self) -> Batch<'_, T, A> {
        Batch::new(self)
    }

    /// Merges `delta` into `range` as a batch of one.
    pub fn mutate(&mut self, range: Range<usize>, delta: &A) -> Result<BatchSummary, Error> {
        let mut batch = self.begin_batch();
        batch.mutate(range, delta)?;
        Ok(batch.end())
    }

    /// Consumes the store, returning the text and its runs.
    pub fn into_parts(self) -> (T, Vec<Run<A>>) {
        (self.text, self.runs)
    }

    pub(crate) fn run_index_at(&self, position: usize) -> Option<usize> {
        let ix = self.runs.partition_point(|run| run.range.end <= position);
        self.runs
            .get(ix)
            .filter(|run| run.range.start <= position)
            .map(|_| ix)
    }

    /// Ensures a run boundary at `position`, returning the index of the run starting there
    /// (or `runs.len()` at the end of the text).
    pub(crate) fn split_at(&mut self, position: usize) -> usize {
        let ix = self.runs.partition_point(|run| run.range.end <= position);
        let Some(run) = self.runs.get_mut(ix) else {
            return ix;
        };
        if run.range.start >= position {
            return ix;
        }
        let tail = Run::new(position..run.range.end, run.attributes.clone());
        run.range.end = position;
        self.runs.insert(ix + 1, tail);
        ix + 1
    }

    /// Drops empty runs and coalesces equal neighbours.
    pub(crate) fn normalize(&mut self) {
        self.runs.retain(|run| !run.range.is_empty());
        self.runs.dedup_by(|next, prev| {
            if prev.range.end == next.range.start && prev.attributes == next.attributes {
                prev.range.end = next.range.end;
                true
            } else {
                false
            }
        });
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut cursor = 0;
        for (ix, run) in self.runs.iter().enumerate() {
            assert_eq!(run.range.start, cursor, "gap or overlap before run {ix}");
            assert!(run.range.start < run.range.end, "empty run {ix}");
            if ix > 0 {
                assert_ne!(
                    self.runs[ix - 1].attributes,
                    run.attributes,
                    "runs {} and {ix} should have been coalesced",
                    ix - 1
                );
            }
            cursor = run.range.end;
        }
        assert_eq!(cursor, self.len(), "runs must cover the text");
    }
}

#[cfg(test)]
mod tests {
    use crate::{Attributes, ErrorKind, RangeFault, Run, RunStore};
    use alloc::string::String;
    use alloc::vec::Vec;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Style {
        size: Option<u32>,
        bold: Option<bool>,
    }

    impl Attributes for Style {
        fn merge(&mut self, delta: &Self) -> bool {
            let before = self.clone();
            if delta.size.is_some() {
                self.size = delta.size;
            }
            if delta.bold.is_some() {
                self.bold = delta.bold;
            }
            *self != before
        }
    }

    fn size(size: u32) -> Style {
        Style {
            size: Some(size),
            bold: None,
        }
    }

    fn ranges(store: &RunStore<String, Style>) -> Vec<core::ops::Range<usize>> {
        store.runs().iter().map(|run| run.range.clone()).collect()
    }

    #[test]
    fn empty_text_has_no_runs() {
        let store = RunStore::new(String::new(), size(12));
        assert_eq!(store.run_count(), 0);
        assert_eq!(store.attributes_at(0).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn attributes_at_finds_containing_run() {
        let mut store = RunStore::new(String::from("Hello World"), size(12));
        store.mutate(0..5, &size(24)).unwrap();

        assert_eq!(store.attributes_at(0).unwrap().size, Some(24));
        assert_eq!(store.attributes_at(4).unwrap().size, Some(24));
        assert_eq!(store.attributes_at(5).unwrap().size, Some(12));
        assert_eq!(store.attributes_at(10).unwrap().size, Some(12));

        let err = store.attributes_at(11).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(err.range(), 11..12);
        assert_eq!(err.text_len(), 11);
        assert_eq!(err.fault(), None);
    }

    #[test]
    fn splitting_in_the_middle_produces_three_runs() {
        let mut store = RunStore::new(String::from("abcdef"), size(12));
        store.mutate(2..4, &size(18)).unwrap();
        assert_eq!(ranges(&store), [0..2, 2..4, 4..6]);
        store.assert_invariants();
    }

    #[test]
    fn runs_in_reports_overlapping_runs() {
        let mut store = RunStore::new(String::from("abcdef"), size(12));
        store.mutate(2..4, &size(18)).unwrap();

        let hit: Vec<_> = store.runs_in(1..3).map(|run| run.range.clone()).collect();
        assert_eq!(hit, [0..2, 2..4]);
        assert_eq!(store.runs_in(3..3).count(), 0);
        assert_eq!(store.runs_in(4..6).count(), 1);
    }

    #[test]
    fn from_runs_coalesces_equal_neighbours() {
        let store = RunStore::from_runs(
            String::from("abcdef"),
            [Run::new(0..3, size(12)), Run::new(3..6, size(12))],
        )
        .unwrap();
        assert_eq!(ranges(&store), [0..6]);
    }

    #[test]
    fn from_runs_rejects_gaps_and_short_coverage() {
        let gap = RunStore::from_runs(
            String::from("abcdef"),
            [Run::new(0..2, size(12)), Run::new(3..6, size(14))],
        )
        .unwrap_err();
        assert_eq!(gap.kind(), ErrorKind::InvalidRuns);
        assert_eq!(gap.range(), 3..6);

        let short =
            RunStore::from_runs(String::from("abcdef"), [Run::new(0..4, size(12))]).unwrap_err();
        assert_eq!(short.kind(), ErrorKind::InvalidRuns);

        let empty_run = RunStore::from_runs(
            String::from("ab"),
            [Run::new(0..0, size(12)), Run::new(0..2, size(12))],
        )
        .unwrap_err();
        assert_eq!(empty_run.kind(), ErrorKind::InvalidRuns);
    }

    #[test]
    fn from_runs_checks_char_boundaries() {
        let err = RunStore::from_runs(
            String::from("\u{e9}t\u{e9}"),
            [Run::new(0..1, size(12)), Run::new(1..5, size(14))],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert!(matches!(err.fault(), Some(RangeFault::SplitsChar { index: 1, .. })));
    }

    #[test]
    fn char_len_counts_scalars() {
        let store = RunStore::new(String::from("caf\u{e9}"), size(12));
        assert_eq!(store.len(), 5);
        assert_eq!(store.char_len(), 4);

        let mut store = RunStore::new(String::from("\u{1f600} ok"), size(12));
        store.mutate(0..4, &size(20)).unwrap();
        assert_eq!(store.char_len(), 4);
        assert_eq!(RunStore::new(String::new(), size(12)).char_len(), 0);
    }

    #[test]
    fn into_parts_returns_snapshot() {
        let mut store = RunStore::new(String::from("abc"), size(12));
        store.mutate(0..1, &size(9)).unwrap();
        let (text, runs) = store.into_parts();
        assert_eq!(text, "abc");
        assert_eq!(runs, [Run::new(0..1, size(9)), Run::new(1..3, size(12))]);
    }
}
