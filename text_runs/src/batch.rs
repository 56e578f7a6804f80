// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use core::ops::Range;

use crate::{Attributes, EditableText, Error, RunStore, TextRange, TextStorage};

/// A scoped, transactional group of mutations on a [`RunStore`].
///
/// Created by [`RunStore::begin_batch`]. While a batch is open the runs may be split at write
/// boundaries and temporarily non-maximal; [`Batch::end`] (or dropping the batch) coalesces
/// them again. The batch holds the only borrow of the store, so partially applied edits are
/// never visible to other readers.
///
/// Each call is all-or-nothing: a call that fails validation leaves the store as it was, while
/// writes from earlier successful calls in the same batch are kept.
#[derive(Debug)]
pub struct Batch<'a, T: Debug + TextStorage, A: Attributes> {
    store: &'a mut RunStore<T, A>,
    dirty: Option<Range<usize>>,
    finished: bool,
}

/// What a finished [`Batch`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    dirty: Option<Range<usize>>,
}

impl BatchSummary {
    /// Returns `true` if any write changed the text or its attributes.
    pub fn changed(&self) -> bool {
        self.dirty.is_some()
    }

    /// The smallest range covering every change, in post-batch coordinates.
    ///
    /// For a pure deletion this is the empty range at the deletion point.
    pub fn dirty_range(&self) -> Option<Range<usize>> {
        self.dirty.clone()
    }
}

impl<'a, T: Debug + TextStorage, A: Attributes> Batch<'a, T, A> {
    pub(crate) fn new(store: &'a mut RunStore<T, A>) -> Self {
        Self {
            store,
            dirty: None,
            finished: false,
        }
    }

    /// The length of the text as of the writes made so far.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the text is currently empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the attributes at `position`, including writes made earlier in this batch.
    pub fn attributes_at(&self, position: usize) -> Result<&A, Error> {
        self.store.attributes_at(position)
    }

    /// Merges `delta` into every run overlapping `range`.
    ///
    /// Runs straddling the range edges are split so that exactly `range` is written.
    /// Zero-length ranges are skipped. Returns `true` if anything changed.
    pub fn mutate(&mut self, range: Range<usize>, delta: &A) -> Result<bool, Error> {
        let range = TextRange::new(&self.store.text, range)?;
        if range.is_empty() {
            return Ok(false);
        }

        let first = self.store.split_at(range.start());
        let last = self.store.split_at(range.end());
        let mut changed = false;
        for run in &mut self.store.runs[first..last] {
            changed |= run.attributes.merge(delta);
        }
        if changed {
            self.mark_dirty(range.as_range());
        }
        Ok(changed)
    }

    fn mark_dirty(&mut self, range: Range<usize>) {
        self.dirty = Some(match self.dirty.take() {
            Some(dirty) => dirty.start.min(range.start)..dirty.end.max(range.end),
            None => range,
        });
    }

    /// Ends the batch, coalescing runs and reporting what changed.
    pub fn end(mut self) -> BatchSummary {
        self.finish()
    }

    fn finish(&mut self) -> BatchSummary {
        self.finished = true;
        self.store.normalize();
        if self.dirty.is_some() {
            self.store.generation += 1;
        }
        log::trace!(
            "batch ended: dirty {:?}, {} runs",
            self.dirty,
            self.store.runs.len()
        );
        BatchSummary {
            dirty: self.dirty.take(),
        }
    }
}

impl<T: Debug + EditableText, A: Attributes> Batch<'_, T, A> {
    /// Replaces the text in `range` with `text`, giving the new text `attributes`.
    ///
    /// Runs after the range shift by the change in length. Replacing an empty range inserts;
    /// replacing with an empty string deletes.
    pub fn replace(&mut self, range: Range<usize>, text: &str, attributes: A) -> Result<(), Error> {
        let range = TextRange::new(&self.store.text, range)?;
        if range.is_empty() && text.is_empty() {
            return Ok(());
        }

        let first = self.store.split_at(range.start());
        let last = self.store.split_at(range.end());
        self.store.runs.drain(first..last);

        let start = range.start();
        let inserted_end = start + text.len();
        for run in &mut self.store.runs[first..] {
            run.range.start = run.range.start - range.end() + inserted_end;
            run.range.end = run.range.end - range.end() + inserted_end;
        }
        if !text.is_empty() {
            self.store
                .runs
                .insert(first, crate::Run::new(start..inserted_end, attributes));
        }
        self.store.text.replace_range(range.as_range(), text);

        // Shift a previously recorded dirty span that extends past the edit.
        if let Some(dirty) = self.dirty.as_mut() {
            if dirty.end > start {
                dirty.end = (dirty.end.max(range.end()) - range.end() + inserted_end).max(start);
            }
        }
        self.mark_dirty(start..inserted_end);
        Ok(())
    }
}

impl<T: Debug + TextStorage, A: Attributes> Drop for Batch<'_, T, A> {
    fn drop(&mut self) {
        if !self.finished {
            self.finish();
        }
    }
}
