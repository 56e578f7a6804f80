// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::ops::Range;

/// The text owned by a [`RunStore`].
///
/// Positions are UTF-8 byte offsets. [`char_count`](Self::char_count) reports the length in
/// Unicode scalar values for callers that present character counts.
///
/// [`RunStore`]: crate::RunStore
pub trait TextStorage {
    /// The length of the text, in bytes.
    fn len(&self) -> usize;

    /// Return `true` if the text is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of Unicode scalar values in the text.
    fn char_count(&self) -> usize;

    /// Return whether `index` is a UTF-8 character boundary in the text.
    fn is_char_boundary(&self, index: usize) -> bool;
}

/// Text storage that can be edited in place.
///
/// Only editable storage supports [`Batch::replace`](crate::Batch::replace).
pub trait EditableText: TextStorage {
    /// Replaces the bytes in `range` with `with`.
    ///
    /// The caller guarantees that `range` is valid for the text and on character boundaries.
    fn replace_range(&mut self, range: Range<usize>, with: &str);
}

impl TextStorage for String {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn char_count(&self) -> usize {
        self.chars().count()
    }

    fn is_char_boundary(&self, index: usize) -> bool {
        self.as_str().is_char_boundary(index)
    }
}

impl EditableText for String {
    fn replace_range(&mut self, range: Range<usize>, with: &str) {
        Self::replace_range(self, range, with);
    }
}
