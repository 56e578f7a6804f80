// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

use crate::TextStorage;

/// Error type for run store operations.
///
/// Every error records the range (or position) the caller asked for and the text length at the
/// time of failure. Range errors also say what was wrong with the range, see [`Error::fault`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    range: Range<usize>,
    text_len: usize,
    fault: Option<RangeFault>,
}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A range was reversed, ended past the text, or split a character.
    InvalidRange,

    /// A position lookup at or past the end of the text.
    OutOfBounds,

    /// A run snapshot did not partition the text (gap, overlap, empty run or short coverage).
    InvalidRuns,
}

/// What made a range invalid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeFault {
    /// `start > end`.
    Reversed,

    /// `end` lies past the end of the text.
    PastEnd,

    /// An endpoint falls inside the UTF-8 encoding of a character.
    SplitsChar {
        /// The offending byte index.
        index: usize,
        /// The byte span of the character containing `index`.
        char_span: (usize, usize),
    },
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The range provided by the caller.
    ///
    /// For a failed position lookup this is `position..position + 1`.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The length in bytes of the text at the time of the error.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Why the range was rejected, for [`ErrorKind::InvalidRange`].
    pub fn fault(&self) -> Option<RangeFault> {
        self.fault
    }

    pub(crate) fn reversed(range: &Range<usize>, text_len: usize) -> Self {
        Self::invalid_range(range, text_len, RangeFault::Reversed)
    }

    pub(crate) fn past_end(range: &Range<usize>, text_len: usize) -> Self {
        Self::invalid_range(range, text_len, RangeFault::PastEnd)
    }

    pub(crate) fn splits_char<T: TextStorage>(
        text: &T,
        range: &Range<usize>,
        index: usize,
    ) -> Self {
        let fault = RangeFault::SplitsChar {
            index,
            char_span: char_span(text, index),
        };
        Self::invalid_range(range, text.len(), fault)
    }

    pub(crate) fn position_out_of_bounds(position: usize, text_len: usize) -> Self {
        Self {
            kind: ErrorKind::OutOfBounds,
            range: position..position.saturating_add(1),
            text_len,
            fault: None,
        }
    }

    pub(crate) fn invalid_runs(range: Range<usize>, text_len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRuns,
            range,
            text_len,
            fault: None,
        }
    }

    fn invalid_range(range: &Range<usize>, text_len: usize, fault: RangeFault) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            range: range.clone(),
            text_len,
            fault: Some(fault),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Range { start, end } = self.range;
        let len = self.text_len;
        match (self.kind, self.fault) {
            (ErrorKind::OutOfBounds, _) => {
                write!(f, "position {start} out of bounds for len {len}")
            }
            (ErrorKind::InvalidRuns, _) => {
                write!(f, "run {start}..{end} does not continue a partition of len {len}")
            }
            (_, Some(RangeFault::Reversed)) => {
                write!(f, "invalid range {start}..{end}: start > end")
            }
            (_, Some(RangeFault::SplitsChar { index, char_span })) => write!(
                f,
                "invalid range {start}..{end}: index {index} splits char {}..{}",
                char_span.0, char_span.1
            ),
            (_, _) => write!(f, "invalid range {start}..{end}: ends past len {len}"),
        }
    }
}

impl core::error::Error for Error {}

/// The character boundaries on either side of `index`.
fn char_span<T: TextStorage>(text: &T, index: usize) -> (usize, usize) {
    let len = text.len();
    let start = (0..index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    let end = (index + 1..=len)
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(len);
    (start, end)
}
