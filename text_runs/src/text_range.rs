// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Error, TextStorage};

/// A validated byte range into a UTF-8 text buffer.
///
/// Invariants:
///
/// - `start <= end`
/// - `end` is within the text bounds (a range ending past the text is an invalid range)
/// - `start` and `end` lie on UTF-8 codepoint boundaries
///
/// A `TextRange` does not remember which text it was validated against. Reuse it only with the
/// same text content.
///
/// ## Example
///
/// ```
/// use text_runs::TextRange;
///
/// let text = String::from("Hello!");
/// let range = TextRange::new(&text, 0..5).unwrap();
/// assert_eq!(range.len(), 5);
/// assert!(TextRange::new(&text, 0..7).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Returns a validated `TextRange` for the provided text.
    #[inline]
    pub fn new<T: TextStorage>(text: &T, range: Range<usize>) -> Result<Self, Error> {
        validate_range(text, &range)?;
        Ok(Self {
            start: range.start,
            end: range.end,
        })
    }

    /// Creates a `TextRange` without validation.
    #[must_use]
    #[inline]
    pub const fn new_unchecked(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a zero-length range (a caret) at `position`, without validation.
    #[must_use]
    #[inline]
    pub const fn caret(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// The start byte offset.
    #[must_use]
    #[inline]
    pub const fn start(self) -> usize {
        self.start
    }

    /// The end byte offset (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(self) -> usize {
        self.end
    }

    /// The length of the range in bytes.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-length range.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns this range as a `Range<usize>`.
    #[must_use]
    #[inline]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

#[inline]
pub(crate) fn validate_range<T: TextStorage>(text: &T, range: &Range<usize>) -> Result<(), Error> {
    let text_len = text.len();
    if range.start > range.end {
        return Err(Error::reversed(range, text_len));
    }
    if range.end > text_len {
        return Err(Error::past_end(range, text_len));
    }
    for index in [range.start, range.end] {
        if !text.is_char_boundary(index) {
            return Err(Error::splits_char(text, range, index));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{TextRange, validate_range};
    use crate::{ErrorKind, RangeFault};
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn validates_ok_ranges() {
        let t = String::from("Hello!");
        assert!(validate_range(&t, &(0..0)).is_ok());
        assert!(validate_range(&t, &(6..6)).is_ok());
        assert!(TextRange::new(&t, 1..3).is_ok());
    }

    #[test]
    #[expect(
        clippy::reversed_empty_ranges,
        reason = "We want an invalid range for testing."
    )]
    fn rejects_start_greater_than_end() {
        let t = String::from("Hello!");
        let err = TextRange::new(&t, 4..3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(err.fault(), Some(RangeFault::Reversed));
        assert_eq!(err.range(), 4..3);
        assert_eq!(err.text_len(), 6);
        let msg = format!("{err}");
        assert!(msg.contains("start > end"), "unexpected message {msg}");
    }

    #[test]
    fn rejects_end_past_text() {
        let t = String::from("Hello!");
        let err = TextRange::new(&t, 0..7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(err.fault(), Some(RangeFault::PastEnd));
        assert_eq!(err.range(), 0..7);
        let msg = format!("{err}");
        assert!(msg.contains("len 6"), "unexpected message {msg}");

        let err = TextRange::new(&t, 7..9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn rejects_split_characters() {
        // "é" is 2 bytes in UTF-8; index 1 is not a boundary.
        let t = String::from("\u{e9}clair\u{1f600}");
        let err = TextRange::new(&t, 1..2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(
            err.fault(),
            Some(RangeFault::SplitsChar {
                index: 1,
                char_span: (0, 2)
            })
        );

        let err = TextRange::new(&t, 0..9).unwrap_err();
        assert_eq!(
            err.fault(),
            Some(RangeFault::SplitsChar {
                index: 9,
                char_span: (7, 11)
            })
        );
        assert!(format!("{err}").contains("splits char 7..11"));
    }

    #[test]
    fn caret_is_empty() {
        let caret = TextRange::caret(3);
        assert!(caret.is_empty());
        assert_eq!(caret.as_range(), 3..3);
    }
}
