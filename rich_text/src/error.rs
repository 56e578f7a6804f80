// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

/// Error type for attribute engine operations.
///
/// Every error is recoverable at the operation boundary: a failed change leaves the document and
/// the typing attributes in their last consistent state.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    repr: Repr,
}

#[derive(Debug, Clone, PartialEq)]
enum Repr {
    Store(text_runs::Error),
    Font {
        family: Arc<str>,
        member: Option<Arc<str>>,
    },
    MissingFont,
    FontSize(f32),
    Deserialization {
        offset: usize,
        reason: &'static str,
    },
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The underlying run store error, for store-level failures.
    pub fn store_error(&self) -> Option<&text_runs::Error> {
        match &self.repr {
            Repr::Store(err) => Some(err),
            _ => None,
        }
    }

    /// The family that could not be resolved, for [`ErrorKind::UnresolvableFont`].
    pub fn font_family(&self) -> Option<&str> {
        match &self.repr {
            Repr::Font { family, .. } => Some(family),
            _ => None,
        }
    }

    /// The member identifier that could not be resolved, if the request named one.
    pub fn font_member(&self) -> Option<&str> {
        match &self.repr {
            Repr::Font { member, .. } => member.as_deref(),
            _ => None,
        }
    }

    /// The byte offset in the input where deserialization failed.
    pub fn offset(&self) -> Option<usize> {
        match &self.repr {
            Repr::Deserialization { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub(crate) fn unresolvable_font(family: &str, member: Option<&str>) -> Self {
        Self {
            kind: ErrorKind::UnresolvableFont,
            repr: Repr::Font {
                family: Arc::from(family),
                member: member.map(Arc::from),
            },
        }
    }

    pub(crate) fn missing_font() -> Self {
        Self {
            kind: ErrorKind::MissingFont,
            repr: Repr::MissingFont,
        }
    }

    pub(crate) fn invalid_font_size(size: f32) -> Self {
        Self {
            kind: ErrorKind::InvalidFontSize,
            repr: Repr::FontSize(size),
        }
    }

    pub(crate) fn deserialization(offset: usize, reason: &'static str) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            repr: Repr::Deserialization { offset, reason },
        }
    }
}

impl From<text_runs::Error> for Error {
    fn from(err: text_runs::Error) -> Self {
        let kind = match err.kind() {
            text_runs::ErrorKind::OutOfBounds => ErrorKind::OutOfBounds,
            text_runs::ErrorKind::InvalidRuns => ErrorKind::InvalidRuns,
            _ => ErrorKind::InvalidRange,
        };
        Self {
            kind,
            repr: Repr::Store(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Store(err) => fmt::Display::fmt(err, f),
            Repr::Font {
                family,
                member: Some(member),
            } => write!(f, "no font for member {member:?} of family {family:?}"),
            Repr::Font {
                family,
                member: None,
            } => write!(f, "no font for family {family:?}"),
            Repr::MissingFont => f.write_str("no current font to convert"),
            Repr::FontSize(size) => write!(f, "font size {size} is not a positive finite number"),
            Repr::Deserialization { offset, reason } => {
                write!(f, "malformed RTF at byte {offset}: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.repr {
            Repr::Store(err) => Some(err),
            _ => None,
        }
    }
}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A position lookup at or past the end of the text.
    OutOfBounds,

    /// A range had `start > end`, ended past the text, or split a character.
    ///
    /// [`Error::store_error`] carries the [`RangeFault`](text_runs::RangeFault).
    InvalidRange,

    /// A `(text, runs)` snapshot did not partition the text.
    InvalidRuns,

    /// The font catalog could not produce the requested font.
    UnresolvableFont,

    /// A font operation was requested but the typing attributes carry no font.
    MissingFont,

    /// A requested point size was zero, NaN or infinite.
    InvalidFontSize,

    /// A serialized document could not be parsed.
    Deserialization,
}
