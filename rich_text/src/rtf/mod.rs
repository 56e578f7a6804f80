// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document persistence in a subset of the Rich Text Format.
//!
//! [`to_rtf`] writes every run as its own group carrying the run's font, size, bold and italic
//! flags, color, underline and paragraph alignment and spacing. [`from_rtf`] reads that subset
//! back, along with the common constructs of RTF written by other applications (hex escapes,
//! Unicode escapes with fallback text, ignorable destinations, document-level default fonts).
//!
//! Faces that `\b` and `\i` cannot describe (a named member, an oblique style, a weight other
//! than regular or bold) get an ignorable `{\*\fface\fweightN\fslantN member}` group in their
//! font table entry. Readers that do not know the group skip it and see the family name.
//!
//! Reading a document written by [`to_rtf`] yields the same text and runs, except that colors
//! are stored without alpha and weights are rounded to whole numbers.

mod reader;
mod writer;

pub use reader::from_rtf;
pub use writer::to_rtf;

/// Paragraph alignment control words, in [`Alignment`](crate::Alignment) order.
const ALIGNMENT_WORDS: [(crate::Alignment, &str); 5] = [
    (crate::Alignment::Left, "ql"),
    (crate::Alignment::Right, "qr"),
    (crate::Alignment::Center, "qc"),
    (crate::Alignment::Justified, "qj"),
    (crate::Alignment::Natural, "qnatural"),
];

/// `\fslant` values of the font face group.
const SLANTS: [(crate::FontStyle, i32); 3] = [
    (crate::FontStyle::Normal, 0),
    (crate::FontStyle::Italic, 1),
    (crate::FontStyle::Oblique, 2),
];

/// Twentieths of a point per point.
const TWIPS_PER_POINT: f32 = 20.0;

/// The font size used when a document names a font but no size.
const DEFAULT_FONT_SIZE: f32 = 12.0;
