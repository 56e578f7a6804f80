// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Horizontal alignment of the lines of a paragraph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Align content to the left edge.
    #[default]
    Left,
    /// Align content to the right edge.
    Right,
    /// Center each line.
    Center,
    /// Justify each line by spacing out content, except for the last line.
    Justified,
    /// Left for left-to-right text and right for right-to-left text.
    Natural,
}

/// Paragraph-level formatting carried on characters.
///
/// As with character attributes, the value is stored per run; a paragraph whose characters
/// disagree takes its layout from its first character.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphStyle {
    /// Line alignment.
    pub alignment: Alignment,
    /// Extra space after the paragraph, in points.
    pub spacing_after: f32,
}

impl ParagraphStyle {
    /// Creates a left-aligned style with no extra spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this style with `alignment`.
    #[must_use]
    pub fn with_alignment(&self, alignment: Alignment) -> Self {
        Self {
            alignment,
            ..self.clone()
        }
    }

    /// Returns a copy of this style with `spacing_after` points after the paragraph.
    #[must_use]
    pub fn with_spacing_after(&self, spacing_after: f32) -> Self {
        Self {
            spacing_after,
            ..self.clone()
        }
    }
}
