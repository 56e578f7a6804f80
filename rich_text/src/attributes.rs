// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Color, Font, ParagraphStyle};

/// The keys a [`TextAttributes`] set can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// [`TextAttributes::font`].
    Font,
    /// [`TextAttributes::foreground_color`].
    ForegroundColor,
    /// [`TextAttributes::paragraph_style`].
    ParagraphStyle,
    /// [`TextAttributes::underline_style`].
    UnderlineStyle,
}

impl AttributeKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Font,
        Self::ForegroundColor,
        Self::ParagraphStyle,
        Self::UnderlineStyle,
    ];
}

/// Underline decoration.
///
/// Underline is an attribute of its own rather than a trait of the font.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnderlineStyle {
    /// Explicitly not underlined.
    None,
    /// A single line.
    Single,
    /// Two lines.
    Double,
}

/// A set of character attributes.
///
/// Each key is optional; an absent key means "unspecified, inherit the default". Used both as
/// the attributes of a run and as a partial delta merged into existing attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextAttributes {
    /// The font, including size and face.
    pub font: Option<Font>,
    /// The text color.
    pub foreground_color: Option<Color>,
    /// Paragraph formatting.
    pub paragraph_style: Option<ParagraphStyle>,
    /// Underline decoration.
    pub underline_style: Option<UnderlineStyle>,
}

impl TextAttributes {
    /// Creates an empty set (every key unspecified).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Sets the foreground color.
    #[must_use]
    pub fn with_foreground_color(mut self, color: Color) -> Self {
        self.foreground_color = Some(color);
        self
    }

    /// Sets the paragraph style.
    #[must_use]
    pub fn with_paragraph_style(mut self, style: ParagraphStyle) -> Self {
        self.paragraph_style = Some(style);
        self
    }

    /// Sets the underline style.
    #[must_use]
    pub fn with_underline_style(mut self, style: UnderlineStyle) -> Self {
        self.underline_style = Some(style);
        self
    }

    /// Returns `true` if `key` is specified.
    pub fn contains(&self, key: AttributeKey) -> bool {
        match key {
            AttributeKey::Font => self.font.is_some(),
            AttributeKey::ForegroundColor => self.foreground_color.is_some(),
            AttributeKey::ParagraphStyle => self.paragraph_style.is_some(),
            AttributeKey::UnderlineStyle => self.underline_style.is_some(),
        }
    }

    /// Clears `key`, returning `true` if it was specified.
    pub fn remove(&mut self, key: AttributeKey) -> bool {
        let had = self.contains(key);
        match key {
            AttributeKey::Font => self.font = None,
            AttributeKey::ForegroundColor => self.foreground_color = None,
            AttributeKey::ParagraphStyle => self.paragraph_style = None,
            AttributeKey::UnderlineStyle => self.underline_style = None,
        }
        had
    }

    /// The specified keys.
    pub fn keys(&self) -> impl Iterator<Item = AttributeKey> + '_ {
        AttributeKey::ALL
            .into_iter()
            .filter(move |key| self.contains(*key))
    }

    /// Returns `true` if no key is specified.
    pub fn is_empty(&self) -> bool {
        self.keys().next().is_none()
    }
}

fn overwrite<T: Clone + PartialEq>(slot: &mut Option<T>, value: &Option<T>) -> bool {
    match value {
        Some(value) if slot.as_ref() != Some(value) => {
            *slot = Some(value.clone());
            true
        }
        _ => false,
    }
}

impl text_runs::Attributes for TextAttributes {
    fn merge(&mut self, delta: &Self) -> bool {
        let mut changed = overwrite(&mut self.font, &delta.font);
        changed |= overwrite(&mut self.foreground_color, &delta.foreground_color);
        changed |= overwrite(&mut self.paragraph_style, &delta.paragraph_style);
        changed |= overwrite(&mut self.underline_style, &delta.underline_style);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeKey, TextAttributes, UnderlineStyle};
    use crate::{Alignment, Color, Font, ParagraphStyle};
    use text_runs::Attributes;

    #[test]
    fn merge_overwrites_only_present_keys() {
        let mut attrs = TextAttributes::new()
            .with_font(Font::new("Helvetica", 12.0))
            .with_foreground_color(Color::BLACK);
        let delta = TextAttributes::new().with_underline_style(UnderlineStyle::Single);

        assert!(attrs.merge(&delta));
        assert_eq!(attrs.font, Some(Font::new("Helvetica", 12.0)));
        assert_eq!(attrs.foreground_color, Some(Color::BLACK));
        assert_eq!(attrs.underline_style, Some(UnderlineStyle::Single));

        assert!(!attrs.merge(&delta), "merging twice changes nothing");
        assert!(!attrs.merge(&TextAttributes::new()));
    }

    #[test]
    fn later_values_win() {
        let mut attrs = TextAttributes::new().with_paragraph_style(ParagraphStyle::new());
        let delta = TextAttributes::new()
            .with_paragraph_style(ParagraphStyle::new().with_alignment(Alignment::Center));
        assert!(attrs.merge(&delta));
        assert_eq!(
            attrs.paragraph_style.map(|style| style.alignment),
            Some(Alignment::Center)
        );
    }

    #[test]
    fn keys_and_remove() {
        let mut attrs = TextAttributes::new()
            .with_foreground_color(Color::WHITE)
            .with_underline_style(UnderlineStyle::None);
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(
            keys,
            [AttributeKey::ForegroundColor, AttributeKey::UnderlineStyle]
        );

        assert!(attrs.remove(AttributeKey::ForegroundColor));
        assert!(!attrs.remove(AttributeKey::Font));
        assert!(!attrs.contains(AttributeKey::ForegroundColor));
        attrs.remove(AttributeKey::UnderlineStyle);
        assert!(attrs.is_empty());
    }
}
