// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

/// Visual weight class of a font, on a scale from 1.0 to 1000.0.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FontWeight(f32);

impl FontWeight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100.0);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300.0);

    /// Weight value of 400. This is the default value.
    pub const NORMAL: Self = Self(400.0);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500.0);

    /// Weight value of 600. The lightest weight reported as bold.
    pub const SEMI_BOLD: Self = Self(600.0);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700.0);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900.0);

    /// Creates a new weight value.
    pub fn new(weight: f32) -> Self {
        Self(weight)
    }

    /// Returns the underlying weight value.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns `true` for weights of 600 and above.
    pub fn is_bold(self) -> bool {
        self >= Self::SEMI_BOLD
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Slant of a font face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// A dedicated italic design.
    Italic,
    /// A slanted version of the upright design.
    Oblique,
}

impl FontStyle {
    /// Returns `true` for italic and oblique faces.
    pub fn is_italic(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// A font value stored in [`TextAttributes`](crate::TextAttributes).
///
/// The `member` is the catalog's identifier for the concrete face (for example
/// `"Helvetica-BoldOblique"`). It acts as the resolvable handle; a font without one names only a
/// family, size and style, and is matched to a face on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    family: Arc<str>,
    member: Option<Arc<str>>,
    size: f32,
    weight: FontWeight,
    style: FontStyle,
}

impl Font {
    /// Creates a regular, upright font in `family` at `size` points.
    pub fn new(family: impl Into<Arc<str>>, size: f32) -> Self {
        Self {
            family: family.into(),
            member: None,
            size,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
        }
    }

    /// Sets the face identifier.
    #[must_use]
    pub fn with_member(mut self, member: impl Into<Arc<str>>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Clears the face identifier.
    #[must_use]
    pub fn without_member(mut self) -> Self {
        self.member = None;
        self
    }

    /// Sets the point size.
    #[must_use]
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Sets the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// The family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The shared family name.
    pub fn family_arc(&self) -> &Arc<str> {
        &self.family
    }

    /// The face identifier, if resolved.
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// The point size.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// The style.
    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Returns `true` if the weight is bold.
    pub fn is_bold(&self) -> bool {
        self.weight.is_bold()
    }

    /// Returns `true` if the style is italic or oblique.
    pub fn is_italic(&self) -> bool {
        self.style.is_italic()
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{} ({}) {}pt", self.family, member, self.size),
            None => write!(f, "{} {}pt", self.family, self.size),
        }
    }
}

/// The decomposed view of a [`Font`] shown by font selection controls.
///
/// Derived from the font and the catalog on every recomputation; never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescriptor {
    /// Family name.
    pub family: Arc<str>,
    /// Face identifier, if the font carries one.
    pub member: Option<Arc<str>>,
    /// Display label of the face (for example `"Bold Oblique"`), if the catalog knows it.
    pub member_label: Option<Arc<str>>,
    /// Point size.
    pub size: f32,
    /// Whether the catalog reports the bold trait.
    pub is_bold: bool,
    /// Whether the catalog reports the italic trait.
    pub is_italic: bool,
}
