// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// An 8-bit per channel sRGB color with alpha.
///
/// This is the resolution the interchange format stores. Convert to and from
/// [`peniko::Color`] at rendering boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, `255` being opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black, the default foreground color.
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);

    /// Creates an opaque color.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with alpha.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let rgba8 = color.to_rgba8();
        Self::from_rgba8(rgba8.r, rgba8.g, rgba8.b, rgba8.a)
    }
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        Self::from_rgba8(color.r, color.g, color.b, color.a)
    }
}
