// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font catalog capability.
//!
//! The engine never talks to a platform font manager directly. Everything it needs (family
//! enumeration, member lookup, conversions between faces) goes through a [`FontCatalog`]
//! passed to [`TypingState::new`](crate::TypingState::new).

mod matching;
mod memory;

pub use matching::match_member;
pub use memory::MemoryCatalog;

use std::sync::Arc;

use smallvec::SmallVec;

use crate::{Error, Font, FontStyle, FontWeight};

/// The faces of one family, in catalog order.
pub type Members = SmallVec<[FontMember; 4]>;

/// One face of a font family.
#[derive(Clone, Debug, PartialEq)]
pub struct FontMember {
    /// Catalog identifier of the face, for example `"Helvetica-BoldOblique"`.
    pub id: Arc<str>,
    /// Display label, for example `"Bold Oblique"`.
    pub label: Arc<str>,
    /// Weight of the face.
    pub weight: FontWeight,
    /// Style of the face.
    pub style: FontStyle,
}

impl FontMember {
    /// Creates a member description.
    pub fn new(
        id: impl Into<Arc<str>>,
        label: impl Into<Arc<str>>,
        weight: FontWeight,
        style: FontStyle,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight,
            style,
        }
    }

    /// Creates a [`Font`] for this face.
    pub fn instantiate(&self, family: impl Into<Arc<str>>, size: f32) -> Font {
        Font::new(family, size)
            .with_member(self.id.clone())
            .with_weight(self.weight)
            .with_style(self.style)
    }
}

/// A font trait that can be added or removed by conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontTrait {
    /// Weight of 600 or more.
    Bold,
    /// Italic or oblique style.
    Italic,
}

/// Enumerates, resolves and converts fonts.
///
/// Only [`list_families`](Self::list_families) and [`members_of`](Self::members_of) are
/// required. The conversions default to closest-match selection among a family's members
/// with [`match_member`].
pub trait FontCatalog {
    /// All family names, in display order.
    fn list_families(&self) -> Vec<Arc<str>>;

    /// The members of `family`, or `None` if the family is unknown.
    fn members_of(&self, family: &str) -> Option<Members>;

    /// Resolves the face `member` of `family` at `size` points.
    fn resolve_font(&self, family: &str, member: &str, size: f32) -> Result<Font, Error> {
        let members = self
            .members_of(family)
            .ok_or_else(|| Error::unresolvable_font(family, Some(member)))?;
        members
            .iter()
            .find(|candidate| &*candidate.id == member)
            .map(|found| found.instantiate(family, size))
            .ok_or_else(|| Error::unresolvable_font(family, Some(member)))
    }

    /// Converts `font` to the closest matching face of `family`, keeping its size.
    fn convert_to_family(&self, font: &Font, family: &str) -> Result<Font, Error> {
        let members = self
            .members_of(family)
            .ok_or_else(|| Error::unresolvable_font(family, None))?;
        let ix = match_member(&members, font.style(), font.weight())
            .ok_or_else(|| Error::unresolvable_font(family, None))?;
        Ok(members[ix].instantiate(family, font.size()))
    }

    /// Converts `font` to `size` points.
    fn convert_to_size(&self, font: &Font, size: f32) -> Font {
        font.clone().with_size(size)
    }

    /// Converts `font` to the closest face of its family that has (or lacks) `font_trait`.
    ///
    /// Fails if the family has no face satisfying the request.
    fn convert_trait(&self, font: &Font, font_trait: FontTrait, enabled: bool) -> Result<Font, Error> {
        let (style, weight) = match (font_trait, enabled) {
            (FontTrait::Bold, true) => (font.style(), FontWeight::BOLD),
            (FontTrait::Bold, false) => (font.style(), FontWeight::NORMAL),
            (FontTrait::Italic, true) => (FontStyle::Italic, font.weight()),
            (FontTrait::Italic, false) => (FontStyle::Normal, font.weight()),
        };
        let members = self
            .members_of(font.family())
            .ok_or_else(|| Error::unresolvable_font(font.family(), None))?;
        let found = match_member(&members, style, weight)
            .map(|ix| members[ix].instantiate(font.family_arc().clone(), font.size()))
            .filter(|candidate| self.has_trait(candidate, font_trait) == enabled);
        found.ok_or_else(|| Error::unresolvable_font(font.family(), None))
    }

    /// Returns `true` if `font` has `font_trait`.
    fn has_trait(&self, font: &Font, font_trait: FontTrait) -> bool {
        match font_trait {
            FontTrait::Bold => font.is_bold(),
            FontTrait::Italic => font.is_italic(),
        }
    }
}

macro_rules! forward_catalog {
    () => {
        fn list_families(&self) -> Vec<Arc<str>> {
            (**self).list_families()
        }

        fn members_of(&self, family: &str) -> Option<Members> {
            (**self).members_of(family)
        }

        fn resolve_font(&self, family: &str, member: &str, size: f32) -> Result<Font, Error> {
            (**self).resolve_font(family, member, size)
        }

        fn convert_to_family(&self, font: &Font, family: &str) -> Result<Font, Error> {
            (**self).convert_to_family(font, family)
        }

        fn convert_to_size(&self, font: &Font, size: f32) -> Font {
            (**self).convert_to_size(font, size)
        }

        fn convert_trait(
            &self,
            font: &Font,
            font_trait: FontTrait,
            enabled: bool,
        ) -> Result<Font, Error> {
            (**self).convert_trait(font, font_trait, enabled)
        }

        fn has_trait(&self, font: &Font, font_trait: FontTrait) -> bool {
            (**self).has_trait(font, font_trait)
        }
    };
}

impl<C: FontCatalog + ?Sized> FontCatalog for &C {
    forward_catalog!();
}

impl<C: FontCatalog + ?Sized> FontCatalog for Arc<C> {
    forward_catalog!();
}

impl<C: FontCatalog + ?Sized> FontCatalog for Box<C> {
    forward_catalog!();
}
