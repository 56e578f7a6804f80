// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use hashbrown::HashMap;

use super::{FontCatalog, FontMember, Members};
use crate::{FontStyle, FontWeight};

/// A font catalog held in memory.
///
/// Families are registered explicitly, which makes this catalog suitable for tests, headless
/// tools and applications that ship a fixed set of fonts.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    families: HashMap<Arc<str>, Members>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with Helvetica, Times and Courier faces registered.
    pub fn with_standard_families() -> Self {
        use FontStyle::{Italic, Normal, Oblique};

        let mut catalog = Self::new();
        catalog.add_family(
            "Helvetica",
            [
                FontMember::new("Helvetica", "Regular", FontWeight::NORMAL, Normal),
                FontMember::new("Helvetica-Light", "Light", FontWeight::LIGHT, Normal),
                FontMember::new("Helvetica-Oblique", "Oblique", FontWeight::NORMAL, Oblique),
                FontMember::new(
                    "Helvetica-LightOblique",
                    "Light Oblique",
                    FontWeight::LIGHT,
                    Oblique,
                ),
                FontMember::new("Helvetica-Bold", "Bold", FontWeight::BOLD, Normal),
                FontMember::new(
                    "Helvetica-BoldOblique",
                    "Bold Oblique",
                    FontWeight::BOLD,
                    Oblique,
                ),
            ],
        );
        catalog.add_family(
            "Times",
            [
                FontMember::new("Times-Roman", "Regular", FontWeight::NORMAL, Normal),
                FontMember::new("Times-Italic", "Italic", FontWeight::NORMAL, Italic),
                FontMember::new("Times-Bold", "Bold", FontWeight::BOLD, Normal),
                FontMember::new("Times-BoldItalic", "Bold Italic", FontWeight::BOLD, Italic),
            ],
        );
        catalog.add_family(
            "Courier",
            [
                FontMember::new("Courier", "Regular", FontWeight::NORMAL, Normal),
                FontMember::new("Courier-Bold", "Bold", FontWeight::BOLD, Normal),
            ],
        );
        catalog
    }

    /// Registers (or replaces) `family` with `members`.
    pub fn add_family(
        &mut self,
        family: impl Into<Arc<str>>,
        members: impl IntoIterator<Item = FontMember>,
    ) -> &mut Self {
        self.families
            .insert(family.into(), members.into_iter().collect());
        self
    }

    /// Removes `family`, returning `true` if it was registered.
    pub fn remove_family(&mut self, family: &str) -> bool {
        self.families.remove(family).is_some()
    }

    /// Returns the number of registered families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Returns `true` if no family is registered.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl FontCatalog for MemoryCatalog {
    /// Family names sorted alphabetically.
    fn list_families(&self) -> Vec<Arc<str>> {
        let mut names: Vec<_> = self.families.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    fn members_of(&self, family: &str) -> Option<Members> {
        self.families.get(family).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryCatalog;
    use crate::catalog::{FontCatalog, FontTrait};
    use crate::{ErrorKind, Font, FontStyle, FontWeight};

    #[test]
    fn families_are_sorted() {
        let catalog = MemoryCatalog::with_standard_families();
        let names: Vec<_> = catalog.list_families().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, ["Courier", "Helvetica", "Times"]);
    }

    #[test]
    fn resolve_font_by_member() {
        let catalog = MemoryCatalog::with_standard_families();
        let font = catalog
            .resolve_font("Helvetica", "Helvetica-BoldOblique", 14.0)
            .unwrap();
        assert_eq!(font.family(), "Helvetica");
        assert_eq!(font.member(), Some("Helvetica-BoldOblique"));
        assert_eq!(font.size(), 14.0);
        assert!(font.is_bold() && font.is_italic());

        let err = catalog
            .resolve_font("Helvetica", "Helvetica-Black", 14.0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvableFont);
        assert_eq!(err.font_member(), Some("Helvetica-Black"));
    }

    #[test]
    fn convert_to_family_keeps_size_and_traits() {
        let catalog = MemoryCatalog::with_standard_families();
        let font = catalog
            .resolve_font("Helvetica", "Helvetica-BoldOblique", 18.0)
            .unwrap();

        let times = catalog.convert_to_family(&font, "Times").unwrap();
        assert_eq!(times.member(), Some("Times-BoldItalic"));
        assert_eq!(times.size(), 18.0);

        // Courier has no slanted faces; bold survives.
        let courier = catalog.convert_to_family(&font, "Courier").unwrap();
        assert_eq!(courier.member(), Some("Courier-Bold"));

        let err = catalog.convert_to_family(&font, "Papyrus").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvableFont);
        assert_eq!(err.font_family(), Some("Papyrus"));
    }

    #[test]
    fn convert_trait_adds_and_removes() {
        let catalog = MemoryCatalog::with_standard_families();
        let regular = catalog.resolve_font("Times", "Times-Roman", 12.0).unwrap();

        let bold = catalog.convert_trait(&regular, FontTrait::Bold, true).unwrap();
        assert_eq!(bold.member(), Some("Times-Bold"));
        assert!(catalog.has_trait(&bold, FontTrait::Bold));

        let bold_italic = catalog.convert_trait(&bold, FontTrait::Italic, true).unwrap();
        assert_eq!(bold_italic.member(), Some("Times-BoldItalic"));

        let italic = catalog
            .convert_trait(&bold_italic, FontTrait::Bold, false)
            .unwrap();
        assert_eq!(italic.member(), Some("Times-Italic"));
    }

    #[test]
    fn convert_trait_fails_when_family_lacks_face() {
        let catalog = MemoryCatalog::with_standard_families();
        let courier = Font::new("Courier", 12.0).with_member("Courier");
        let err = catalog
            .convert_trait(&courier, FontTrait::Italic, true)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvableFont);
    }

    #[test]
    fn catalog_by_reference_and_arc() {
        let catalog = MemoryCatalog::with_standard_families();
        let by_ref: &dyn FontCatalog = &catalog;
        assert_eq!(by_ref.list_families().len(), 3);

        let shared = std::sync::Arc::new(catalog);
        let font = Font::new("Helvetica", 12.0)
            .with_weight(FontWeight::BOLD)
            .with_style(FontStyle::Normal);
        assert!(shared.has_trait(&font, FontTrait::Bold));
        assert!(shared.members_of("Times").is_some());
    }
}
