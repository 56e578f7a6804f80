// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::catalog::{FontCatalog, match_member};
use crate::{Error, Font, TextAttributes, TextStore, rtf};

/// A rich-text document: text plus its attribute runs.
#[derive(Clone, Debug)]
pub struct Document {
    store: TextStore,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::from_text(String::new(), TextAttributes::new())
    }

    /// Creates a document of `text` in a single run of `attributes`.
    pub fn from_text(text: impl Into<String>, attributes: TextAttributes) -> Self {
        Self {
            store: TextStore::new(text.into(), attributes),
        }
    }

    /// Wraps an existing store.
    pub fn from_store(store: TextStore) -> Self {
        Self { store }
    }

    /// Reads a document saved with [`save`](Self::save) (or any RTF the reader understands).
    ///
    /// On failure no document is produced.
    pub fn load(data: &[u8]) -> Result<Self, Error> {
        let store = rtf::from_rtf(data).inspect_err(|err| log::warn!("load failed: {err}"))?;
        log::debug!(
            "loaded document: {} bytes, {} runs",
            store.len(),
            store.run_count()
        );
        Ok(Self { store })
    }

    /// Serializes the document as RTF.
    pub fn save(&self) -> Vec<u8> {
        rtf::to_rtf(&self.store)
    }

    /// The text and its runs.
    pub fn store(&self) -> &TextStore {
        &self.store
    }

    /// Mutable access to the text and its runs.
    pub fn store_mut(&mut self) -> &mut TextStore {
        &mut self.store
    }

    /// The document text.
    pub fn text(&self) -> &str {
        self.store.as_str()
    }

    /// The length of the text in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.store.char_len()
    }

    /// Consumes the document, returning its store.
    pub fn into_store(self) -> TextStore {
        self.store
    }

    /// Gives every font without a face identifier the closest face of its family in `catalog`.
    ///
    /// Documents written by other applications often carry only family, size, weight and style,
    /// or name a face by its identifier in place of the family (for example `Helvetica-Light`).
    /// The latter are moved to the family that owns the face. Fonts matching neither are left as
    /// they are. Returns `true` if any run changed.
    pub fn resolve_members(&mut self, catalog: &impl FontCatalog) -> bool {
        let updates: Vec<_> = self
            .store
            .runs()
            .iter()
            .filter_map(|run| {
                let font = run.attributes.font.as_ref()?;
                if font.member().is_some() {
                    return None;
                }
                let resolved = match catalog.members_of(font.family()) {
                    Some(members) => {
                        let ix = match_member(&members, font.style(), font.weight())?;
                        members[ix].instantiate(font.family_arc().clone(), font.size())
                    }
                    None => {
                        let Some(face) = face_named(catalog, font.family(), font.size()) else {
                            log::warn!("font family {:?} is not in the catalog", font.family());
                            return None;
                        };
                        face
                    }
                };
                Some((run.range.clone(), TextAttributes::new().with_font(resolved)))
            })
            .collect();

        let mut batch = self.store.begin_batch();
        for (range, delta) in updates {
            // Ranges come from the store's own runs.
            if let Err(err) = batch.mutate(range, &delta) {
                log::warn!("cannot resolve font member: {err}");
            }
        }
        batch.end().changed()
    }
}

/// The font for the catalog face whose identifier is `name`, in the family that owns it.
fn face_named(catalog: &impl FontCatalog, name: &str, size: f32) -> Option<Font> {
    catalog.list_families().into_iter().find_map(|family| {
        let members = catalog.members_of(&family)?;
        let member = members.iter().find(|member| &*member.id == name)?;
        Some(member.instantiate(family, size))
    })
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::catalog::{FontCatalog, MemoryCatalog};
    use crate::{ErrorKind, Font, FontStyle, FontWeight, TextAttributes};

    #[test]
    fn save_and_load() {
        let bold = Font::new("Helvetica", 12.0).with_weight(FontWeight::BOLD);
        let document = Document::from_text("Hello", TextAttributes::new().with_font(bold));
        let loaded = Document::load(&document.save()).unwrap();
        assert_eq!(loaded.text(), "Hello");
        assert_eq!(loaded.store().runs(), document.store().runs());
    }

    #[test]
    fn length_counts_characters() {
        let document = Document::from_text("caf\u{e9} \u{1f600}", TextAttributes::new());
        assert_eq!(document.char_len(), 6);
        assert_eq!(document.store().len(), 10);
    }

    #[test]
    fn load_failure_produces_nothing() {
        let err = Document::load(b"{\\rtf1 unterminated").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Deserialization);
    }

    #[test]
    fn resolve_members_after_load() {
        let catalog = MemoryCatalog::with_standard_families();
        let font = Font::new("Helvetica", 12.0)
            .with_weight(FontWeight::BOLD)
            .with_style(FontStyle::Italic);
        let mut document = Document::from_text("ab", TextAttributes::new().with_font(font));
        document
            .store_mut()
            .mutate(
                1..2,
                &TextAttributes::new().with_font(Font::new("Papyrus", 12.0)),
            )
            .unwrap();

        assert!(document.resolve_members(&catalog));
        let resolved = document.store().attributes_at(0).unwrap().font.clone().unwrap();
        assert_eq!(resolved.member(), Some("Helvetica-BoldOblique"));
        assert_eq!(resolved.style(), FontStyle::Oblique);
        let unknown = document.store().attributes_at(1).unwrap().font.clone().unwrap();
        assert_eq!(unknown.member(), None);

        assert!(!document.resolve_members(&catalog), "already resolved");
    }

    #[test]
    fn face_names_move_to_their_family() {
        let catalog = MemoryCatalog::with_standard_families();
        let input = br"{\rtf1{\fonttbl\f0\fswiss Helvetica-Light;\f1\froman Times-BoldItalic;}
\f0\fs28 thin \f1 heavy}";
        let mut document = Document::load(input).unwrap();
        assert!(document.resolve_members(&catalog));

        let thin = document.store().attributes_at(0).unwrap().font.clone().unwrap();
        assert_eq!(thin.family(), "Helvetica");
        assert_eq!(thin.member(), Some("Helvetica-Light"));
        assert_eq!(thin.weight(), FontWeight::LIGHT);
        assert_eq!(thin.size(), 14.0);

        let heavy = document.store().attributes_at(6).unwrap().font.clone().unwrap();
        assert_eq!(heavy.family(), "Times");
        assert_eq!(heavy.member(), Some("Times-BoldItalic"));
    }

    #[test]
    fn chosen_face_survives_save_and_load() {
        let catalog = MemoryCatalog::with_standard_families();
        let regular = catalog.resolve_font("Helvetica", "Helvetica", 12.0).unwrap();
        let light = catalog.resolve_font("Helvetica", "Helvetica-Light", 12.0).unwrap();
        let mut document =
            Document::from_text("Light Regular", TextAttributes::new().with_font(regular));
        document
            .store_mut()
            .mutate(0..5, &TextAttributes::new().with_font(light))
            .unwrap();
        assert_eq!(document.store().run_count(), 2);

        let mut loaded = Document::load(&document.save()).unwrap();
        assert_eq!(loaded.store().runs(), document.store().runs());
        assert!(!loaded.resolve_members(&catalog), "faces are already known");
        let font = loaded.store().attributes_at(0).unwrap().font.clone().unwrap();
        assert_eq!(font.member(), Some("Helvetica-Light"));
    }
}
