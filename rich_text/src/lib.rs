// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rich-text attribute engine.
//!
//! The engine has two halves:
//!
//! - A [`TextStore`] (a [`text_runs::RunStore`] of [`TextAttributes`]) owns the text of a
//!   [`Document`] and partitions it into maximal runs of equal attributes. Writes happen in
//!   batches, so a change to a discontiguous selection lands as one atomic edit.
//! - A [`TypingState`] derives the attributes for the next typed character from the text around
//!   the caret, projects formatting changes onto the selection or onto those typing
//!   attributes, and decomposes the current font into family, face and decorations with the help
//!   of a [`FontCatalog`].
//!
//! [`Editor`] ties both to a [`Selection`], with one method per formatting action. Documents are
//! persisted as RTF through [`Document::save`] and [`Document::load`].
//!
//! ## Example
//!
//! ```
//! use rich_text::{
//!     Decoration, Document, DocumentDefaults, Editor, Font, FontCatalog, MemoryCatalog,
//!     Selection, TypingState,
//! };
//!
//! let catalog = MemoryCatalog::with_standard_families();
//! let font = catalog.resolve_font("Helvetica", "Helvetica", 12.0).unwrap();
//! let typing = TypingState::new(catalog, DocumentDefaults::new().with_font(font));
//! let mut editor = Editor::new(Document::new(), typing);
//!
//! editor.insert_text("Hello World").unwrap();
//! editor.set_selection(Selection::single(0..5)).unwrap();
//! editor.decoration_changed(Decoration::Bold, true).unwrap();
//!
//! let runs = editor.document().store().runs();
//! assert_eq!(runs.len(), 2);
//! assert_eq!(runs[0].attributes.font.as_ref().and_then(Font::member), Some("Helvetica-Bold"));
//! assert!(editor.derived().is_bold());
//!
//! let saved = editor.document().save();
//! let reopened = Document::load(&saved).unwrap();
//! assert_eq!(reopened.text(), "Hello World");
//! ```
//!
//! ## Indices
//!
//! Positions and ranges are **byte indices** into UTF-8 text, and must lie on character
//! boundaries. [`Document::char_len`] reports the text length in characters.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: `warn` when a font cannot be resolved, `debug`
//! for derived state recomputation, `trace` for batches and serialization. No logger is
//! installed by this crate.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod rtf;

mod attributes;
mod color;
mod document;
mod editor;
mod error;
mod font;
mod paragraph;
mod selection;
mod typing;

#[cfg(test)]
mod tests;

pub use text_runs;

pub use crate::attributes::{AttributeKey, TextAttributes, UnderlineStyle};
pub use crate::catalog::{FontCatalog, FontMember, FontTrait, MemoryCatalog};
pub use crate::color::Color;
pub use crate::document::Document;
pub use crate::editor::Editor;
pub use crate::error::{Error, ErrorKind};
pub use crate::font::{Font, FontDescriptor, FontStyle, FontWeight};
pub use crate::paragraph::{Alignment, ParagraphStyle};
pub use crate::selection::Selection;
pub use crate::typing::{
    ChangeTarget, Decoration, DerivedState, DocumentDefaults, ListenerId, TextStore, TypingState,
};
