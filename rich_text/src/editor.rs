// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_runs::{BatchSummary, TextRange};

use crate::catalog::FontCatalog;
use crate::{
    Alignment, ChangeTarget, Color, Decoration, DerivedState, Document, Error, Font, Selection,
    TextAttributes, TypingState,
};

/// A document together with its selection and typing state.
///
/// Each method corresponds to one action of a formatting control or the text view. Changes go
/// through the [`TypingState`]: with text selected they edit the document, with a collapsed
/// selection they edit the typing attributes. Afterwards the derived state reflects the result.
#[derive(Debug)]
pub struct Editor<C: FontCatalog> {
    document: Document,
    typing: TypingState<C>,
    selection: Selection,
}

impl<C: FontCatalog> Editor<C> {
    /// Opens `document` with a caret at its start.
    pub fn new(document: Document, typing: TypingState<C>) -> Self {
        let mut editor = Self {
            document,
            typing,
            selection: Selection::caret(0),
        };
        editor.resync();
        editor
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Closes the editor, returning the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// The typing state.
    pub fn typing(&self) -> &TypingState<C> {
        &self.typing
    }

    /// Mutable access to the typing state, for example to subscribe to derived state changes.
    pub fn typing_mut(&mut self) -> &mut TypingState<C> {
        &mut self.typing
    }

    /// The derived state shown by formatting controls.
    pub fn derived(&self) -> &DerivedState {
        self.typing.derived()
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Moves the selection and re-derives the typing attributes from it.
    ///
    /// On failure the previous selection is kept.
    pub fn set_selection(&mut self, selection: Selection) -> Result<&DerivedState, Error> {
        let text = self.document.store().text();
        for range in selection.ranges() {
            TextRange::new(text, range.clone())?;
        }
        self.selection = selection;
        self.typing
            .on_selection_changed(self.document.store(), &self.selection)
    }

    /// Replaces the selection with `text` carrying the typing attributes.
    ///
    /// The text goes into the first range; any further ranges are deleted. The selection then
    /// collapses to a caret after the inserted text.
    pub fn insert_text(&mut self, text: &str) -> Result<BatchSummary, Error> {
        let attributes = self.typing.typing_attributes().clone();
        let ranges = self.selection.ranges();
        let store = self.document.store_mut();
        for range in ranges {
            TextRange::new(store.text(), range.clone())?;
        }

        let first = ranges[0].clone();
        let mut batch = store.begin_batch();
        for range in ranges[1..].iter().rev() {
            batch.replace(range.clone(), "", attributes.clone())?;
        }
        batch.replace(first.clone(), text, attributes)?;
        let summary = batch.end();

        let caret = first.start + text.len();
        self.selection = Selection::caret(caret);
        self.typing
            .on_caret_or_attributes_changed(self.document.store(), caret)?;
        Ok(summary)
    }

    /// Converts the current font to `family`.
    pub fn font_family_changed(&mut self, family: &str) -> Result<ChangeTarget, Error> {
        let font = self.typing.change_font_family(family, self.current_font()?)?;
        self.apply(&TextAttributes::new().with_font(font))
    }

    /// Switches the current font to the face `member` of its family.
    pub fn font_member_changed(&mut self, member: &str) -> Result<ChangeTarget, Error> {
        let font = self.typing.change_font_member(member, self.current_font()?)?;
        self.apply(&TextAttributes::new().with_font(font))
    }

    /// Resizes the current font.
    pub fn font_size_changed(&mut self, size: f32) -> Result<ChangeTarget, Error> {
        let font = self.typing.change_font_size(size, self.current_font()?)?;
        self.apply(&TextAttributes::new().with_font(font))
    }

    /// Sets the foreground color.
    pub fn color_changed(&mut self, color: Color) -> Result<ChangeTarget, Error> {
        self.apply(&TextAttributes::new().with_foreground_color(color))
    }

    /// Sets the paragraph alignment of the selection and of the typing attributes.
    pub fn alignment_changed(&mut self, alignment: Alignment) -> Result<BatchSummary, Error> {
        let summary = self.typing.set_paragraph_alignment(
            alignment,
            &self.selection,
            self.document.store_mut(),
        )?;
        self.resync();
        Ok(summary)
    }

    /// Turns a decoration on or off.
    pub fn decoration_changed(
        &mut self,
        decoration: Decoration,
        enabled: bool,
    ) -> Result<ChangeTarget, Error> {
        let font = self.typing.typing_attributes().font.as_ref();
        let delta = self.typing.toggle_decoration(decoration, enabled, font)?;
        self.apply(&delta)
    }

    fn current_font(&self) -> Result<&Font, Error> {
        self.typing.typing_attributes().font.as_ref().ok_or_else(|| {
            log::warn!("no current font");
            Error::missing_font()
        })
    }

    fn apply(&mut self, delta: &TextAttributes) -> Result<ChangeTarget, Error> {
        let target =
            self.typing
                .apply_attribute_change(&self.selection, delta, self.document.store_mut())?;
        self.resync();
        Ok(target)
    }

    /// Re-derives the typing attributes from selected text.
    ///
    /// A collapsed selection keeps its typing attributes, which may hold changes not yet typed.
    fn resync(&mut self) {
        if self.selection.is_collapsed() {
            return;
        }
        if let Err(err) = self
            .typing
            .on_selection_changed(self.document.store(), &self.selection)
        {
            log::warn!("cannot derive typing attributes from selection: {err}");
        }
    }
}
