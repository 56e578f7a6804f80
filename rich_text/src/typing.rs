// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The typing-state synchronizer.
//!
//! [`TypingState`] keeps the attributes that apply to the next typed character and the derived
//! state shown by formatting controls (color, alignment, font family and face, decorations). It
//! projects formatting changes either onto the selected text or, for a collapsed selection,
//! onto the typing attributes themselves.

use std::fmt::{self, Debug};
use std::sync::Arc;

use text_runs::{Attributes as _, BatchSummary, RunStore, TextRange, TextStorage};

use crate::catalog::{FontCatalog, FontTrait, Members};
use crate::{
    Alignment, Color, Error, Font, FontDescriptor, ParagraphStyle, Selection, TextAttributes,
    UnderlineStyle,
};

/// The run store used for documents: owned text with [`TextAttributes`] runs.
pub type TextStore = RunStore<String, TextAttributes>;

/// The attributes used where the text supplies none, such as a caret at the start of a document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentDefaults {
    /// The default attribute set. Keys left unspecified fall back to black text, left
    /// alignment, no underline and no font.
    pub attributes: TextAttributes,
}

impl DocumentDefaults {
    /// Creates defaults with no key specified.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default font.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.attributes.font = Some(font);
        self
    }

    /// Sets the default foreground color.
    #[must_use]
    pub fn with_foreground_color(mut self, color: Color) -> Self {
        self.attributes.foreground_color = Some(color);
        self
    }

    /// Sets the default paragraph style.
    #[must_use]
    pub fn with_paragraph_style(mut self, style: ParagraphStyle) -> Self {
        self.attributes.paragraph_style = Some(style);
        self
    }
}

/// State derived from the typing attributes for display by formatting controls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedState {
    color: Color,
    alignment: Alignment,
    underline: bool,
    font: Option<FontDescriptor>,
    members: Members,
    selected_member: Option<usize>,
}

impl DerivedState {
    /// The foreground color, black unless specified.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The paragraph alignment, left unless specified.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Returns `true` if the text is singly underlined.
    pub fn is_underlined(&self) -> bool {
        self.underline
    }

    /// The decomposed font, if the typing attributes carry one.
    pub fn font(&self) -> Option<&FontDescriptor> {
        self.font.as_ref()
    }

    /// The font family name, if any.
    pub fn font_family(&self) -> Option<&str> {
        self.font.as_ref().map(|font| &*font.family)
    }

    /// The display label of the selected face, if resolved.
    pub fn font_member_label(&self) -> Option<&str> {
        self.font.as_ref().and_then(|font| font.member_label.as_deref())
    }

    /// The font size in points, if there is a font.
    pub fn font_size(&self) -> Option<f32> {
        self.font.as_ref().map(|font| font.size)
    }

    /// Returns `true` if the font has the bold trait.
    pub fn is_bold(&self) -> bool {
        self.font.as_ref().is_some_and(|font| font.is_bold)
    }

    /// Returns `true` if the font has the italic trait.
    pub fn is_italic(&self) -> bool {
        self.font.as_ref().is_some_and(|font| font.is_italic)
    }

    /// The faces of the current family, in catalog order.
    pub fn members(&self) -> &[crate::catalog::FontMember] {
        &self.members
    }

    /// Catalog identifiers of [`members`](Self::members).
    pub fn member_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|member| &*member.id)
    }

    /// Display labels of [`members`](Self::members), parallel to
    /// [`member_ids`](Self::member_ids).
    pub fn member_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|member| &*member.label)
    }

    /// Index into [`members`](Self::members) of the current face.
    ///
    /// `None` when the font names no face or the family does not list it.
    pub fn selected_member(&self) -> Option<usize> {
        self.selected_member
    }
}

/// Where [`TypingState::apply_attribute_change`] wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeTarget {
    /// The selected text was edited in one batch.
    Selection(BatchSummary),
    /// The selection was collapsed, so the typing attributes were edited instead.
    TypingAttributes {
        /// Whether the typing attributes differ from before.
        changed: bool,
    },
}

impl ChangeTarget {
    /// Returns `true` if the change had any effect.
    pub fn changed(&self) -> bool {
        match self {
            Self::Selection(summary) => summary.changed(),
            Self::TypingAttributes { changed } => *changed,
        }
    }
}

/// A decoration toggled by a formatting control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    /// Bold face, a font trait.
    Bold,
    /// Italic face, a font trait.
    Italic,
    /// Single underline, an attribute of its own.
    Underline,
}

/// Handle returned by [`TypingState::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&DerivedState)>;

/// Keeps the typing attributes and their derived display state in step with a document.
pub struct TypingState<C: FontCatalog> {
    catalog: C,
    defaults: DocumentDefaults,
    typing: TextAttributes,
    derived: DerivedState,
    families: Vec<Arc<str>>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<C: FontCatalog> TypingState<C> {
    /// Creates a synchronizer that resolves fonts through `catalog`.
    ///
    /// The typing attributes start out as the document defaults.
    pub fn new(catalog: C, defaults: DocumentDefaults) -> Self {
        let families = catalog.list_families();
        let mut state = Self {
            catalog,
            typing: defaults.attributes.clone(),
            defaults,
            derived: DerivedState::default(),
            families,
            listeners: Vec::new(),
            next_listener: 0,
        };
        state.recompute();
        state
    }

    /// The font catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The document defaults.
    pub fn defaults(&self) -> &DocumentDefaults {
        &self.defaults
    }

    /// The attributes that apply to the next typed character.
    pub fn typing_attributes(&self) -> &TextAttributes {
        &self.typing
    }

    /// Replaces the typing attributes and recomputes the derived state.
    pub fn set_typing_attributes(&mut self, attributes: TextAttributes) -> &DerivedState {
        self.typing = attributes;
        self.recompute();
        &self.derived
    }

    /// The current derived state.
    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    /// The catalog's family names, as of construction or the last
    /// [`refresh_families`](Self::refresh_families).
    pub fn available_families(&self) -> &[Arc<str>] {
        &self.families
    }

    /// Queries the catalog for its families again.
    pub fn refresh_families(&mut self) {
        self.families = self.catalog.list_families();
    }

    /// Re-derives the typing attributes for a caret at `caret`.
    ///
    /// The attributes of the character before the caret are used, or the document defaults when
    /// the caret is at the start. Fails with [`ErrorKind::OutOfBounds`](crate::ErrorKind) when
    /// the caret is past the end of the text.
    pub fn on_caret_or_attributes_changed<T: Debug + TextStorage>(
        &mut self,
        store: &RunStore<T, TextAttributes>,
        caret: usize,
    ) -> Result<&DerivedState, Error> {
        self.typing = match caret.checked_sub(1) {
            Some(before) => store.attributes_at(before)?.clone(),
            None => self.defaults.attributes.clone(),
        };
        self.recompute();
        Ok(&self.derived)
    }

    /// Re-derives the typing attributes for `selection`.
    ///
    /// See [`Selection::typing_position`].
    pub fn on_selection_changed<T: Debug + TextStorage>(
        &mut self,
        store: &RunStore<T, TextAttributes>,
        selection: &Selection,
    ) -> Result<&DerivedState, Error> {
        self.on_caret_or_attributes_changed(store, selection.typing_position())
    }

    /// Applies `delta` to the selected text, or to the typing attributes when the selection is
    /// collapsed.
    ///
    /// Every selected range is validated before anything is written, so a failure leaves both
    /// the store and the typing attributes untouched. Edits to the selection leave the typing
    /// attributes as they are; they are re-derived on the next caret or selection change.
    pub fn apply_attribute_change<T: Debug + TextStorage>(
        &mut self,
        selection: &Selection,
        delta: &TextAttributes,
        store: &mut RunStore<T, TextAttributes>,
    ) -> Result<ChangeTarget, Error> {
        if selection.is_collapsed() {
            let changed = self.typing.merge(delta);
            if changed {
                self.recompute();
            }
            return Ok(ChangeTarget::TypingAttributes { changed });
        }

        for range in selection.non_empty_ranges() {
            TextRange::new(store.text(), range)?;
        }
        let mut batch = store.begin_batch();
        for range in selection.non_empty_ranges() {
            batch.mutate(range, delta)?;
        }
        Ok(ChangeTarget::Selection(batch.end()))
    }

    /// Returns `current` converted to the closest face of `family`, keeping its size.
    pub fn change_font_family(&self, family: &str, current: &Font) -> Result<Font, Error> {
        self.catalog
            .convert_to_family(current, family)
            .inspect_err(|err| log::warn!("cannot change font family: {err}"))
    }

    /// Returns `current` with the face `member` of the same family and size.
    pub fn change_font_member(&self, member: &str, current: &Font) -> Result<Font, Error> {
        self.catalog
            .resolve_font(current.family(), member, current.size())
            .inspect_err(|err| log::warn!("cannot change font member: {err}"))
    }

    /// Returns `current` at `size` points.
    ///
    /// A negative size has its sign flipped. Zero and non-finite sizes fail with
    /// [`ErrorKind::InvalidFontSize`](crate::ErrorKind::InvalidFontSize).
    pub fn change_font_size(&self, size: f32, current: &Font) -> Result<Font, Error> {
        if !size.is_finite() || size == 0.0 {
            log::warn!("rejected font size {size}");
            return Err(Error::invalid_font_size(size));
        }
        if size < 0.0 {
            log::debug!("negative font size {size} flipped to {}", -size);
        }
        Ok(self.catalog.convert_to_size(current, size.abs()))
    }

    /// Returns the attribute delta that turns `decoration` on or off.
    ///
    /// Bold and italic convert `current` through the catalog and fail with
    /// [`ErrorKind::MissingFont`](crate::ErrorKind::MissingFont) when there is no font.
    /// Underline needs no font.
    pub fn toggle_decoration(
        &self,
        decoration: Decoration,
        enabled: bool,
        current: Option<&Font>,
    ) -> Result<TextAttributes, Error> {
        let font_trait = match decoration {
            Decoration::Bold => FontTrait::Bold,
            Decoration::Italic => FontTrait::Italic,
            Decoration::Underline => {
                let style = if enabled {
                    UnderlineStyle::Single
                } else {
                    UnderlineStyle::None
                };
                return Ok(TextAttributes::new().with_underline_style(style));
            }
        };
        let font = current.ok_or_else(Error::missing_font)?;
        let converted = self
            .catalog
            .convert_trait(font, font_trait, enabled)
            .inspect_err(|err| log::warn!("cannot toggle {decoration:?}: {err}"))?;
        Ok(TextAttributes::new().with_font(converted))
    }

    /// Sets the alignment of every selected range and of the typing attributes.
    ///
    /// Each range keeps the rest of the paragraph style found at its start.
    pub fn set_paragraph_alignment<T: Debug + TextStorage>(
        &mut self,
        alignment: Alignment,
        selection: &Selection,
        store: &mut RunStore<T, TextAttributes>,
    ) -> Result<BatchSummary, Error> {
        for range in selection.non_empty_ranges() {
            TextRange::new(store.text(), range)?;
        }
        let mut batch = store.begin_batch();
        for range in selection.non_empty_ranges() {
            let style = batch
                .attributes_at(range.start)?
                .paragraph_style
                .clone()
                .unwrap_or_default()
                .with_alignment(alignment);
            batch.mutate(range, &TextAttributes::new().with_paragraph_style(style))?;
        }
        let summary = batch.end();

        let style = self
            .typing
            .paragraph_style
            .clone()
            .unwrap_or_default()
            .with_alignment(alignment);
        self.typing.paragraph_style = Some(style);
        self.recompute();
        Ok(summary)
    }

    /// Registers `listener`, called with the derived state after every recomputation.
    pub fn subscribe(&mut self, listener: impl FnMut(&DerivedState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener, returning `true` if it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    fn recompute(&mut self) {
        let attributes = &self.typing;
        let mut derived = DerivedState {
            color: attributes.foreground_color.unwrap_or(Color::BLACK),
            alignment: attributes
                .paragraph_style
                .as_ref()
                .map_or(Alignment::Left, |style| style.alignment),
            underline: attributes.underline_style == Some(UnderlineStyle::Single),
            ..DerivedState::default()
        };

        if let Some(font) = &attributes.font {
            let members = self.catalog.members_of(font.family()).unwrap_or_else(|| {
                log::warn!("font family {:?} is not in the catalog", font.family());
                Members::new()
            });
            let selected = font
                .member()
                .and_then(|id| members.iter().position(|member| &*member.id == id));
            match (font.member(), selected) {
                (Some(id), None) => {
                    log::warn!("member {id:?} is not listed for family {:?}", font.family());
                }
                (None, _) => log::debug!("font {font} names no member"),
                _ => {}
            }
            derived.font = Some(FontDescriptor {
                family: font.family_arc().clone(),
                member: font.member().map(Arc::from),
                member_label: selected.map(|ix| members[ix].label.clone()),
                size: font.size(),
                is_bold: self.catalog.has_trait(font, FontTrait::Bold),
                is_italic: self.catalog.has_trait(font, FontTrait::Italic),
            });
            derived.members = members;
            derived.selected_member = selected;
        }

        log::debug!(
            "typing state: font {:?}, color {:?}, alignment {:?}",
            derived.font_family(),
            derived.color,
            derived.alignment
        );
        self.derived = derived;
        for (_, listener) in &mut self.listeners {
            listener(&self.derived);
        }
    }
}

impl<C: FontCatalog> Debug for TypingState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypingState")
            .field("typing", &self.typing)
            .field("derived", &self.derived)
            .field("families", &self.families.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
