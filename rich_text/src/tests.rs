// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behaviour of the store, the typing state and the editor together.

use std::cell::RefCell;
use std::rc::Rc;

use text_runs::RangeFault;

use crate::{
    Alignment, ChangeTarget, Color, Decoration, Document, DocumentDefaults, Editor, ErrorKind,
    Font, FontCatalog, FontTrait, MemoryCatalog, ParagraphStyle, Selection, TextAttributes,
    TextStore, TypingState, UnderlineStyle,
};

fn catalog() -> MemoryCatalog {
    MemoryCatalog::with_standard_families()
}

fn font(family: &str, member: &str, size: f32) -> Font {
    catalog().resolve_font(family, member, size).unwrap()
}

fn ranges(store: &TextStore) -> Vec<std::ops::Range<usize>> {
    store.runs().iter().map(|run| run.range.clone()).collect()
}

fn editor(text: &str) -> Editor<MemoryCatalog> {
    let helvetica = font("Helvetica", "Helvetica", 12.0);
    let document = Document::from_text(text, TextAttributes::new().with_font(helvetica.clone()));
    let typing = TypingState::new(catalog(), DocumentDefaults::new().with_font(helvetica));
    Editor::new(document, typing)
}

#[test]
fn resize_part_of_a_run() {
    let mut store = TextStore::new(
        "Hello World".into(),
        TextAttributes::new().with_font(Font::new("Helvetica", 12.0)),
    );
    let mut typing = TypingState::new(catalog(), DocumentDefaults::new());

    let target = typing
        .apply_attribute_change(
            &Selection::single(0..5),
            &TextAttributes::new().with_font(Font::new("Helvetica", 24.0)),
            &mut store,
        )
        .unwrap();
    assert!(target.changed());
    assert_eq!(ranges(&store), [0..5, 5..11]);
    let size_at = |position| store.attributes_at(position).unwrap().font.as_ref().unwrap().size();
    assert_eq!(size_at(0), 24.0);
    assert_eq!(size_at(5), 12.0);
}

#[test]
fn collapsed_caret_in_empty_document() {
    let mut store = TextStore::new(String::new(), TextAttributes::new());
    let mut typing = TypingState::new(catalog(), DocumentDefaults::new());
    let times = TextAttributes::new().with_font(Font::new("Times", 12.0));
    typing.set_typing_attributes(times);
    assert_eq!(typing.derived().font_family(), Some("Times"));

    let target = typing
        .apply_attribute_change(
            &Selection::caret(0),
            &TextAttributes::new().with_underline_style(UnderlineStyle::Single),
            &mut store,
        )
        .unwrap();
    assert_eq!(target, ChangeTarget::TypingAttributes { changed: true });
    assert_eq!(
        typing.typing_attributes().underline_style,
        Some(UnderlineStyle::Single)
    );
    assert_eq!(typing.derived().font_family(), Some("Times"));
    assert!(typing.derived().is_underlined());
    assert_eq!(store.run_count(), 0);
    assert_eq!(store.generation(), 0);
}

#[test]
fn matching_neighbours_coalesce() {
    let red = TextAttributes::new().with_foreground_color(Color::from_rgb8(255, 0, 0));
    let mut store = TextStore::new("abcdef".into(), TextAttributes::new());
    store.mutate(3..6, &red).unwrap();
    assert_eq!(ranges(&store), [0..3, 3..6]);

    let mut batch = store.begin_batch();
    assert!(batch.mutate(0..3, &red).unwrap());
    let summary = batch.end();
    assert_eq!(summary.dirty_range(), Some(0..3));
    assert_eq!(ranges(&store), [0..6]);
}

#[test]
fn typing_state_reports_catalog_traits() {
    let mut typing = TypingState::new(catalog(), DocumentDefaults::new());
    let catalog = catalog();
    for (family, member) in [
        ("Helvetica", "Helvetica-Light"),
        ("Helvetica", "Helvetica-BoldOblique"),
        ("Times", "Times-Italic"),
        ("Courier", "Courier-Bold"),
    ] {
        let font = font(family, member, 11.0);
        let mut store = TextStore::new(
            "xy".into(),
            TextAttributes::new().with_font(Font::new("Courier", 9.0)),
        );
        store
            .mutate(1..2, &TextAttributes::new().with_font(font.clone()))
            .unwrap();

        let derived = typing.on_caret_or_attributes_changed(&store, 2).unwrap();
        assert_eq!(derived.font_family(), Some(family));
        assert_eq!(derived.font_size(), Some(11.0));
        assert_eq!(derived.is_bold(), catalog.has_trait(&font, FontTrait::Bold));
        assert_eq!(derived.is_italic(), catalog.has_trait(&font, FontTrait::Italic));
        let selected = derived.selected_member().unwrap();
        assert_eq!(derived.member_ids().nth(selected), Some(member));
    }
}

#[test]
fn discontiguous_selection_is_one_change() {
    let mut editor = editor("one two three");
    let notified = Rc::new(RefCell::new(Vec::new()));
    let seen = notified.clone();
    editor
        .typing_mut()
        .subscribe(move |derived| seen.borrow_mut().push(derived.color()));

    let generation = editor.document().store().generation();
    editor
        .set_selection(Selection::new([0..3, 8..13]))
        .unwrap();
    let white = Color::WHITE;
    let target = editor.color_changed(white).unwrap();
    let ChangeTarget::Selection(summary) = &target else {
        panic!("expected a selection edit, got {target:?}");
    };
    assert_eq!(summary.dirty_range(), Some(0..13));

    let store = editor.document().store();
    assert_eq!(store.generation(), generation + 1);
    assert_eq!(ranges(store), [0..3, 3..8, 8..13]);
    assert_eq!(store.attributes_at(9).unwrap().foreground_color, Some(white));
    assert_eq!(store.attributes_at(4).unwrap().foreground_color, None);
    assert_eq!(notified.borrow().last(), Some(&white));
}

#[test]
fn typing_after_formatting_a_caret() {
    let mut editor = editor("Hi");
    editor.set_selection(Selection::caret(2)).unwrap();
    editor.decoration_changed(Decoration::Italic, true).unwrap();
    editor.font_size_changed(-16.0).unwrap();
    assert!(editor.derived().is_italic());
    assert_eq!(editor.derived().font_size(), Some(16.0));
    assert_eq!(editor.document().store().run_count(), 1, "text is untouched");

    editor.insert_text(" there").unwrap();
    let store = editor.document().store();
    assert_eq!(store.as_str(), "Hi there");
    assert_eq!(ranges(store), [0..2, 2..8]);
    let typed = store.attributes_at(4).unwrap().font.clone().unwrap();
    assert_eq!(typed.member(), Some("Helvetica-Oblique"));
    assert_eq!(typed.size(), 16.0);
    assert_eq!(editor.selection(), &Selection::caret(8));
    assert!(editor.derived().is_italic());
}

#[test]
fn unusable_font_size_changes_nothing() {
    let mut editor = editor("Hello");
    editor.set_selection(Selection::single(0..5)).unwrap();
    let generation = editor.document().store().generation();

    for size in [0.0, f32::NAN] {
        let err = editor.font_size_changed(size).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFontSize);
    }
    assert_eq!(editor.document().store().generation(), generation);
    assert_eq!(editor.derived().font_size(), Some(12.0));
}

#[test]
fn insert_replaces_selection() {
    let mut editor = editor("abc def ghi");
    editor
        .set_selection(Selection::new([0..3, 8..11]))
        .unwrap();
    let summary = editor.insert_text("XY").unwrap();
    assert!(summary.changed());
    assert_eq!(editor.document().text(), "XY def ");
    assert_eq!(editor.selection(), &Selection::caret(2));
    assert_eq!(editor.document().store().run_count(), 1);
}

#[test]
fn member_and_family_changes() {
    let mut editor = editor("Hello");
    editor.set_selection(Selection::single(0..5)).unwrap();

    editor.font_member_changed("Helvetica-BoldOblique").unwrap();
    assert_eq!(editor.derived().font_member_label(), Some("Bold Oblique"));

    editor.font_family_changed("Times").unwrap();
    assert_eq!(editor.derived().font_family(), Some("Times"));
    assert_eq!(editor.derived().font_member_label(), Some("Bold Italic"));

    let generation = editor.document().store().generation();
    let err = editor.font_member_changed("Times-Condensed").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvableFont);
    assert_eq!(editor.document().store().generation(), generation);
    assert_eq!(editor.derived().font_member_label(), Some("Bold Italic"));
}

#[test]
fn missing_font_is_reported() {
    let document = Document::from_text("abc", TextAttributes::new());
    let mut editor = Editor::new(document, TypingState::new(catalog(), DocumentDefaults::new()));
    editor.set_selection(Selection::single(0..3)).unwrap();

    let err = editor.decoration_changed(Decoration::Bold, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingFont);
    let err = editor.font_size_changed(14.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingFont);

    editor.decoration_changed(Decoration::Underline, true).unwrap();
    assert!(editor.derived().is_underlined());
}

#[test]
fn alignment_applies_to_selection_and_typing() {
    let mut editor = editor("first\nsecond");
    editor.set_selection(Selection::single(6..12)).unwrap();
    editor.alignment_changed(Alignment::Right).unwrap();

    let store = editor.document().store();
    assert_eq!(store.attributes_at(0).unwrap().paragraph_style, None);
    assert_eq!(
        store.attributes_at(6).unwrap().paragraph_style,
        Some(ParagraphStyle::new().with_alignment(Alignment::Right))
    );
    assert_eq!(editor.derived().alignment(), Alignment::Right);
}

#[test]
fn invalid_selection_is_rejected() {
    let mut editor = editor("héllo");
    let err = editor.set_selection(Selection::single(0..2)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    assert!(matches!(
        err.store_error().and_then(text_runs::Error::fault),
        Some(RangeFault::SplitsChar { index: 2, .. })
    ));

    let err = editor.set_selection(Selection::single(3..40)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    assert_eq!(editor.selection(), &Selection::caret(0));
}

#[test]
fn edited_document_survives_save() {
    let mut editor = editor("Title\nBody text");
    editor.set_selection(Selection::single(0..5)).unwrap();
    editor.font_member_changed("Helvetica-Bold").unwrap();
    editor.font_size_changed(18.0).unwrap();
    editor.alignment_changed(Alignment::Center).unwrap();

    let mut loaded = Document::load(&editor.document().save()).unwrap();
    assert_eq!(loaded.text(), "Title\nBody text");
    assert_eq!(loaded.store().runs(), editor.document().store().runs());
    assert!(!loaded.resolve_members(&catalog()));
}

#[test]
fn chosen_member_survives_save() {
    let mut editor = editor("");
    editor.insert_text("Light Regular").unwrap();
    editor.set_selection(Selection::single(0..5)).unwrap();
    editor.font_member_changed("Helvetica-Light").unwrap();
    assert_eq!(editor.document().store().run_count(), 2);

    let mut loaded = Document::load(&editor.document().save()).unwrap();
    loaded.resolve_members(&catalog());
    assert_eq!(loaded.store().runs(), editor.document().store().runs());

    let mut reopened = Editor::new(
        loaded,
        TypingState::new(catalog(), DocumentDefaults::new()),
    );
    reopened.set_selection(Selection::single(0..5)).unwrap();
    assert_eq!(reopened.derived().font_member_label(), Some("Light"));
    let derived = reopened.derived();
    let selected = derived.selected_member().unwrap();
    assert_eq!(&*derived.members()[selected].id, "Helvetica-Light");
}
