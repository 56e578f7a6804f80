// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::{Debug, Write as _};
use std::sync::Arc;

use hashbrown::HashMap;
use text_runs::{RunStore, TextStorage};

use super::{ALIGNMENT_WORDS, SLANTS, TWIPS_PER_POINT};
use crate::{Color, Font, FontStyle, FontWeight, TextAttributes, UnderlineStyle};

/// Serializes `store` to RTF.
pub fn to_rtf<T>(store: &RunStore<T, TextAttributes>) -> Vec<u8>
where
    T: Debug + TextStorage + AsRef<str>,
{
    let tables = Tables::collect(store);
    let mut out = String::with_capacity(store.len() + 64 * store.run_count() + 64);
    out.push_str("{\\rtf1\\ansi\\ansicpg1252");
    tables.write(&mut out);
    out.push('\n');

    let text = store.as_str();
    for run in store.runs() {
        out.push('{');
        let before = out.len();
        write_properties(&mut out, &run.attributes, &tables);
        if out.len() != before {
            out.push(' ');
        }
        write_text(&mut out, &text[run.range.clone()]);
        out.push_str("}\n");
    }
    out.push('}');

    log::trace!(
        "wrote {} runs as {} bytes of RTF",
        store.run_count(),
        out.len()
    );
    out.into_bytes()
}

/// A font table entry: a family and, when `\b` and `\i` cannot express it, the exact face.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TableFont {
    family: Arc<str>,
    face: Option<TableFace>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TableFace {
    member: Option<Arc<str>>,
    weight: i32,
    slant: i32,
}

impl TableFont {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Font weights lie between 1 and 1000."
    )]
    fn of(font: &Font) -> Self {
        let weight = font.weight();
        let plain_weight = weight == FontWeight::NORMAL || weight == FontWeight::BOLD;
        let needs_face =
            font.member().is_some() || font.style() == FontStyle::Oblique || !plain_weight;
        Self {
            family: font.family_arc().clone(),
            face: needs_face.then(|| TableFace {
                member: font.member().map(Arc::from),
                weight: weight.value().round() as i32,
                slant: SLANTS
                    .iter()
                    .find(|(style, _)| *style == font.style())
                    .map_or(0, |(_, slant)| *slant),
            }),
        }
    }

    fn write(&self, out: &mut String) {
        if let Some(face) = &self.face {
            let _ = write!(
                out,
                "{{\\*\\fface\\fweight{}\\fslant{}",
                face.weight, face.slant
            );
            if let Some(member) = &face.member {
                out.push(' ');
                write_name(out, member);
            }
            out.push('}');
        }
        write_name(out, &self.family);
    }
}

/// Font and color tables, in order of first use.
#[derive(Default)]
struct Tables {
    fonts: Vec<TableFont>,
    font_index: HashMap<TableFont, usize>,
    colors: Vec<Color>,
    color_index: HashMap<Color, usize>,
}

impl Tables {
    fn collect<T: Debug + TextStorage>(store: &RunStore<T, TextAttributes>) -> Self {
        let mut tables = Self::default();
        for run in store.runs() {
            if let Some(font) = &run.attributes.font {
                let next = tables.fonts.len();
                tables
                    .font_index
                    .entry(TableFont::of(font))
                    .or_insert_with_key(|entry| {
                        tables.fonts.push(entry.clone());
                        next
                    });
            }
            if let Some(color) = run.attributes.foreground_color {
                let next = tables.colors.len() + 1;
                tables.color_index.entry(color).or_insert_with(|| {
                    tables.colors.push(color);
                    next
                });
            }
        }
        tables
    }

    fn write(&self, out: &mut String) {
        if !self.fonts.is_empty() {
            out.push_str("{\\fonttbl");
            for (ix, font) in self.fonts.iter().enumerate() {
                let _ = write!(out, "{{\\f{ix}\\fnil ");
                font.write(out);
                out.push_str(";}");
            }
            out.push('}');
        }
        if !self.colors.is_empty() {
            // Entry 0 is the automatic color.
            out.push_str("{\\colortbl;");
            for color in &self.colors {
                let _ = write!(out, "\\red{}\\green{}\\blue{};", color.r, color.g, color.b);
            }
            out.push('}');
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Font sizes and paragraph spacing are far inside the `i32` range."
)]
fn write_properties(out: &mut String, attributes: &TextAttributes, tables: &Tables) {
    if let Some(style) = &attributes.paragraph_style {
        let word = ALIGNMENT_WORDS
            .iter()
            .find(|(alignment, _)| *alignment == style.alignment)
            .map_or("ql", |(_, word)| *word);
        let _ = write!(out, "\\pard\\{word}");
        let twips = (style.spacing_after * TWIPS_PER_POINT).round() as i32;
        if twips != 0 {
            let _ = write!(out, "\\sa{twips}");
        }
    }
    if let Some(font) = &attributes.font {
        if let Some(ix) = tables.font_index.get(&TableFont::of(font)) {
            let _ = write!(out, "\\f{ix}");
        }
        let half_points = (font.size() * 2.0).round() as i32;
        let _ = write!(out, "\\fs{half_points}");
        if font.is_bold() {
            out.push_str("\\b");
        }
        if font.is_italic() {
            out.push_str("\\i");
        }
    }
    if let Some(color) = attributes.foreground_color {
        if let Some(ix) = tables.color_index.get(&color) {
            let _ = write!(out, "\\cf{ix}");
        }
    }
    match attributes.underline_style {
        Some(UnderlineStyle::Single) => out.push_str("\\ul"),
        Some(UnderlineStyle::Double) => out.push_str("\\uldb"),
        Some(UnderlineStyle::None) => out.push_str("\\ulnone"),
        None => {}
    }
}

/// Writes a font table name. `;` ends a table entry, so it is hex-escaped.
fn write_name(out: &mut String, name: &str) {
    for (ix, part) in name.split(';').enumerate() {
        if ix > 0 {
            out.push_str("\\'3b");
        }
        write_text(out, part);
    }
}

fn write_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\\' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\par "),
            '\t' => out.push_str("\\tab "),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0_u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    // RTF stores code units as signed 16-bit values.
                    let _ = write!(out, "\\u{}?", *unit as i16);
                }
            }
        }
    }
}
