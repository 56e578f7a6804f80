// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use hashbrown::HashMap;
use text_runs::{Run, RunStore};

use super::{ALIGNMENT_WORDS, DEFAULT_FONT_SIZE, SLANTS, TWIPS_PER_POINT};
use crate::{
    Color, Error, Font, FontStyle, FontWeight, ParagraphStyle, TextAttributes, TextStore,
    UnderlineStyle,
};

/// Groups nested deeper than this are rejected.
const MAX_DEPTH: usize = 256;

/// Longest control word accepted, in bytes.
const MAX_WORD_LEN: usize = 32;

/// Destinations whose content is not document text.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "author",
    "comment",
    "datastore",
    "fldinst",
    "footer",
    "footnote",
    "header",
    "info",
    "latentstyles",
    "listoverridetable",
    "listtable",
    "object",
    "operator",
    "pict",
    "revtbl",
    "rsidtbl",
    "stylesheet",
    "themedata",
    "title",
    "xmlnstbl",
];

/// Parses an RTF document.
///
/// Fails with [`ErrorKind::Deserialization`](crate::ErrorKind::Deserialization) if the input
/// is not a single, well-formed RTF group; no partial document is returned.
pub fn from_rtf(input: &[u8]) -> Result<TextStore, Error> {
    let mut reader = Reader::new(input);
    reader.parse()?;
    let Reader { text, runs, .. } = reader;
    log::trace!("read {} bytes of text in {} runs", text.len(), runs.len());
    Ok(RunStore::from_runs(text, runs)?)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Destination {
    Text,
    FontTable,
    /// An `\fface` group inside a font table entry.
    FontFace,
    ColorTable,
    Skip,
}

/// A registered font table entry.
#[derive(Clone, Debug)]
struct FontEntry {
    family: Arc<str>,
    face: Option<Face>,
}

/// The exact face recorded by an `\fface` group.
#[derive(Clone, Debug, Default)]
struct Face {
    member: String,
    weight: Option<i32>,
    slant: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct CharState {
    font: Option<i32>,
    half_points: Option<i32>,
    bold: bool,
    italic: bool,
    color: Option<i32>,
    underline: Option<UnderlineStyle>,
}

#[derive(Clone, Debug)]
struct GroupState {
    destination: Destination,
    chars: CharState,
    paragraph: Option<ParagraphStyle>,
    /// Fallback characters following a `\u` escape.
    unicode_skip: u32,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            destination: Destination::Text,
            chars: CharState::default(),
            paragraph: None,
            unicode_skip: 1,
        }
    }
}

impl Face {
    /// Gives `font` the recorded face. `\b` and `\i` do not apply on top of it.
    fn apply(&self, font: Font) -> Font {
        let weight = self.weight.map_or(FontWeight::NORMAL, |weight| {
            FontWeight::new(weight.clamp(1, 1000) as f32)
        });
        let style = SLANTS
            .iter()
            .find(|(_, slant)| Some(*slant) == self.slant)
            .map_or(FontStyle::Normal, |(style, _)| *style);
        let font = font.with_weight(weight).with_style(style);
        match self.member.trim() {
            "" => font,
            member => font.with_member(member),
        }
    }
}

struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
    state: GroupState,
    stack: Vec<GroupState>,
    /// Fallback characters still to drop after the last `\u` escape.
    pending_skip: u32,
    high_surrogate: Option<u16>,
    pending: String,
    text: String,
    runs: Vec<Run<TextAttributes>>,
    fonts: HashMap<i32, FontEntry>,
    font_entry: Option<i32>,
    font_name: String,
    font_face: Option<Face>,
    default_font: Option<i32>,
    colors: Vec<Option<Color>>,
    color_entry: [Option<u8>; 3],
}

impl<'a> Reader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            state: GroupState::default(),
            stack: Vec::new(),
            pending_skip: 0,
            high_surrogate: None,
            pending: String::new(),
            text: String::new(),
            runs: Vec::new(),
            fonts: HashMap::new(),
            font_entry: None,
            font_name: String::new(),
            font_face: None,
            default_font: None,
            colors: Vec::new(),
            color_entry: [None; 3],
        }
    }

    fn error(&self, reason: &'static str) -> Error {
        Error::deserialization(self.pos, reason)
    }

    fn parse(&mut self) -> Result<(), Error> {
        if !self.input.starts_with(b"{\\rtf") {
            return Err(Error::deserialization(0, "missing RTF header"));
        }
        self.pos = 1;
        self.stack.push(self.state.clone());

        while let Some(&byte) = self.input.get(self.pos) {
            match byte {
                b'{' => {
                    self.flush();
                    if self.stack.len() >= MAX_DEPTH {
                        return Err(self.error("groups nested too deeply"));
                    }
                    self.stack.push(self.state.clone());
                    self.pos += 1;
                }
                b'}' => {
                    self.flush();
                    self.end_table_entry();
                    self.state = self
                        .stack
                        .pop()
                        .ok_or_else(|| self.error("unbalanced group close"))?;
                    self.pos += 1;
                    if self.stack.is_empty() {
                        return self.finish();
                    }
                }
                b'\\' => self.control()?,
                b'\r' | b'\n' => self.pos += 1,
                _ => {
                    self.pos += 1;
                    self.character(char::from(byte));
                }
            }
        }
        Err(self.error("unterminated group"))
    }

    /// Accepts only trailing whitespace and NUL padding after the document group.
    fn finish(&mut self) -> Result<(), Error> {
        let rest = &self.input[self.pos..];
        match rest
            .iter()
            .position(|byte| !byte.is_ascii_whitespace() && *byte != 0)
        {
            Some(offset) => {
                self.pos += offset;
                Err(self.error("trailing data after document"))
            }
            None => Ok(()),
        }
    }

    fn control(&mut self) -> Result<(), Error> {
        let start = self.pos;
        self.pos += 1;
        let Some(&byte) = self.input.get(self.pos) else {
            return Err(self.error("unterminated control sequence"));
        };
        if !byte.is_ascii_alphabetic() {
            self.pos += 1;
            return self.control_symbol(byte, start);
        }

        let word_start = self.pos;
        while self
            .input
            .get(self.pos)
            .is_some_and(|byte| byte.is_ascii_alphabetic())
        {
            self.pos += 1;
            if self.pos - word_start > MAX_WORD_LEN {
                return Err(self.error("control word too long"));
            }
        }
        let input = self.input;
        let word = &input[word_start..self.pos];
        let param = self.parameter()?;
        if self.input.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }
        // Control words are ASCII letters.
        let word = std::str::from_utf8(word).unwrap_or_default();
        self.control_word(word, param);
        Ok(())
    }

    fn parameter(&mut self) -> Result<Option<i32>, Error> {
        let negative = self.input.get(self.pos) == Some(&b'-');
        let digits_start = self.pos + usize::from(negative);
        let mut value: i32 = 0;
        let mut end = digits_start;
        while let Some(digit) = self.input.get(end).filter(|byte| byte.is_ascii_digit()) {
            value = value
                .checked_mul(10)
                .and_then(|value| value.checked_add(i32::from(digit - b'0')))
                .ok_or_else(|| Error::deserialization(end, "control word parameter overflow"))?;
            end += 1;
        }
        if end == digits_start {
            return Ok(None);
        }
        self.pos = end;
        Ok(Some(if negative { -value } else { value }))
    }

    fn control_symbol(&mut self, symbol: u8, start: usize) -> Result<(), Error> {
        match symbol {
            b'\\' | b'{' | b'}' => self.literal(char::from(symbol)),
            b'\'' => {
                let hex = self
                    .input
                    .get(self.pos..self.pos + 2)
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                    .ok_or_else(|| Error::deserialization(start, "malformed hex escape"))?;
                self.pos += 2;
                // Windows-1252 agrees with Latin-1 outside 0x80..0xA0.
                self.literal(char::from(hex));
            }
            b'~' => self.character('\u{a0}'),
            b'_' => self.character('\u{2011}'),
            b'\r' | b'\n' => self.character('\n'),
            b'*' => {
                self.flush();
                self.state.destination = Destination::Skip;
            }
            _ => {}
        }
        Ok(())
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "`\\u` parameters are 16-bit code units and color channels are clamped."
    )]
    fn control_word(&mut self, word: &str, param: Option<i32>) {
        let on = param != Some(0);
        match word {
            "fonttbl" => self.set_destination(Destination::FontTable),
            "colortbl" => {
                self.set_destination(Destination::ColorTable);
                self.color_entry = [None; 3];
            }
            "fface" if self.in_font_entry_group() => {
                self.set_destination(Destination::FontFace);
                self.font_face.get_or_insert_default();
            }
            "fweight" | "fslant" if self.state.destination == Destination::FontFace => {
                let face = self.font_face.get_or_insert_default();
                if word == "fweight" {
                    face.weight = param;
                } else {
                    face.slant = param;
                }
            }
            _ if SKIPPED_DESTINATIONS.contains(&word) => self.set_destination(Destination::Skip),
            "u" => {
                if let Some(value) = param {
                    // Negative values are code units above 0x7FFF.
                    self.unicode(value as u16);
                    self.pending_skip = self.state.unicode_skip;
                }
                return;
            }
            "uc" => self.state.unicode_skip = param.unwrap_or(1).max(0) as u32,
            "deff" => self.default_font = param,
            "f" => match self.state.destination {
                Destination::FontTable => {
                    self.font_entry = param;
                    self.font_name.clear();
                    self.font_face = None;
                }
                _ => self.update_chars(|chars| chars.font = param),
            },
            "red" | "green" | "blue" => {
                let channel = match word {
                    "red" => 0,
                    "green" => 1,
                    _ => 2,
                };
                self.color_entry[channel] = Some(param.unwrap_or(0).clamp(0, 255) as u8);
            }
            "plain" => self.update_chars(|chars| *chars = CharState::default()),
            "fs" => self.update_chars(|chars| chars.half_points = param),
            "b" => self.update_chars(|chars| chars.bold = on),
            "i" => self.update_chars(|chars| chars.italic = on),
            "cf" => self.update_chars(|chars| chars.color = param),
            "ul" => self.update_chars(|chars| {
                chars.underline = Some(if on {
                    UnderlineStyle::Single
                } else {
                    UnderlineStyle::None
                });
            }),
            "uldb" => self.update_chars(|chars| chars.underline = Some(UnderlineStyle::Double)),
            "ulnone" => self.update_chars(|chars| chars.underline = Some(UnderlineStyle::None)),
            "pard" => {
                self.flush();
                self.state.paragraph = None;
            }
            "sa" => {
                self.flush();
                let spacing = param.unwrap_or(0) as f32 / TWIPS_PER_POINT;
                self.state.paragraph.get_or_insert_default().spacing_after = spacing;
            }
            "par" | "line" => self.character('\n'),
            "tab" => self.character('\t'),
            "emdash" => self.character('\u{2014}'),
            "endash" => self.character('\u{2013}'),
            "bullet" => self.character('\u{2022}'),
            "lquote" => self.character('\u{2018}'),
            "rquote" => self.character('\u{2019}'),
            "ldblquote" => self.character('\u{201c}'),
            "rdblquote" => self.character('\u{201d}'),
            _ => {
                if let Some((alignment, _)) = ALIGNMENT_WORDS
                    .iter()
                    .find(|(_, alignment_word)| *alignment_word == word)
                {
                    self.flush();
                    self.state.paragraph.get_or_insert_default().alignment = *alignment;
                } else {
                    log::trace!("ignoring control word \\{word}");
                }
            }
        }
        // A control word counts as one fallback character.
        self.pending_skip = self.pending_skip.saturating_sub(1);
    }

    /// Whether the current group is an ignorable group opened directly inside the font table.
    fn in_font_entry_group(&self) -> bool {
        self.state.destination == Destination::Skip
            && self
                .stack
                .last()
                .is_some_and(|parent| parent.destination == Destination::FontTable)
    }

    fn set_destination(&mut self, destination: Destination) {
        self.flush();
        self.state.destination = destination;
    }

    fn update_chars(&mut self, update: impl FnOnce(&mut CharState)) {
        self.flush();
        update(&mut self.state.chars);
    }

    fn unicode(&mut self, unit: u16) {
        let ch = match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                return;
            }
            (Some(high), 0xDC00..=0xDFFF) => {
                let scalar =
                    0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            (_, unit) => char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER),
        };
        self.emit(ch, true);
    }

    /// Handles one character of content, honoring `\uc` fallback skipping.
    fn character(&mut self, ch: char) {
        self.content(ch, false);
    }

    /// Handles an escaped character, which never ends a table entry.
    fn literal(&mut self, ch: char) {
        self.content(ch, true);
    }

    fn content(&mut self, ch: char, escaped: bool) {
        if self.pending_skip > 0 {
            self.pending_skip -= 1;
            return;
        }
        self.emit(ch, escaped);
    }

    fn emit(&mut self, ch: char, escaped: bool) {
        let delimiter = ch == ';' && !escaped;
        match self.state.destination {
            Destination::Text => self.pending.push(ch),
            Destination::FontTable => {
                if delimiter {
                    self.end_table_entry();
                } else {
                    self.font_name.push(ch);
                }
            }
            Destination::FontFace => self.font_face.get_or_insert_default().member.push(ch),
            Destination::ColorTable => {
                if delimiter {
                    let [r, g, b] = self.color_entry;
                    let color = (r.is_some() || g.is_some() || b.is_some()).then(|| {
                        Color::from_rgb8(r.unwrap_or(0), g.unwrap_or(0), b.unwrap_or(0))
                    });
                    self.colors.push(color);
                    self.color_entry = [None; 3];
                }
            }
            Destination::Skip => {}
        }
    }

    /// Registers the font table entry being read, if any.
    fn end_table_entry(&mut self) {
        if self.state.destination != Destination::FontTable {
            return;
        }
        if let Some(ix) = self.font_entry.take() {
            let name = self.font_name.trim();
            if !name.is_empty() {
                let entry = FontEntry {
                    family: Arc::from(name),
                    face: self.font_face.take(),
                };
                self.fonts.insert(ix, entry);
            }
        }
        self.font_name.clear();
        self.font_face = None;
    }

    /// Appends pending text with the current attributes.
    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let attributes = self.attributes();
        let start = self.text.len();
        self.text.push_str(&self.pending);
        self.pending.clear();
        let end = self.text.len();
        match self.runs.last_mut() {
            Some(last) if last.attributes == attributes => last.range.end = end,
            _ => self.runs.push(Run::new(start..end, attributes)),
        }
    }

    fn attributes(&self) -> TextAttributes {
        let chars = &self.state.chars;
        let font = chars
            .font
            .or(self.default_font)
            .and_then(|ix| {
                let entry = self.fonts.get(&ix);
                if entry.is_none() {
                    log::warn!("font {ix} is not in the font table");
                }
                entry
            })
            .map(|entry| {
                let size = chars
                    .half_points
                    .filter(|half_points| *half_points > 0)
                    .map_or(DEFAULT_FONT_SIZE, |half_points| half_points as f32 / 2.0);
                let font = Font::new(entry.family.clone(), size);
                match &entry.face {
                    Some(face) => face.apply(font),
                    None => font
                        .with_weight(if chars.bold {
                            FontWeight::BOLD
                        } else {
                            FontWeight::NORMAL
                        })
                        .with_style(if chars.italic {
                            FontStyle::Italic
                        } else {
                            FontStyle::Normal
                        }),
                }
            });
        let foreground_color = chars.color.filter(|ix| *ix > 0).and_then(|ix| {
            let color = self.colors.get(ix as usize).copied().flatten();
            if color.is_none() {
                log::warn!("color {ix} is not in the color table");
            }
            color
        });
        TextAttributes {
            font,
            foreground_color,
            paragraph_style: self.state.paragraph.clone(),
            underline_style: chars.underline,
        }
    }
}
