//! Stringified tag notation
//!
//! A stable, compression-agnostic text form of any subtree, meant for
//! display and for handing a subtree to a text-only collaborator.
//!
//! ```text
//! {XpLevel:5,Name:"Steve",Pos:[0.5d,64.0d],Seed:-4172144997902289642L,Data:[B;1b,2b]}
//! ```
//!
//! | Kind | Form |
//! |------|------|
//! | Byte / Short / Int / Long | `1b` `1s` `1` `1L` |
//! | Float / Double | `1.5f` `1.5d`, non-finite as `NaNf` `Infinityd` `-Infinityf` |
//! | String | `"text"` with `\"` and `\\` escaped |
//! | ByteArray / IntArray / LongArray | `[B;1b]` `[I;1]` `[L;1L]` |
//! | List / Compound | `[a,b]` `{key:value}` |
//!
//! 64-bit values are written as exact decimal. A named root is rendered as
//! `name: value`; an unnamed or empty-named root as the value alone.

use crate::tag::{Tag, TagValue};
use std::fmt;

/// Layout of the rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    /// Single line, no spaces
    #[default]
    Compact,
    /// One entry per line, indented by the given number of spaces
    Pretty {
        /// Spaces per nesting level
        indent: usize,
    },
}

/// Output of [`render_bounded`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Rendered text, at most the requested number of bytes
    pub text: String,
    /// True if the text was cut short
    pub truncated: bool,
}

/// Render a tag in full
pub fn render(tag: &Tag, style: TextStyle) -> String {
    let mut writer = TextWriter::new(style, None);
    writer.write_tag(tag);
    writer.out
}

/// Render a tag, stopping once `max_bytes` is reached
///
/// The cut always falls on a character boundary.
pub fn render_bounded(tag: &Tag, style: TextStyle, max_bytes: usize) -> Rendered {
    let mut writer = TextWriter::new(style, Some(max_bytes));
    writer.write_tag(tag);
    let mut text = writer.out;
    let truncated = text.len() > max_bytes;
    if truncated {
        let mut cut = max_bytes;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
    Rendered { text, truncated }
}

/// Compact rendering of a payload without any name
pub fn value_to_string(value: &TagValue) -> String {
    let mut writer = TextWriter::new(TextStyle::Compact, None);
    writer.write_value(value, 0);
    writer.out
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, TextStyle::Compact))
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
}

/// Spelling of NaN and the infinities, shared by Float and Double
fn non_finite_name(v: f64) -> Option<&'static str> {
    if v.is_nan() {
        Some("NaN")
    } else if v == f64::INFINITY {
        Some("Infinity")
    } else if v == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

struct TextWriter {
    out: String,
    style: TextStyle,
    limit: Option<usize>,
}

impl TextWriter {
    fn new(style: TextStyle, limit: Option<usize>) -> Self {
        TextWriter {
            out: String::new(),
            style,
            limit,
        }
    }

    fn full(&self) -> bool {
        self.limit.map_or(false, |limit| self.out.len() > limit)
    }

    fn write_tag(&mut self, tag: &Tag) {
        match tag.name.as_deref() {
            Some(name) if !name.is_empty() => {
                self.write_key(name);
                self.out.push_str(": ");
            }
            _ => {}
        }
        self.write_value(&tag.value, 0);
    }

    fn write_key(&mut self, key: &str) {
        if is_bare_key(key) {
            self.out.push_str(key);
        } else {
            self.write_quoted(key);
        }
    }

    fn write_quoted(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            if c == '"' || c == '\\' {
                self.out.push('\\');
            }
            self.out.push(c);
        }
        self.out.push('"');
    }

    fn newline(&mut self, depth: usize) {
        if let TextStyle::Pretty { indent } = self.style {
            self.out.push('\n');
            for _ in 0..indent * depth {
                self.out.push(' ');
            }
        }
    }

    fn write_number(&mut self, digits: impl fmt::Display, suffix: &str) {
        self.out.push_str(&digits.to_string());
        self.out.push_str(suffix);
    }

    fn write_float(&mut self, v: f64, debug_digits: String, suffix: &str) {
        match non_finite_name(v) {
            Some(name) => self.out.push_str(name),
            None => self.out.push_str(&debug_digits),
        }
        self.out.push_str(suffix);
    }

    fn write_value(&mut self, value: &TagValue, depth: usize) {
        match value {
            TagValue::End => {}
            TagValue::Byte(v) => self.write_number(v, "b"),
            TagValue::Short(v) => self.write_number(v, "s"),
            TagValue::Int(v) => self.write_number(v, ""),
            TagValue::Long(v) => self.write_number(v, "L"),
            TagValue::Float(v) => self.write_float(f64::from(*v), format!("{:?}", v), "f"),
            TagValue::Double(v) => self.write_float(*v, format!("{:?}", v), "d"),
            TagValue::String(s) => self.write_quoted(s),
            TagValue::ByteArray(v) => {
                self.write_array("B", v.iter().map(|x| format!("{}b", x)));
            }
            TagValue::IntArray(v) => {
                self.write_array("I", v.iter().map(|x| x.to_string()));
            }
            TagValue::LongArray(v) => {
                self.write_array("L", v.iter().map(|x| format!("{}L", x)));
            }
            TagValue::List(list) => {
                self.out.push('[');
                for (i, item) in list.items().iter().enumerate() {
                    if self.full() {
                        break;
                    }
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.newline(depth + 1);
                    self.write_value(&item.value, depth + 1);
                }
                if !list.is_empty() {
                    self.newline(depth);
                }
                self.out.push(']');
            }
            TagValue::Compound(children) => {
                self.out.push('{');
                for (i, child) in children.iter().enumerate() {
                    if self.full() {
                        break;
                    }
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.newline(depth + 1);
                    self.write_key(child.name.as_deref().unwrap_or(""));
                    self.out.push(':');
                    if matches!(self.style, TextStyle::Pretty { .. }) {
                        self.out.push(' ');
                    }
                    self.write_value(&child.value, depth + 1);
                }
                if !children.is_empty() {
                    self.newline(depth);
                }
                self.out.push('}');
            }
        }
    }

    fn write_array<I>(&mut self, prefix: &str, items: I)
    where
        I: Iterator<Item = String>,
    {
        self.out.push('[');
        self.out.push_str(prefix);
        self.out.push(';');
        for (i, item) in items.enumerate() {
            if self.full() {
                break;
            }
            if i > 0 {
                self.out.push(',');
            }
            self.out.push_str(&item);
        }
        self.out.push(']');
    }
}
