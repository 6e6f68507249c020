//! Text input for inline value editors
//!
//! Parsing is strict. Integer kinds take only integral text inside the
//! kind's range; `3.5` or `300` for a Byte is an error, never a rounded or
//! wrapped value. Long is parsed directly as `i64`, so every value in its
//! range is exact.

use nbtkit_core::limits::MAX_STRING_BYTES;
use nbtkit_core::{EditError, TagKind, TagValue};
use std::str::FromStr;

/// Parse `text` as a payload of `kind`
///
/// Numbers may be surrounded by whitespace. String text is taken verbatim.
/// Arrays take elements separated by commas and/or whitespace; empty text
/// is an empty array.
pub fn parse_value(kind: TagKind, text: &str) -> Result<TagValue, EditError> {
    let value = match kind {
        TagKind::Byte => TagValue::Byte(parse_int(kind, text)?),
        TagKind::Short => TagValue::Short(parse_int(kind, text)?),
        TagKind::Int => TagValue::Int(parse_int(kind, text)?),
        TagKind::Long => TagValue::Long(parse_int(kind, text)?),
        TagKind::Float => {
            let v = parse_float(kind, text)?;
            if v.is_finite() && v.abs() > f64::from(f32::MAX) {
                return Err(out_of_range(kind, text));
            }
            TagValue::Float(v as f32)
        }
        TagKind::Double => TagValue::Double(parse_float(kind, text)?),
        TagKind::String => {
            if text.len() > MAX_STRING_BYTES {
                return Err(invalid(kind, text, "longer than 65535 bytes"));
            }
            TagValue::String(text.to_string())
        }
        TagKind::ByteArray => TagValue::ByteArray(parse_elements(TagKind::Byte, text)?),
        TagKind::IntArray => TagValue::IntArray(parse_elements(TagKind::Int, text)?),
        TagKind::LongArray => TagValue::LongArray(parse_elements(TagKind::Long, text)?),
        TagKind::End | TagKind::List | TagKind::Compound => {
            return Err(invalid(kind, text, "not editable as text"))
        }
    };
    Ok(value)
}

/// Editable text for a payload, or `None` for End, List and Compound
///
/// `parse_value(value.kind(), &edit_text(value)?)` gives back `value`.
pub fn edit_text(value: &TagValue) -> Option<String> {
    let text = match value {
        TagValue::Byte(v) => v.to_string(),
        TagValue::Short(v) => v.to_string(),
        TagValue::Int(v) => v.to_string(),
        TagValue::Long(v) => v.to_string(),
        TagValue::Float(v) => v.to_string(),
        TagValue::Double(v) => v.to_string(),
        TagValue::String(s) => s.clone(),
        TagValue::ByteArray(v) => join(v),
        TagValue::IntArray(v) => join(v),
        TagValue::LongArray(v) => join(v),
        TagValue::End | TagValue::List(_) | TagValue::Compound(_) => return None,
    };
    Some(text)
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_int<T: FromStr>(kind: TagKind, text: &str) -> Result<T, EditError> {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<T>() {
        return Ok(v);
    }
    if is_integer_literal(trimmed) {
        return Err(out_of_range(kind, text));
    }
    if trimmed.parse::<f64>().is_ok() {
        return Err(invalid(kind, text, "not an integer"));
    }
    Err(invalid(kind, text, "not a number"))
}

fn parse_float(kind: TagKind, text: &str) -> Result<f64, EditError> {
    let trimmed = text.trim();
    let v: f64 = trimmed
        .parse()
        .map_err(|_| invalid(kind, text, "not a number"))?;
    // Overflowing literals parse to infinity; only accept it when spelled out
    if v.is_infinite() && !trimmed.to_ascii_lowercase().contains("inf") {
        return Err(out_of_range(kind, text));
    }
    Ok(v)
}

fn parse_elements<T: FromStr>(kind: TagKind, text: &str) -> Result<Vec<T>, EditError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| parse_int(kind, s))
        .collect()
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn invalid(kind: TagKind, input: &str, reason: &str) -> EditError {
    EditError::InvalidValue {
        kind,
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

fn out_of_range(kind: TagKind, input: &str) -> EditError {
    EditError::OutOfRange {
        kind,
        input: input.to_string(),
    }
}
