//! Binary tag writer
//!
//! Mirror of [`crate::reader`]. The writer never truncates: the whole tree
//! is validated before the first byte goes out, so a string or sequence
//! that does not fit its length prefix, or a tree that breaks a model rule,
//! is a [`FormatError`] with nothing written to the sink.

use byteorder::{BigEndian, WriteBytesExt};
use nbtkit_core::limits::{MAX_SEQUENCE_LEN, MAX_STRING_BYTES};
use nbtkit_core::{FormatError, Result, Tag, TagError, TagKind, TagValue};
use std::io::Write;

/// Writes tags to any byte sink
pub struct TagWriter<W: Write> {
    out: W,
}

impl<W: Write> TagWriter<W> {
    /// Writer over `out`
    pub fn new(out: W) -> Self {
        TagWriter { out }
    }

    /// Recover the sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the root tag
    ///
    /// An End root is a single zero byte. Any other root is written as a
    /// named tag; a missing name is written as the empty string.
    pub fn write_root(&mut self, root: &Tag) -> Result<()> {
        root.validate().map_err(invalid_tree)?;
        if root.kind() == TagKind::End {
            self.out.write_u8(TagKind::End.id())?;
            return Ok(());
        }
        self.write_named(root.name.as_deref().unwrap_or(""), &root.value)
    }

    fn write_named(&mut self, name: &str, value: &TagValue) -> Result<()> {
        check_string(name)?;
        self.out.write_u8(value.kind().id())?;
        self.write_string(name)?;
        self.write_payload(value)
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let len = check_string(s)?;
        self.out.write_u16::<BigEndian>(len)?;
        self.out.write_all(s.as_bytes())?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = check_sequence(len)?;
        self.out.write_i32::<BigEndian>(len)?;
        Ok(())
    }

    fn write_payload(&mut self, value: &TagValue) -> Result<()> {
        match value {
            TagValue::End => {}
            TagValue::Byte(v) => self.out.write_i8(*v)?,
            TagValue::Short(v) => self.out.write_i16::<BigEndian>(*v)?,
            TagValue::Int(v) => self.out.write_i32::<BigEndian>(*v)?,
            TagValue::Long(v) => self.out.write_i64::<BigEndian>(*v)?,
            TagValue::Float(v) => self.out.write_f32::<BigEndian>(*v)?,
            TagValue::Double(v) => self.out.write_f64::<BigEndian>(*v)?,
            TagValue::String(s) => self.write_string(s)?,
            TagValue::ByteArray(v) => {
                self.write_len(v.len())?;
                for b in v {
                    self.out.write_i8(*b)?;
                }
            }
            TagValue::IntArray(v) => {
                self.write_len(v.len())?;
                for n in v {
                    self.out.write_i32::<BigEndian>(*n)?;
                }
            }
            TagValue::LongArray(v) => {
                self.write_len(v.len())?;
                for n in v {
                    self.out.write_i64::<BigEndian>(*n)?;
                }
            }
            TagValue::List(list) => {
                let kind = list.element_kind();
                if kind == TagKind::End && !list.is_empty() {
                    return Err(tree_error(TagError::EndListNotEmpty { len: list.len() }));
                }
                self.out.write_u8(kind.id())?;
                self.write_len(list.len())?;
                for (index, item) in list.items().iter().enumerate() {
                    if item.name.is_some() {
                        return Err(tree_error(TagError::NamedListElement { index }));
                    }
                    if item.kind() != kind {
                        return Err(tree_error(TagError::ListKindMismatch {
                            index,
                            expected: kind,
                            found: item.kind(),
                        }));
                    }
                    self.write_payload(&item.value)?;
                }
            }
            TagValue::Compound(children) => {
                for (index, child) in children.iter().enumerate() {
                    let name = child
                        .name
                        .as_deref()
                        .ok_or_else(|| tree_error(TagError::UnnamedCompoundChild { index }))?;
                    if child.kind() == TagKind::End {
                        return Err(tree_error(TagError::EndInCompound { index }));
                    }
                    self.write_named(name, &child.value)?;
                }
                self.out.write_u8(TagKind::End.id())?;
            }
        }
        Ok(())
    }
}

fn tree_error(e: TagError) -> nbtkit_core::Error {
    FormatError::InvalidTree(e).into()
}

fn invalid_tree(e: TagError) -> FormatError {
    match e {
        TagError::StringTooLong { length } => FormatError::StringTooLong { length },
        TagError::SequenceTooLong { length } => FormatError::LengthOverflow { length },
        other => FormatError::InvalidTree(other),
    }
}

fn check_string(s: &str) -> std::result::Result<u16, FormatError> {
    if s.len() > MAX_STRING_BYTES {
        return Err(FormatError::StringTooLong { length: s.len() });
    }
    Ok(s.len() as u16)
}

fn check_sequence(len: usize) -> std::result::Result<i32, FormatError> {
    if len > MAX_SEQUENCE_LEN {
        return Err(FormatError::LengthOverflow { length: len });
    }
    Ok(len as i32)
}
