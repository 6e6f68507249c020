//! Binary tag reader
//!
//! ## Layout (all big-endian, no padding)
//!
//! ```text
//! named tag  := kind:u8 name:string payload      (kind != End)
//! string     := len:u16 utf8[len]
//! Byte/Short/Int/Long/Float/Double := 1/2/4/8/4/8 bytes
//! ByteArray/IntArray/LongArray     := len:i32 element[len]
//! List       := element_kind:u8 count:i32 payload[count]   (unnamed)
//! Compound   := named tag* End:u8
//! ```
//!
//! Any malformed input is a [`FormatError`]; no partial tree is returned.

use byteorder::{BigEndian, ReadBytesExt};
use nbtkit_core::{FormatError, Tag, TagKind, TagList, TagValue};
use std::io::{self, Cursor};
use std::sync::Arc;

/// Reads tags from an in-memory buffer
pub struct TagReader<'a> {
    cursor: Cursor<&'a [u8]>,
    max_depth: usize,
}

impl<'a> TagReader<'a> {
    /// Reader over `data` that refuses nesting deeper than `max_depth`
    pub fn new(data: &'a [u8], max_depth: usize) -> Self {
        TagReader {
            cursor: Cursor::new(data),
            max_depth,
        }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    /// Read the root tag
    ///
    /// A root of kind End is a single zero byte and carries no name.
    pub fn read_root(&mut self) -> Result<Tag, FormatError> {
        let kind = self.read_kind()?;
        if kind == TagKind::End {
            return Ok(Tag::end());
        }
        let name = self.read_string()?;
        let value = self.read_payload(kind, 0)?;
        Ok(Tag {
            name: Some(name),
            value,
        })
    }

    fn read<T, F>(&mut self, needed: usize, f: F) -> Result<T, FormatError>
    where
        F: FnOnce(&mut Cursor<&'a [u8]>) -> io::Result<T>,
    {
        let offset = self.position();
        f(&mut self.cursor).map_err(|_| FormatError::UnexpectedEof { offset, needed })
    }

    fn ensure(&self, needed: usize) -> Result<(), FormatError> {
        if self.remaining() < needed {
            return Err(FormatError::UnexpectedEof {
                offset: self.position(),
                needed,
            });
        }
        Ok(())
    }

    fn read_kind(&mut self) -> Result<TagKind, FormatError> {
        let offset = self.position();
        let id = self.read(1, |c| c.read_u8())?;
        TagKind::from_id(id).ok_or(FormatError::UnknownKind { id, offset })
    }

    fn read_string(&mut self) -> Result<String, FormatError> {
        let len = self.read(2, |c| c.read_u16::<BigEndian>())? as usize;
        let bytes = self.take(len)?;
        let offset = self.position() - len;
        String::from_utf8(bytes.to_vec()).map_err(|_| FormatError::InvalidUtf8 { offset })
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        self.ensure(len)?;
        let start = self.position();
        let data: &'a [u8] = *self.cursor.get_ref();
        self.cursor.set_position((start + len) as u64);
        Ok(&data[start..start + len])
    }

    /// Read an i32 length prefix, rejecting negative values
    fn read_len(&mut self) -> Result<usize, FormatError> {
        let offset = self.position();
        let length = self.read(4, |c| c.read_i32::<BigEndian>())?;
        if length < 0 {
            return Err(FormatError::NegativeLength { length, offset });
        }
        Ok(length as usize)
    }

    /// Read a length-prefixed array, checking the whole body is present
    /// before allocating for it
    fn read_array<T, F>(&mut self, width: usize, mut read_one: F) -> Result<Vec<T>, FormatError>
    where
        F: FnMut(&mut Cursor<&'a [u8]>) -> io::Result<T>,
    {
        let len = self.read_len()?;
        let body = len.checked_mul(width).ok_or(FormatError::UnexpectedEof {
            offset: self.position(),
            needed: usize::MAX,
        })?;
        self.ensure(body)?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.read(width, &mut read_one)?);
        }
        Ok(out)
    }

    fn enter(&self, depth: usize) -> Result<usize, FormatError> {
        let next = depth + 1;
        if next > self.max_depth {
            return Err(FormatError::DepthExceeded {
                max: self.max_depth,
            });
        }
        Ok(next)
    }

    fn read_payload(&mut self, kind: TagKind, depth: usize) -> Result<TagValue, FormatError> {
        let value = match kind {
            TagKind::End => TagValue::End,
            TagKind::Byte => TagValue::Byte(self.read(1, |c| c.read_i8())?),
            TagKind::Short => TagValue::Short(self.read(2, |c| c.read_i16::<BigEndian>())?),
            TagKind::Int => TagValue::Int(self.read(4, |c| c.read_i32::<BigEndian>())?),
            TagKind::Long => TagValue::Long(self.read(8, |c| c.read_i64::<BigEndian>())?),
            TagKind::Float => TagValue::Float(self.read(4, |c| c.read_f32::<BigEndian>())?),
            TagKind::Double => TagValue::Double(self.read(8, |c| c.read_f64::<BigEndian>())?),
            TagKind::String => TagValue::String(self.read_string()?),
            TagKind::ByteArray => TagValue::ByteArray(self.read_array(1, |c| c.read_i8())?),
            TagKind::IntArray => {
                TagValue::IntArray(self.read_array(4, |c| c.read_i32::<BigEndian>())?)
            }
            TagKind::LongArray => {
                TagValue::LongArray(self.read_array(8, |c| c.read_i64::<BigEndian>())?)
            }
            TagKind::List => {
                let depth = self.enter(depth)?;
                let header = self.position();
                let element_kind = self.read_kind()?;
                let count_offset = self.position();
                let count = self.read(4, |c| c.read_i32::<BigEndian>())?;
                if count < 0 {
                    return Err(FormatError::NegativeLength {
                        length: count,
                        offset: count_offset,
                    });
                }
                if element_kind == TagKind::End && count > 0 {
                    return Err(FormatError::EndListWithItems {
                        count,
                        offset: header,
                    });
                }
                // Elements are at least one byte wide, so capacity never
                // needs to exceed what is left; a forged count fails on the
                // first missing element
                let count = count as usize;
                let mut items = Vec::with_capacity(count.min(self.remaining()));
                for _ in 0..count {
                    let value = self.read_payload(element_kind, depth)?;
                    items.push(Arc::new(Tag::unnamed(value)));
                }
                TagValue::List(TagList::from_shared(element_kind, items)?)
            }
            TagKind::Compound => {
                let depth = self.enter(depth)?;
                let mut children = Vec::new();
                loop {
                    let kind = self.read_kind()?;
                    if kind == TagKind::End {
                        break;
                    }
                    let name = self.read_string()?;
                    let value = self.read_payload(kind, depth)?;
                    children.push(Arc::new(Tag {
                        name: Some(name),
                        value,
                    }));
                }
                TagValue::Compound(children)
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(bytes: &[u8]) -> Result<Tag, FormatError> {
        TagReader::new(bytes, 512).read_root()
    }

    #[test]
    fn test_read_end_root() {
        assert_eq!(read(&[0]).unwrap(), Tag::end());
    }

    #[test]
    fn test_read_named_int() {
        let bytes = [3, 0, 1, b'x', 0, 0, 0, 42];
        assert_eq!(read(&bytes).unwrap(), Tag::int("x", 42));
    }

    #[test]
    fn test_read_long_exact() {
        let mut bytes = vec![4, 0, 0];
        bytes.extend_from_slice(&i64::MIN.to_be_bytes());
        assert_eq!(read(&bytes).unwrap().value, TagValue::Long(i64::MIN));
    }

    #[test]
    fn test_empty_buffer_is_eof() {
        assert_eq!(
            read(&[]),
            Err(FormatError::UnexpectedEof {
                offset: 0,
                needed: 1
            })
        );
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            read(&[13, 0, 0]),
            Err(FormatError::UnknownKind { id: 13, offset: 0 })
        );
    }

    #[test]
    fn test_truncated_name() {
        assert!(matches!(
            read(&[3, 0, 5, b'a']),
            Err(FormatError::UnexpectedEof { offset: 3, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_name() {
        assert_eq!(
            read(&[1, 0, 1, 0xFF, 7]),
            Err(FormatError::InvalidUtf8 { offset: 3 })
        );
    }

    #[test]
    fn test_negative_array_length() {
        let bytes = [11, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(
            read(&bytes),
            Err(FormatError::NegativeLength {
                length: -1,
                offset: 3
            })
        );
    }

    #[test]
    fn test_forged_array_length_fails_before_allocating() {
        // IntArray claiming i32::MAX elements with a 4 byte body
        let bytes = [11, 0, 0, 0x7F, 0xFF, 0xFF, 0xFF, 0, 0, 0, 1];
        assert!(matches!(
            read(&bytes),
            Err(FormatError::UnexpectedEof { offset: 7, .. })
        ));
    }

    #[test]
    fn test_end_list_with_items() {
        let bytes = [9, 0, 0, 0, 0, 0, 0, 2];
        assert_eq!(
            read(&bytes),
            Err(FormatError::EndListWithItems {
                count: 2,
                offset: 3
            })
        );
    }

    #[test]
    fn test_empty_end_list_is_fine() {
        let bytes = [9, 0, 0, 0, 0, 0, 0, 0];
        let tag = read(&bytes).unwrap();
        assert_eq!(tag.value, TagValue::List(TagList::empty()));
    }

    #[test]
    fn test_negative_list_count() {
        let bytes = [9, 0, 0, 3, 0xFF, 0xFF, 0xFF, 0xFE];
        assert_eq!(
            read(&bytes),
            Err(FormatError::NegativeLength {
                length: -2,
                offset: 4
            })
        );
    }

    #[test]
    fn test_list_elements_are_unnamed() {
        // List of 2 Shorts: 1, -1
        let bytes = [9, 0, 1, b'l', 2, 0, 0, 0, 2, 0, 1, 0xFF, 0xFF];
        let tag = read(&bytes).unwrap();
        let list = tag.value.as_list().unwrap();
        assert_eq!(list.element_kind(), TagKind::Short);
        assert_eq!(list.get(0), Some(&Tag::unnamed(1i16)));
        assert_eq!(list.get(1), Some(&Tag::unnamed(-1i16)));
    }

    #[test]
    fn test_compound_missing_end_is_eof() {
        let bytes = [10, 0, 0, 1, 0, 1, b'b', 7];
        assert!(matches!(
            read(&bytes),
            Err(FormatError::UnexpectedEof { offset: 8, .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        // Three nested compounds with a limit of two
        let bytes = [10, 0, 0, 10, 0, 1, b'a', 10, 0, 1, b'b', 0, 0, 0];
        assert!(TagReader::new(&bytes, 3).read_root().is_ok());
        assert_eq!(
            TagReader::new(&bytes, 2).read_root(),
            Err(FormatError::DepthExceeded { max: 2 })
        );
    }

    #[test]
    fn test_remaining_after_root() {
        let bytes = [1, 0, 0, 5, 0xAA, 0xBB];
        let mut reader = TagReader::new(&bytes, 512);
        reader.read_root().unwrap();
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining(), 2);
    }
}
