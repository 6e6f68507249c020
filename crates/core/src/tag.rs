//! Tag model
//!
//! This module defines:
//! - TagKind: the 13 wire discriminants (End=0 ... LongArray=12)
//! - TagValue: the payload shaped by the kind
//! - TagList: a homogeneous, unnamed element sequence with a declared kind
//! - Tag: a payload plus an optional name
//!
//! ## Tree Rules
//!
//! - The root is named (possibly empty) unless it is End
//! - Every compound child is named, never End; names may repeat
//! - List elements are unnamed and all carry the declared element kind
//! - An empty list keeps its declared kind; a list of End is always empty
//! - Long and LongArray hold native `i64`, never a float
//!
//! ## Sharing
//!
//! Container children are `Arc<Tag>`. Trees are never mutated once built,
//! so unmodified subtrees are shared freely between snapshots. Use
//! [`Tag::deep_copy`] to get a tree with no shared allocations.
//!
//! ## Equality
//!
//! Structural. Floats compare by bit pattern: `NaN == NaN` when the payload
//! bits match and `0.0 != -0.0`. This keeps `decode(encode(t)) == t` exact.

use crate::error::TagError;
use crate::limits::{MAX_SEQUENCE_LEN, MAX_STRING_BYTES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Wire discriminant of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TagKind {
    /// Compound terminator / empty document
    End = 0,
    /// Signed 8-bit integer
    Byte = 1,
    /// Signed 16-bit integer
    Short = 2,
    /// Signed 32-bit integer
    Int = 3,
    /// Signed 64-bit integer
    Long = 4,
    /// IEEE-754 single
    Float = 5,
    /// IEEE-754 double
    Double = 6,
    /// Sequence of signed bytes
    ByteArray = 7,
    /// UTF-8 text
    String = 8,
    /// Homogeneous sequence of unnamed tags
    List = 9,
    /// Ordered sequence of named tags
    Compound = 10,
    /// Sequence of signed 32-bit integers
    IntArray = 11,
    /// Sequence of signed 64-bit integers
    LongArray = 12,
}

impl TagKind {
    /// All kinds in wire order
    pub const ALL: [TagKind; 13] = [
        TagKind::End,
        TagKind::Byte,
        TagKind::Short,
        TagKind::Int,
        TagKind::Long,
        TagKind::Float,
        TagKind::Double,
        TagKind::ByteArray,
        TagKind::String,
        TagKind::List,
        TagKind::Compound,
        TagKind::IntArray,
        TagKind::LongArray,
    ];

    /// Map a wire byte to a kind
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Wire byte for this kind
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            TagKind::End => "End",
            TagKind::Byte => "Byte",
            TagKind::Short => "Short",
            TagKind::Int => "Int",
            TagKind::Long => "Long",
            TagKind::Float => "Float",
            TagKind::Double => "Double",
            TagKind::ByteArray => "ByteArray",
            TagKind::String => "String",
            TagKind::List => "List",
            TagKind::Compound => "Compound",
            TagKind::IntArray => "IntArray",
            TagKind::LongArray => "LongArray",
        }
    }

    /// Byte, Short, Int or Long
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            TagKind::Byte | TagKind::Short | TagKind::Int | TagKind::Long
        )
    }

    /// Float or Double
    pub fn is_float(self) -> bool {
        matches!(self, TagKind::Float | TagKind::Double)
    }

    /// ByteArray, IntArray or LongArray
    pub fn is_array(self) -> bool {
        matches!(
            self,
            TagKind::ByteArray | TagKind::IntArray | TagKind::LongArray
        )
    }

    /// List or Compound
    pub fn is_container(self) -> bool {
        matches!(self, TagKind::List | TagKind::Compound)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of a tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TagValue {
    /// No payload
    End,
    /// Signed 8-bit integer
    Byte(i8),
    /// Signed 16-bit integer
    Short(i16),
    /// Signed 32-bit integer
    Int(i32),
    /// Signed 64-bit integer
    Long(i64),
    /// IEEE-754 single
    Float(f32),
    /// IEEE-754 double
    Double(f64),
    /// Sequence of signed bytes
    ByteArray(Vec<i8>),
    /// UTF-8 text
    String(String),
    /// Homogeneous unnamed sequence
    List(TagList),
    /// Named children in stored order
    Compound(Vec<Arc<Tag>>),
    /// Sequence of signed 32-bit integers
    IntArray(Vec<i32>),
    /// Sequence of signed 64-bit integers
    LongArray(Vec<i64>),
}

// Bitwise float equality so NaN payloads survive round-trip comparisons
impl PartialEq for TagValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TagValue::End, TagValue::End) => true,
            (TagValue::Byte(a), TagValue::Byte(b)) => a == b,
            (TagValue::Short(a), TagValue::Short(b)) => a == b,
            (TagValue::Int(a), TagValue::Int(b)) => a == b,
            (TagValue::Long(a), TagValue::Long(b)) => a == b,
            (TagValue::Float(a), TagValue::Float(b)) => a.to_bits() == b.to_bits(),
            (TagValue::Double(a), TagValue::Double(b)) => a.to_bits() == b.to_bits(),
            (TagValue::ByteArray(a), TagValue::ByteArray(b)) => a == b,
            (TagValue::String(a), TagValue::String(b)) => a == b,
            (TagValue::List(a), TagValue::List(b)) => a == b,
            (TagValue::Compound(a), TagValue::Compound(b)) => a == b,
            (TagValue::IntArray(a), TagValue::IntArray(b)) => a == b,
            (TagValue::LongArray(a), TagValue::LongArray(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TagValue {}

impl TagValue {
    /// Kind of this payload
    pub fn kind(&self) -> TagKind {
        match self {
            TagValue::End => TagKind::End,
            TagValue::Byte(_) => TagKind::Byte,
            TagValue::Short(_) => TagKind::Short,
            TagValue::Int(_) => TagKind::Int,
            TagValue::Long(_) => TagKind::Long,
            TagValue::Float(_) => TagKind::Float,
            TagValue::Double(_) => TagKind::Double,
            TagValue::ByteArray(_) => TagKind::ByteArray,
            TagValue::String(_) => TagKind::String,
            TagValue::List(_) => TagKind::List,
            TagValue::Compound(_) => TagKind::Compound,
            TagValue::IntArray(_) => TagKind::IntArray,
            TagValue::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Zero/empty payload for a kind
    ///
    /// Numbers are zero, strings and arrays empty, a compound has no
    /// children and a list is empty with element kind End. End has no
    /// default and returns `None`.
    pub fn default_for(kind: TagKind) -> Option<TagValue> {
        let value = match kind {
            TagKind::End => return None,
            TagKind::Byte => TagValue::Byte(0),
            TagKind::Short => TagValue::Short(0),
            TagKind::Int => TagValue::Int(0),
            TagKind::Long => TagValue::Long(0),
            TagKind::Float => TagValue::Float(0.0),
            TagKind::Double => TagValue::Double(0.0),
            TagKind::ByteArray => TagValue::ByteArray(Vec::new()),
            TagKind::String => TagValue::String(String::new()),
            TagKind::List => TagValue::List(TagList::empty()),
            TagKind::Compound => TagValue::Compound(Vec::new()),
            TagKind::IntArray => TagValue::IntArray(Vec::new()),
            TagKind::LongArray => TagValue::LongArray(Vec::new()),
        };
        Some(value)
    }

    /// Build a compound payload from owned children
    pub fn compound(children: Vec<Tag>) -> Self {
        TagValue::Compound(children.into_iter().map(Arc::new).collect())
    }

    /// Integer payload widened to i64 (Byte, Short, Int, Long)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::Byte(v) => Some(i64::from(*v)),
            TagValue::Short(v) => Some(i64::from(*v)),
            TagValue::Int(v) => Some(i64::from(*v)),
            TagValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload widened to f64 (Float, Double)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Float(v) => Some(f64::from(*v)),
            TagValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// List payload
    pub fn as_list(&self) -> Option<&TagList> {
        match self {
            TagValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Compound children
    pub fn as_compound(&self) -> Option<&[Arc<Tag>]> {
        match self {
            TagValue::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Type-aware recursive copy with no shared allocations
    pub fn deep_copy(&self) -> TagValue {
        match self {
            TagValue::List(list) => TagValue::List(TagList {
                element_kind: list.element_kind,
                items: list
                    .items
                    .iter()
                    .map(|item| Arc::new(item.deep_copy()))
                    .collect(),
            }),
            TagValue::Compound(children) => TagValue::Compound(
                children
                    .iter()
                    .map(|child| Arc::new(child.deep_copy()))
                    .collect(),
            ),
            TagValue::ByteArray(v) => TagValue::ByteArray(v.to_vec()),
            TagValue::IntArray(v) => TagValue::IntArray(v.to_vec()),
            TagValue::LongArray(v) => TagValue::LongArray(v.to_vec()),
            scalar => scalar.clone(),
        }
    }

    /// Check every invariant below this payload
    ///
    /// Covers the tree rules and the wire length limits, so a payload that
    /// passes can always be encoded.
    pub fn validate(&self) -> Result<(), TagError> {
        match self {
            TagValue::String(s) => check_string_len(s),
            TagValue::ByteArray(v) => check_sequence_len(v.len()),
            TagValue::IntArray(v) => check_sequence_len(v.len()),
            TagValue::LongArray(v) => check_sequence_len(v.len()),
            TagValue::List(list) => {
                check_sequence_len(list.items.len())?;
                check_list_items(list.element_kind, &list.items)?;
                list.items.iter().try_for_each(|item| item.value.validate())
            }
            TagValue::Compound(children) => {
                check_compound_children(children)?;
                children.iter().try_for_each(|child| child.value.validate())
            }
            _ => Ok(()),
        }
    }
}

macro_rules! impl_from_payload {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TagValue {
                fn from(v: $ty) -> Self {
                    TagValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_payload! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    Vec<i8> => ByteArray,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
    TagList => List,
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::String(s.to_string())
    }
}

/// Homogeneous sequence of unnamed tags with a declared element kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TagListRepr")]
pub struct TagList {
    element_kind: TagKind,
    items: Vec<Arc<Tag>>,
}

#[derive(Deserialize)]
struct TagListRepr {
    element_kind: TagKind,
    items: Vec<Arc<Tag>>,
}

impl TryFrom<TagListRepr> for TagList {
    type Error = TagError;

    fn try_from(repr: TagListRepr) -> Result<Self, Self::Error> {
        TagList::from_shared(repr.element_kind, repr.items)
    }
}

impl Default for TagList {
    fn default() -> Self {
        Self::empty()
    }
}

impl TagList {
    /// Empty list declaring `element_kind`
    pub fn new(element_kind: TagKind) -> Self {
        TagList {
            element_kind,
            items: Vec::new(),
        }
    }

    /// Empty list declaring End (newly constructed, no kind chosen yet)
    pub fn empty() -> Self {
        Self::new(TagKind::End)
    }

    /// Build a list from owned elements, checking kind and name of each
    pub fn from_items(element_kind: TagKind, items: Vec<Tag>) -> Result<Self, TagError> {
        Self::from_shared(element_kind, items.into_iter().map(Arc::new).collect())
    }

    /// Build a list from shared elements, checking kind and name of each
    pub fn from_shared(element_kind: TagKind, items: Vec<Arc<Tag>>) -> Result<Self, TagError> {
        check_list_items(element_kind, &items)?;
        Ok(TagList {
            element_kind,
            items,
        })
    }

    /// Build a list from payloads; the element kind comes from the first one
    pub fn of(values: Vec<TagValue>) -> Result<Self, TagError> {
        let element_kind = values.first().map_or(TagKind::End, TagValue::kind);
        Self::from_items(
            element_kind,
            values.into_iter().map(|v| Tag::unnamed(v)).collect(),
        )
    }

    /// Declared element kind
    pub fn element_kind(&self) -> TagKind {
        self.element_kind
    }

    /// Elements in index order
    pub fn items(&self) -> &[Arc<Tag>] {
        &self.items
    }

    /// Element at `index`
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index).map(|t| t.as_ref())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the list has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an element
    ///
    /// An empty list declaring End adopts the element's kind; otherwise the
    /// kind must match the declared one. On error the list is unchanged.
    pub fn push(&mut self, tag: Tag) -> Result<(), TagError> {
        if tag.name.is_some() {
            return Err(TagError::NamedListElement {
                index: self.items.len(),
            });
        }
        let kind = tag.kind();
        if self.items.is_empty() && self.element_kind == TagKind::End && kind != TagKind::End {
            self.element_kind = kind;
        }
        if kind != self.element_kind || kind == TagKind::End {
            return Err(TagError::ListKindMismatch {
                index: self.items.len(),
                expected: self.element_kind,
                found: kind,
            });
        }
        self.items.push(Arc::new(tag));
        Ok(())
    }

    /// Take the elements out of the list
    pub fn into_items(self) -> Vec<Arc<Tag>> {
        self.items
    }
}

fn check_list_items(element_kind: TagKind, items: &[Arc<Tag>]) -> Result<(), TagError> {
    if element_kind == TagKind::End && !items.is_empty() {
        return Err(TagError::EndListNotEmpty { len: items.len() });
    }
    for (index, item) in items.iter().enumerate() {
        if item.name.is_some() {
            return Err(TagError::NamedListElement { index });
        }
        if item.kind() != element_kind {
            return Err(TagError::ListKindMismatch {
                index,
                expected: element_kind,
                found: item.kind(),
            });
        }
    }
    Ok(())
}

/// Reject a name or string payload that does not fit a 2-byte length prefix
pub fn check_string_len(s: &str) -> Result<(), TagError> {
    if s.len() > MAX_STRING_BYTES {
        return Err(TagError::StringTooLong { length: s.len() });
    }
    Ok(())
}

fn check_sequence_len(len: usize) -> Result<(), TagError> {
    if len > MAX_SEQUENCE_LEN {
        return Err(TagError::SequenceTooLong { length: len });
    }
    Ok(())
}

fn check_compound_children(children: &[Arc<Tag>]) -> Result<(), TagError> {
    for (index, child) in children.iter().enumerate() {
        match &child.name {
            None => return Err(TagError::UnnamedCompoundChild { index }),
            Some(name) => check_string_len(name)?,
        }
        if child.kind() == TagKind::End {
            return Err(TagError::EndInCompound { index });
        }
    }
    Ok(())
}

/// A node of the document tree
///
/// # Examples
///
/// ```
/// use nbtkit_core::{Tag, TagKind};
///
/// let root = Tag::compound("", vec![Tag::int("XpLevel", 5)]);
/// assert_eq!(root.kind(), TagKind::Compound);
/// assert_eq!(root.child("XpLevel").unwrap().value.as_i64(), Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Label; `None` for list elements and the End root
    pub name: Option<String>,
    /// Payload
    pub value: TagValue,
}

impl Tag {
    /// Named tag
    pub fn new(name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        Tag {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// Unnamed tag, as stored in a list
    pub fn unnamed(value: impl Into<TagValue>) -> Self {
        Tag {
            name: None,
            value: value.into(),
        }
    }

    /// The empty document
    pub fn end() -> Self {
        Tag::unnamed(TagValue::End)
    }

    /// Named Byte
    pub fn byte(name: impl Into<String>, v: i8) -> Self {
        Tag::new(name, v)
    }

    /// Named Short
    pub fn short(name: impl Into<String>, v: i16) -> Self {
        Tag::new(name, v)
    }

    /// Named Int
    pub fn int(name: impl Into<String>, v: i32) -> Self {
        Tag::new(name, v)
    }

    /// Named Long
    pub fn long(name: impl Into<String>, v: i64) -> Self {
        Tag::new(name, v)
    }

    /// Named Float
    pub fn float(name: impl Into<String>, v: f32) -> Self {
        Tag::new(name, v)
    }

    /// Named Double
    pub fn double(name: impl Into<String>, v: f64) -> Self {
        Tag::new(name, v)
    }

    /// Named String
    pub fn string(name: impl Into<String>, v: impl Into<String>) -> Self {
        Tag::new(name, TagValue::String(v.into()))
    }

    /// Named ByteArray
    pub fn byte_array(name: impl Into<String>, v: Vec<i8>) -> Self {
        Tag::new(name, v)
    }

    /// Named IntArray
    pub fn int_array(name: impl Into<String>, v: Vec<i32>) -> Self {
        Tag::new(name, v)
    }

    /// Named LongArray
    pub fn long_array(name: impl Into<String>, v: Vec<i64>) -> Self {
        Tag::new(name, v)
    }

    /// Named List
    pub fn list(name: impl Into<String>, list: TagList) -> Self {
        Tag::new(name, list)
    }

    /// Named Compound
    pub fn compound(name: impl Into<String>, children: Vec<Tag>) -> Self {
        Tag::new(name, TagValue::compound(children))
    }

    /// Kind of the payload
    pub fn kind(&self) -> TagKind {
        self.value.kind()
    }

    /// Name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Same payload under a different name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Same payload with the name removed
    pub fn into_unnamed(mut self) -> Self {
        self.name = None;
        self
    }

    /// Children of a Compound or List; empty for every other kind
    pub fn children(&self) -> &[Arc<Tag>] {
        match &self.value {
            TagValue::Compound(children) => children,
            TagValue::List(list) => list.items(),
            _ => &[],
        }
    }

    /// First compound child named `name`
    pub fn child(&self, name: &str) -> Option<&Tag> {
        self.value
            .as_compound()?
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
            .map(|c| c.as_ref())
    }

    /// True for List and Compound
    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Number of nodes in this subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|c| c.node_count())
            .sum::<usize>()
    }

    /// Type-aware recursive copy with no shared allocations
    pub fn deep_copy(&self) -> Tag {
        Tag {
            name: self.name.clone(),
            value: self.value.deep_copy(),
        }
    }

    /// Check every structural invariant of this subtree
    pub fn validate(&self) -> Result<(), TagError> {
        if let Some(name) = &self.name {
            check_string_len(name)?;
        }
        self.value.validate()
    }
}
