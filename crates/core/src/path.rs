//! Tree paths
//!
//! A [`TagPath`] names one node relative to a document root as a sequence of
//! segments:
//! - compound step: child name plus its occurrence among same-named siblings
//! - list step: element index
//!
//! Compounds may hold several children with the same name, so a name alone
//! cannot address a node. The occurrence number makes every node reachable
//! and keeps paths deterministic for a given tree.
//!
//! Paths are derived from the current tree. Any edit that inserts, removes
//! or reorders siblings can change the paths of the nodes after them.
//!
//! # Path Syntax
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | (empty) | Root | `` |
//! | `.name` | First child called `name` | `.Inventory` |
//! | `.name#k` | `k`-th repeat of `name` (k ≥ 1) | `.Tag#1` |
//! | `."any text"` | Name needing quotes | `."minecraft:stone dust"` |
//! | `[n]` | List element | `.Pos[0]` |
//!
//! Unquoted names use `A-Z a-z 0-9 _ - : +`. Inside quotes `\"` and `\\`
//! are the only escapes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// `.` not followed by a name
    #[error("empty name in path at position {0}")]
    EmptyName(usize),
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Unclosed quoted name
    #[error("unclosed quote starting at position {0}")]
    UnclosedQuote(usize),
    /// Unsupported escape inside a quoted name
    #[error("invalid escape at position {0}")]
    InvalidEscape(usize),
    /// Invalid list index
    #[error("invalid list index at position {0}: {1}")]
    InvalidIndex(usize, String),
    /// Invalid occurrence number
    #[error("invalid occurrence at position {0}: {1}")]
    InvalidOccurrence(usize, String),
    /// Unexpected character
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
}

/// A single step in a [`TagPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Compound child: name plus how many earlier siblings share that name
    Child {
        /// Child name
        name: String,
        /// 0 for the first child with this name, 1 for the second, ...
        occurrence: usize,
    },
    /// List element
    Index(usize),
}

impl PathSegment {
    /// First compound child called `name`
    pub fn child(name: impl Into<String>) -> Self {
        PathSegment::Child {
            name: name.into(),
            occurrence: 0,
        }
    }
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '+')
}

fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if !name.is_empty() && name.chars().all(is_bare_char) {
        return f.write_str(name);
    }
    f.write_str("\"")?;
    for c in name.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\"")
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Child { name, occurrence } => {
                f.write_str(".")?;
                write_name(f, name)?;
                if *occurrence > 0 {
                    write!(f, "#{}", occurrence)?;
                }
                Ok(())
            }
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A path from the document root to one node
///
/// # Examples
///
/// ```
/// use nbtkit_core::TagPath;
///
/// let path = TagPath::root().child("Inventory").index(0).child("id");
/// assert_eq!(path.to_string(), ".Inventory[0].id");
///
/// let parsed: TagPath = ".Inventory[0].id".parse().unwrap();
/// assert_eq!(parsed, path);
///
/// let inventory = TagPath::root().child("Inventory");
/// assert!(inventory.is_ancestor_of(&path));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TagPath {
    segments: Vec<PathSegment>,
}

impl TagPath {
    /// The root path (no segments)
    pub fn root() -> Self {
        TagPath {
            segments: Vec::new(),
        }
    }

    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        TagPath { segments }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments (0 for the root)
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a first-occurrence child segment (builder pattern)
    pub fn child(self, name: impl Into<String>) -> Self {
        self.child_nth(name, 0)
    }

    /// Append a child segment with an explicit occurrence (builder pattern)
    pub fn child_nth(mut self, name: impl Into<String>, occurrence: usize) -> Self {
        self.segments.push(PathSegment::Child {
            name: name.into(),
            occurrence,
        });
        self
    }

    /// Append an index segment (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(PathSegment::Index(idx));
        self
    }

    /// Append a segment (builder pattern)
    pub fn join(mut self, segment: PathSegment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Push a segment (mutating)
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Remove the last segment (mutating)
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Get the parent path (None if root)
    pub fn parent(&self) -> Option<TagPath> {
        if self.segments.is_empty() {
            None
        } else {
            let mut parent = self.clone();
            parent.segments.pop();
            Some(parent)
        }
    }

    /// Get the last segment (None if root)
    pub fn last_segment(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Check if this path is a prefix of `other` (or equal)
    pub fn is_ancestor_of(&self, other: &TagPath) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// Check if `other` is a prefix of this path (or equal)
    pub fn is_descendant_of(&self, other: &TagPath) -> bool {
        other.is_ancestor_of(self)
    }

    /// Check if this path is a proper prefix of `other`
    pub fn is_strict_ancestor_of(&self, other: &TagPath) -> bool {
        self.segments.len() < other.segments.len() && self.is_ancestor_of(other)
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.segments {
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl From<TagPath> for String {
    fn from(path: TagPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for TagPath {
    type Error = PathParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for TagPath {
    type Err = PathParseError;

    /// Parse the syntax produced by `Display`
    ///
    /// The leading `.` of the first segment may be omitted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let mut segments = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '[' => {
                    let start = i;
                    i += 1;
                    let idx_start = i;
                    while i < chars.len() && chars[i] != ']' {
                        i += 1;
                    }
                    if i >= chars.len() {
                        return Err(PathParseError::UnclosedBracket(start));
                    }
                    let idx_str: String = chars[idx_start..i].iter().collect();
                    let idx = idx_str
                        .parse::<usize>()
                        .map_err(|_| PathParseError::InvalidIndex(idx_start, idx_str))?;
                    segments.push(PathSegment::Index(idx));
                    i += 1;
                }
                c if c == '.' || (segments.is_empty() && i == 0 && (is_bare_char(c) || c == '"')) => {
                    if c == '.' {
                        i += 1;
                    }
                    let name = parse_name(&chars, &mut i)?;
                    let occurrence = parse_occurrence(&chars, &mut i)?;
                    segments.push(PathSegment::Child { name, occurrence });
                }
                c => return Err(PathParseError::UnexpectedChar(c, i)),
            }
        }

        Ok(TagPath { segments })
    }
}

fn parse_name(chars: &[char], i: &mut usize) -> Result<String, PathParseError> {
    let start = *i;
    if start >= chars.len() {
        return Err(PathParseError::EmptyName(start));
    }
    if chars[start] == '"' {
        let mut name = String::new();
        *i += 1;
        loop {
            match chars.get(*i) {
                None => return Err(PathParseError::UnclosedQuote(start)),
                Some('"') => {
                    *i += 1;
                    return Ok(name);
                }
                Some('\\') => match chars.get(*i + 1) {
                    Some(c @ ('"' | '\\')) => {
                        name.push(*c);
                        *i += 2;
                    }
                    _ => return Err(PathParseError::InvalidEscape(*i)),
                },
                Some(c) => {
                    name.push(*c);
                    *i += 1;
                }
            }
        }
    }
    while *i < chars.len() && is_bare_char(chars[*i]) {
        *i += 1;
    }
    if *i == start {
        return Err(PathParseError::EmptyName(start));
    }
    Ok(chars[start..*i].iter().collect())
}

fn parse_occurrence(chars: &[char], i: &mut usize) -> Result<usize, PathParseError> {
    if chars.get(*i) != Some(&'#') {
        return Ok(0);
    }
    *i += 1;
    let start = *i;
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
    let digits: String = chars[start..*i].iter().collect();
    digits
        .parse::<usize>()
        .map_err(|_| PathParseError::InvalidOccurrence(start, digits))
}
