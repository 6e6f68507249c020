//! Error types for nbtkit
//!
//! Three families are kept apart so a caller can tell them apart:
//! - [`FormatError`]: the bytes are not a valid document (decode) or the tree
//!   cannot be written as one (encode)
//! - [`EditError`]: an edit request was invalid; the tree is left unchanged
//! - [`Error::Io`]: the bytes could not be read or written at all
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::path::TagPath;
use crate::tag::TagKind;
use std::io;
use thiserror::Error;

/// Result type alias for nbtkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while acquiring or persisting a buffer
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed input or unencodable tree
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Rejected edit request
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True if this error came from the transport layer rather than the data
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// True if the data itself was not a decodable document
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// True if an edit request was rejected
    pub fn is_edit(&self) -> bool {
        matches!(self, Error::Edit(_))
    }
}

/// A structural invariant of the tag model was violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// List element kind differs from the declared element kind
    #[error("list element {index} is {found}, list declares {expected}")]
    ListKindMismatch {
        /// Position of the offending element
        index: usize,
        /// Declared element kind
        expected: TagKind,
        /// Kind actually found
        found: TagKind,
    },

    /// List elements are addressed by position and cannot carry a name
    #[error("list element {index} carries a name")]
    NamedListElement {
        /// Position of the offending element
        index: usize,
    },

    /// Every compound child needs a name
    #[error("compound child {index} has no name")]
    UnnamedCompoundChild {
        /// Position of the offending child
        index: usize,
    },

    /// An End tag cannot be stored inside a compound
    #[error("compound child {index} is an End tag")]
    EndInCompound {
        /// Position of the offending child
        index: usize,
    },

    /// A list declaring End as element kind must be empty
    #[error("list of End holds {len} elements")]
    EndListNotEmpty {
        /// Number of elements found
        len: usize,
    },

    /// A name or string payload longer than its 2-byte length prefix allows
    #[error("string of {length} bytes exceeds the 65535 byte limit")]
    StringTooLong {
        /// Length in UTF-8 bytes
        length: usize,
    },

    /// An array or list longer than its 4-byte signed length prefix allows
    #[error("sequence of {length} elements exceeds the i32 length limit")]
    SequenceTooLong {
        /// Element count
        length: usize,
    },
}

/// Malformed binary input, or a tree that cannot be written in the format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Buffer ended in the middle of a value
    #[error("unexpected end of input at offset {offset}: needed {needed} more bytes")]
    UnexpectedEof {
        /// Offset where the read started
        offset: usize,
        /// Bytes the read required
        needed: usize,
    },

    /// Kind byte outside the known range
    #[error("unknown tag kind {id} at offset {offset}")]
    UnknownKind {
        /// Raw kind byte
        id: u8,
        /// Offset of the kind byte
        offset: usize,
    },

    /// Array or list length prefix was negative
    #[error("negative length {length} at offset {offset}")]
    NegativeLength {
        /// Length as read
        length: i32,
        /// Offset of the length prefix
        offset: usize,
    },

    /// A list declared End as element kind but a nonzero count
    #[error("list of End declares {count} elements at offset {offset}")]
    EndListWithItems {
        /// Declared count
        count: i32,
        /// Offset of the list header
        offset: usize,
    },

    /// String bytes are not valid UTF-8
    #[error("invalid UTF-8 string at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the string payload
        offset: usize,
    },

    /// Nesting exceeded the configured maximum depth
    #[error("nesting depth exceeds maximum of {max}")]
    DepthExceeded {
        /// Configured maximum
        max: usize,
    },

    /// Bytes remained after the root tag and trailing data is not allowed
    #[error("{remaining} trailing bytes after root tag at offset {offset}")]
    TrailingBytes {
        /// Offset where the root tag ended
        offset: usize,
        /// Number of unread bytes
        remaining: usize,
    },

    /// Gzip framing detected but the stream could not be inflated
    #[error("gzip decompression failed: {0}")]
    Decompress(String),

    /// Inflated stream exceeded the configured size cap
    #[error("decompressed data exceeds limit of {limit} bytes")]
    DecompressedTooLarge {
        /// Configured cap in bytes
        limit: usize,
    },

    /// A name or string payload does not fit the 2-byte length prefix
    #[error("string of {length} bytes exceeds the 65535 byte limit")]
    StringTooLong {
        /// Encoded length in bytes
        length: usize,
    },

    /// An array or list has more elements than a 4-byte signed length allows
    #[error("sequence of {length} elements exceeds the i32 length limit")]
    LengthOverflow {
        /// Element count
        length: usize,
    },

    /// The tree violates a model invariant and cannot be encoded
    #[error("invalid tree: {0}")]
    InvalidTree(#[from] TagError),
}

/// An edit request that was rejected without touching the tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// No node lives at the given path in the current tree
    #[error("path not found: {0}")]
    PathNotFound(TagPath),

    /// The supplied value has the wrong kind for its destination
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind required by the destination
        expected: TagKind,
        /// Kind supplied
        found: TagKind,
    },

    /// The target of an add-child request is not a Compound or List
    #[error("{kind} at {path} cannot hold children")]
    NotAContainer {
        /// Target path
        path: TagPath,
        /// Kind of the target
        kind: TagKind,
    },

    /// The root is never removed by an edit
    #[error("the root tag cannot be deleted")]
    RootNotDeletable,

    /// Only the root and compound children carry names
    #[error("node at {0} has no name to change")]
    NotRenamable(TagPath),

    /// A compound child was supplied without a name
    #[error("compound children require a name")]
    MissingName,

    /// A list element was supplied with a name
    #[error("list elements cannot be named")]
    UnexpectedName,

    /// End tags cannot be inserted into a tree
    #[error("End tags cannot be inserted")]
    EndTagNotAllowed,

    /// Text input could not be read as a value of the kind
    #[error("invalid {kind} value {input:?}: {reason}")]
    InvalidValue {
        /// Destination kind
        kind: TagKind,
        /// Raw input
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// Text input is numeric but outside the kind's range
    #[error("{input:?} is out of range for {kind}")]
    OutOfRange {
        /// Destination kind
        kind: TagKind,
        /// Raw input
        input: String,
    },

    /// The edit would break a model invariant
    #[error("invalid tree: {0}")]
    Invalid(#[from] TagError),
}
