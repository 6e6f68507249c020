//! Core types for nbtkit
//!
//! This crate defines the foundational types used throughout the system:
//! - Tag, TagValue, TagKind, TagList: the document tree
//! - TagPath, PathSegment: addressing a node from the root
//! - walk: resolution, pre-order flattening, range and inverse selection
//! - text: stringified tag notation for display and export
//! - Error: error type hierarchy (format, edit, I/O)
//! - limits: wire and default decoder limits

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod path;
pub mod tag;
pub mod text;
pub mod walk;

pub use error::{EditError, Error, FormatError, Result, TagError};
pub use path::{PathParseError, PathSegment, TagPath};
pub use tag::{Tag, TagKind, TagList, TagValue};
pub use text::{render, render_bounded, Rendered, TextStyle};
pub use walk::{flatten, invert, range_between, resolve};
