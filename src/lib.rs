//! nbtkit - Codec and undoable editor for NBT-style tagged binary documents
//!
//! A document is a tree of typed, optionally named tags stored big-endian
//! and optionally gzip-framed. nbtkit reads such buffers into an immutable
//! tree, edits the tree copy-on-write, keeps a bounded undo/redo history,
//! and writes the result back byte-for-byte compatible.
//!
//! # Quick Start
//!
//! ```no_run
//! use nbtkit::{io, DecodeConfig, EditOp, TagValue};
//!
//! # fn main() -> nbtkit::Result<()> {
//! let mut doc = io::read_document("level.dat", &DecodeConfig::default())?;
//! doc.apply(&EditOp::UpdateValue {
//!     path: "Data.GameType".parse().expect("valid path"),
//!     value: TagValue::Int(1),
//! })?;
//! doc.undo();
//! io::write_document(&mut doc, "level.dat", None)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`nbtkit_core`]: tag model, paths, traversal, text form and errors
//! - [`nbtkit_codec`]: binary reader/writer with gzip detection
//! - [`nbtkit_engine`]: edits, history, documents and selection

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use nbtkit_codec::{
    decode, decode_with, encode, encode_with, is_gzip, CodecConfigError, Compression, DecodeConfig,
    Decoded, EncodeConfig,
};
pub use nbtkit_core::{
    flatten, invert, range_between, render, render_bounded, resolve, EditError, Error,
    FormatError, PathSegment, Rendered, Result, Tag, TagError, TagKind, TagList, TagPath,
    TagValue, TextStyle,
};
pub use nbtkit_engine::{
    add_child, add_default_child, apply, delete, delete_many, edit_text, parse_value, rename,
    update_value, Document, DocumentId, EditOp, EditorConfig, History, NewChild, Selection,
    Workspace,
};

pub mod io {
    //! Whole-file acquisition and persistence
    //!
    //! Each call reads or writes the complete buffer at once. A file that
    //! cannot be opened or written is [`Error::Io`]; a file that was read
    //! but is not a valid document is [`Error::Format`].

    use super::{Compression, DecodeConfig, Document, Error, Result};
    use nbtkit_core::limits::DEFAULT_HISTORY_DEPTH;
    use std::fs;
    use std::path::Path;
    use tracing::debug;

    /// Read and decode a document with the default history depth
    pub fn read_document(path: impl AsRef<Path>, config: &DecodeConfig) -> Result<Document> {
        read_document_with_history(path, config, DEFAULT_HISTORY_DEPTH)
    }

    /// Read and decode a document keeping up to `history_depth` undo steps
    pub fn read_document_with_history(
        path: impl AsRef<Path>,
        config: &DecodeConfig,
        history_depth: usize,
    ) -> Result<Document> {
        let path = path.as_ref();
        config.validate()?;
        let data = fs::read(path)?;
        let doc = Document::decode(&data, config, history_depth).map_err(Error::Format)?;
        debug!(path = %path.display(), bytes = data.len(), "Read document");
        Ok(doc)
    }

    /// Encode and write a document, then mark it saved
    ///
    /// `None` keeps the framing the document was opened with. The document
    /// stays dirty if the write fails.
    pub fn write_document(
        doc: &mut Document,
        path: impl AsRef<Path>,
        compression: Option<Compression>,
    ) -> Result<()> {
        let path = path.as_ref();
        let bytes = doc.encode(compression)?;
        fs::write(path, &bytes)?;
        doc.mark_saved();
        debug!(path = %path.display(), bytes = bytes.len(), "Wrote document");
        Ok(())
    }
}
