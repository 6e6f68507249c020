//! An open document: current root plus undo history
//!
//! The root is an `Arc<Tag>` snapshot. Edits compute a new root from the
//! current one and commit it; the previous root goes on the undo stack as
//! is, so nothing is copied.

use crate::edit::{self, EditOp};
use crate::history::History;
use nbtkit_codec::{decode_with, encode_with, Compression, DecodeConfig, EncodeConfig};
use nbtkit_core::text::{render_bounded, Rendered, TextStyle};
use nbtkit_core::{EditError, FormatError, Result, Tag, TagPath};
use std::sync::Arc;
use tracing::debug;

/// A document being edited
#[derive(Debug, Clone)]
pub struct Document {
    root: Arc<Tag>,
    source_compressed: bool,
    dirty: bool,
    history: History<Arc<Tag>>,
}

impl Document {
    /// Wrap a tree; `compressed` picks the default save framing
    pub fn from_root(root: Tag, compressed: bool, history_depth: usize) -> Self {
        Document {
            root: Arc::new(root),
            source_compressed: compressed,
            dirty: false,
            history: History::new(history_depth),
        }
    }

    /// Decode a buffer into a clean document with empty history
    pub fn decode(
        data: &[u8],
        config: &DecodeConfig,
        history_depth: usize,
    ) -> std::result::Result<Self, FormatError> {
        let decoded = decode_with(data, config)?;
        Ok(Self::from_root(
            decoded.root,
            decoded.compressed,
            history_depth,
        ))
    }

    /// Current root
    pub fn root(&self) -> &Tag {
        &self.root
    }

    /// Current root as a shareable snapshot
    pub fn snapshot(&self) -> Arc<Tag> {
        Arc::clone(&self.root)
    }

    /// True if the source was gzip-framed
    pub fn source_compressed(&self) -> bool {
        self.source_compressed
    }

    /// True if the root changed since the last save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Undo/redo state
    pub fn history(&self) -> &History<Arc<Tag>> {
        &self.history
    }

    /// Replace the root, recording the old one for undo
    pub fn commit(&mut self, new_root: Tag) {
        let current = Arc::clone(&self.root);
        self.root = self.history.commit(current, Arc::new(new_root));
        self.dirty = true;
    }

    /// Step back; false if there was nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.root) {
            Some(previous) => {
                self.root = previous;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Step forward; false if there was nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.root) {
            Some(next) => {
                self.root = next;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Apply an edit and commit the result
    ///
    /// On error the root, history and dirty flag are left as they were.
    pub fn apply(&mut self, op: &EditOp) -> std::result::Result<(), EditError> {
        let new_root = edit::apply(&self.root, op)?;
        debug!(?op, "Applied edit");
        self.commit(new_root);
        Ok(())
    }

    /// Encode the current root
    ///
    /// `None` keeps the framing the document was opened with.
    pub fn encode(&self, compression: Option<Compression>) -> Result<Vec<u8>> {
        let compression =
            compression.unwrap_or_else(|| Compression::matching(self.source_compressed));
        encode_with(&self.root, &EncodeConfig::default().with_compression(compression))
    }

    /// Record that the current root has been persisted
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Text form of the subtree at `path`, cut to `max_bytes`
    pub fn render_subtree(&self, path: &TagPath, max_bytes: usize) -> Option<Rendered> {
        self.root
            .get(path)
            .map(|tag| render_bounded(tag, TextStyle::Compact, max_bytes))
    }
}
