//! Registry of open documents
//!
//! Each open document gets a [`DocumentId`]. Documents are independent:
//! edits, history and the dirty flag never cross between them. Which one
//! is shown is the caller's business.

use crate::config::EditorConfig;
use crate::document::Document;
use nbtkit_core::{FormatError, Rendered, Tag, TagPath};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Handle for a document open in a [`Workspace`]
///
/// Ids are random (UUID v4) rather than counters, so a handle kept after
/// [`Workspace::close`] never aliases a document opened later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Fresh id for a document being registered
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Recover an id from its `Display` form, e.g. a saved tab list
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// The 16 id bytes
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Open documents keyed by id, in the order they were opened
#[derive(Debug, Default)]
pub struct Workspace {
    config: EditorConfig,
    documents: HashMap<DocumentId, Document>,
    order: Vec<DocumentId>,
}

impl Workspace {
    /// Empty workspace
    pub fn new(config: EditorConfig) -> Self {
        Workspace {
            config,
            documents: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Settings applied to documents opened here
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Decode a buffer and register it
    pub fn open(&mut self, data: &[u8]) -> Result<DocumentId, FormatError> {
        let doc = Document::decode(
            data,
            &self.config.decode_config(),
            self.config.history_depth,
        )?;
        Ok(self.insert(doc))
    }

    /// Register a document built in memory
    ///
    /// It saves with the framing chosen by `compress_new_documents`.
    pub fn create(&mut self, root: Tag) -> DocumentId {
        let doc = Document::from_root(
            root,
            self.config.new_document_compression().is_gzip(),
            self.config.history_depth,
        );
        self.insert(doc)
    }

    /// Text form of a subtree, cut to the configured `text_limit_bytes`
    ///
    /// `None` when the document is not open or nothing lives at `path`.
    pub fn render_subtree(&self, id: DocumentId, path: &TagPath) -> Option<Rendered> {
        self.documents
            .get(&id)?
            .render_subtree(path, self.config.text_limit_bytes)
    }

    /// Register an already built document
    pub fn insert(&mut self, doc: Document) -> DocumentId {
        let id = DocumentId::new();
        self.documents.insert(id, doc);
        self.order.push(id);
        debug!(%id, open = self.order.len(), "Opened document");
        id
    }

    /// Document by id
    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// Mutable document by id
    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    /// Remove a document, handing it back
    pub fn close(&mut self, id: DocumentId) -> Option<Document> {
        let doc = self.documents.remove(&id)?;
        self.order.retain(|open| *open != id);
        debug!(%id, dirty = doc.is_dirty(), "Closed document");
        Some(doc)
    }

    /// Ids in opening order
    pub fn ids(&self) -> &[DocumentId] {
        &self.order
    }

    /// Number of open documents
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing is open
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids of documents with unsaved changes
    pub fn dirty_ids(&self) -> Vec<DocumentId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.documents.get(id).map_or(false, Document::is_dirty))
            .collect()
    }
}
