//! Editing engine for nbtkit documents
//!
//! This crate sits on top of the tag model and the codec:
//! - edit: pure copy-on-write tree edits and the replayable `EditOp`
//! - history: bounded undo/redo over snapshots
//! - document: a root plus its history, dirty flag and source framing
//! - workspace: open documents keyed by `DocumentId`
//! - selection: multi-node selection, range extension and bulk delete
//! - value_input: strict text parsing for inline value editors
//! - config: editor settings loaded from `nbtkit.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod document;
pub mod edit;
pub mod history;
pub mod selection;
pub mod value_input;
pub mod workspace;

pub use config::{EditorConfig, CONFIG_FILE_NAME};
pub use document::Document;
pub use edit::{
    add_child, add_default_child, apply, delete, delete_many, rename, update_value, EditOp,
    NewChild,
};
pub use history::History;
pub use selection::Selection;
pub use value_input::{edit_text, parse_value};
pub use workspace::{DocumentId, Workspace};
