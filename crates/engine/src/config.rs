//! Editor configuration via `nbtkit.toml`
//!
//! Every field has a default, so an empty file (or no file) is valid.
//!
//! ```toml
//! # Undo snapshots kept per open document (default: 64)
//! history_depth = 64
//!
//! # Gzip documents created from scratch when saving (default: true)
//! compress_new_documents = true
//!
//! # Byte budget for text handed to an external explainer (default: 16384)
//! text_limit_bytes = 16384
//!
//! # Deepest nesting accepted when opening a document (default: 512)
//! max_depth = 512
//! ```

use nbtkit_codec::{Compression, DecodeConfig};
use nbtkit_core::limits::{DEFAULT_HISTORY_DEPTH, DEFAULT_MAX_DEPTH, DEFAULT_TEXT_LIMIT_BYTES};
use nbtkit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up next to the user's settings.
pub const CONFIG_FILE_NAME: &str = "nbtkit.toml";

/// Editor settings loaded from `nbtkit.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo snapshots kept per document.
    pub history_depth: usize,
    /// Gzip documents that were not decoded from a file.
    pub compress_new_documents: bool,
    /// Byte budget for rendered text.
    pub text_limit_bytes: usize,
    /// Deepest List/Compound nesting accepted when decoding.
    pub max_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            compress_new_documents: true,
            text_limit_bytes: DEFAULT_TEXT_LIMIT_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EditorConfig {
    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid TOML for this shape
    /// or a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EditorConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse editor config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config` if
    /// it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Serialize this config to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize editor config: {}", e)))
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::Config("max_depth must be at least 1".to_string()));
        }
        if self.text_limit_bytes == 0 {
            return Err(Error::Config(
                "text_limit_bytes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Decoder settings implied by this config.
    pub fn decode_config(&self) -> DecodeConfig {
        DecodeConfig::default().with_max_depth(self.max_depth)
    }

    /// Framing for documents that have no source file.
    pub fn new_document_compression(&self) -> Compression {
        Compression::matching(self.compress_new_documents)
    }
}
