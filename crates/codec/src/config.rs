//! Codec configuration
//!
//! Decoder limits guard against hostile input; encoder settings pick the
//! output framing. Both follow the builder pattern and check themselves
//! with `validate()`.

use crate::compression::Compression;
use nbtkit_core::limits::{DEFAULT_MAX_DECOMPRESSED_SIZE, DEFAULT_MAX_DEPTH};

/// Decoder settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Deepest List/Compound nesting accepted (default: 512)
    pub max_depth: usize,

    /// Accept bytes after the root tag (default: true)
    ///
    /// Some producers pad their output. When enabled the extra bytes are
    /// ignored with a warning; when disabled they are a format error.
    pub allow_trailing_bytes: bool,

    /// Largest inflated gzip stream accepted, in bytes (default: 256MB)
    pub max_decompressed_size: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_bytes: true,
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        }
    }
}

impl DecodeConfig {
    /// Create a decoder configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum nesting depth (builder pattern).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Allow or reject trailing bytes (builder pattern).
    pub fn with_allow_trailing_bytes(mut self, allow: bool) -> Self {
        self.allow_trailing_bytes = allow;
        self
    }

    /// Set decompressed size cap (builder pattern).
    pub fn with_max_decompressed_size(mut self, bytes: usize) -> Self {
        self.max_decompressed_size = bytes;
        self
    }

    /// Strict settings: no trailing bytes.
    pub fn strict() -> Self {
        Self::default().with_allow_trailing_bytes(false)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), CodecConfigError> {
        if self.max_depth == 0 {
            return Err(CodecConfigError::ZeroDepth);
        }
        if self.max_decompressed_size == 0 {
            return Err(CodecConfigError::ZeroDecompressedSize);
        }
        Ok(())
    }
}

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeConfig {
    /// Output framing (default: none)
    pub compression: Compression,
}

impl EncodeConfig {
    /// Raw output
    pub fn uncompressed() -> Self {
        EncodeConfig {
            compression: Compression::None,
        }
    }

    /// Gzip output at the default level
    pub fn gzip() -> Self {
        EncodeConfig {
            compression: Compression::gzip(),
        }
    }

    /// Set output framing (builder pattern).
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), CodecConfigError> {
        if let Compression::Gzip { level } = self.compression {
            if level > 9 {
                return Err(CodecConfigError::InvalidLevel(level));
            }
        }
        Ok(())
    }
}

/// Codec configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecConfigError {
    /// Depth limit of zero would reject every container.
    #[error("Maximum depth must be at least 1")]
    ZeroDepth,

    /// Size cap of zero would reject every gzip document.
    #[error("Maximum decompressed size must be at least 1 byte")]
    ZeroDecompressedSize,

    /// Gzip level outside 0..=9.
    #[error("Gzip level {0} is out of range (0-9)")]
    InvalidLevel(u32),
}

impl From<CodecConfigError> for nbtkit_core::Error {
    fn from(e: CodecConfigError) -> Self {
        nbtkit_core::Error::Config(e.to_string())
    }
}
