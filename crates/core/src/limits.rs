//! Format limits
//!
//! Hard limits come from the wire layout and cannot be raised. Default
//! limits guard the decoder against hostile input and can be changed per
//! call through the codec configuration.

/// Longest name or string payload, in UTF-8 bytes (2-byte unsigned prefix)
pub const MAX_STRING_BYTES: usize = u16::MAX as usize;

/// Longest array or list (4-byte signed prefix)
pub const MAX_SEQUENCE_LEN: usize = i32::MAX as usize;

/// Default maximum nesting depth accepted by the decoder
///
/// Matches the depth limit used by the reference game client.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default cap on the size of an inflated gzip stream (256 MB)
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;

/// Default number of undo snapshots kept per document
pub const DEFAULT_HISTORY_DEPTH: usize = 64;

/// Default byte budget for text handed to external collaborators (16 KB)
pub const DEFAULT_TEXT_LIMIT_BYTES: usize = 16 * 1024;
