//! Buffer to tree
//!
//! Framing is detected from the first two bytes. A gzip-framed buffer is
//! inflated as a whole before parsing; any other buffer is parsed as-is.

use crate::compression::{gunzip, is_gzip};
use crate::config::DecodeConfig;
use crate::reader::TagReader;
use nbtkit_core::{FormatError, Tag};
use std::borrow::Cow;
use tracing::{debug, warn};

/// A decoded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Root tag
    pub root: Tag,
    /// True if the source was gzip-framed
    pub compressed: bool,
}

/// Decode with default limits
///
/// # Example
///
/// ```
/// use nbtkit_codec::decode;
/// use nbtkit_core::Tag;
///
/// let bytes = [0x0A, 0, 0, 0x03, 0, 7, b'X', b'p', b'L', b'e', b'v', b'e', b'l', 0, 0, 0, 5, 0];
/// let doc = decode(&bytes).unwrap();
/// assert_eq!(doc.root, Tag::compound("", vec![Tag::int("XpLevel", 5)]));
/// assert!(!doc.compressed);
/// ```
pub fn decode(data: &[u8]) -> Result<Decoded, FormatError> {
    decode_with(data, &DecodeConfig::default())
}

/// Decode with explicit limits
pub fn decode_with(data: &[u8], config: &DecodeConfig) -> Result<Decoded, FormatError> {
    let compressed = is_gzip(data);
    let raw: Cow<'_, [u8]> = if compressed {
        Cow::Owned(gunzip(data, config.max_decompressed_size)?)
    } else {
        Cow::Borrowed(data)
    };

    let mut reader = TagReader::new(&raw, config.max_depth);
    let root = reader.read_root()?;

    let remaining = reader.remaining();
    if remaining > 0 {
        let offset = reader.position();
        if !config.allow_trailing_bytes {
            return Err(FormatError::TrailingBytes { offset, remaining });
        }
        warn!(offset, remaining, "Ignoring trailing bytes after root tag");
    }

    debug!(
        input_bytes = data.len(),
        raw_bytes = raw.len(),
        compressed,
        nodes = root.node_count(),
        "Decoded document"
    );
    Ok(Decoded { root, compressed })
}
