//! Tree to buffer

use crate::compression::{gzip, Compression};
use crate::config::EncodeConfig;
use crate::writer::TagWriter;
use nbtkit_core::{Result, Tag};
use std::io::Write;
use tracing::debug;

/// Encode without compression
pub fn encode(root: &Tag) -> Result<Vec<u8>> {
    encode_with(root, &EncodeConfig::default())
}

/// Encode with the given framing
///
/// Compression is applied to the finished raw buffer, so the uncompressed
/// bytes are identical with or without it.
pub fn encode_with(root: &Tag, config: &EncodeConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let mut raw = Vec::new();
    write_to(root, &mut raw)?;

    let out = match config.compression {
        Compression::None => raw,
        Compression::Gzip { level } => {
            let packed = gzip(&raw, level)?;
            debug!(
                raw_bytes = raw.len(),
                compressed_bytes = packed.len(),
                level,
                "Compressed document"
            );
            packed
        }
    };
    debug!(
        bytes = out.len(),
        compressed = config.compression.is_gzip(),
        "Encoded document"
    );
    Ok(out)
}

/// Write the raw (uncompressed) encoding of `root` to a sink
pub fn write_to<W: Write>(root: &Tag, out: W) -> Result<()> {
    TagWriter::new(out).write_root(root)
}
