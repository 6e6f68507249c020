//! Gzip framing
//!
//! A document is gzip-framed when its first two bytes are the gzip magic
//! number. Framing is applied to, and removed from, the whole buffer; it
//! never changes the uncompressed bytes.

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use nbtkit_core::FormatError;
use std::io::{self, Read, Write};

/// First two bytes of every gzip member
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Default gzip level for [`Compression::gzip`]
pub const DEFAULT_GZIP_LEVEL: u32 = 6;

/// Output framing for an encoded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Raw bytes
    #[default]
    None,
    /// Whole buffer gzip-compressed
    Gzip {
        /// Compression level, 0 (store) to 9 (best)
        level: u32,
    },
}

impl Compression {
    /// Gzip at the default level
    pub fn gzip() -> Self {
        Compression::Gzip {
            level: DEFAULT_GZIP_LEVEL,
        }
    }

    /// True for any gzip variant
    pub fn is_gzip(&self) -> bool {
        matches!(self, Compression::Gzip { .. })
    }

    /// Framing matching a decoded source
    pub fn matching(compressed: bool) -> Self {
        if compressed {
            Self::gzip()
        } else {
            Compression::None
        }
    }
}

/// True if `data` starts with the gzip magic number
pub fn is_gzip(data: &[u8]) -> bool {
    data.len() >= GZIP_MAGIC.len() && data[..2] == GZIP_MAGIC
}

/// Inflate a gzip buffer, refusing output larger than `limit` bytes
///
/// Concatenated gzip members are inflated back to back into one stream.
pub fn gunzip(data: &[u8], limit: usize) -> Result<Vec<u8>, FormatError> {
    let decoder = MultiGzDecoder::new(data);
    // One byte past the limit tells "exactly at the cap" from "over it"
    let mut bounded = decoder.take((limit as u64).saturating_add(1));
    let mut out = Vec::new();
    bounded
        .read_to_end(&mut out)
        .map_err(|e| FormatError::Decompress(e.to_string()))?;
    if out.len() > limit {
        return Err(FormatError::DecompressedTooLarge { limit });
    }
    Ok(out)
}

/// Gzip a buffer at `level`
pub fn gzip(data: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(
        Vec::with_capacity(data.len() / 2 + 32),
        flate2::Compression::new(level),
    );
    encoder.write_all(data)?;
    encoder.finish()
}
