//! Binary codec for nbtkit documents
//!
//! This crate converts between byte buffers and the tag tree:
//! - decode: framing detection, gunzip, and parsing into a [`Tag`]
//! - encode: serialization and optional gzip framing
//! - reader / writer: the big-endian tag layout itself
//! - config: decoder limits and encoder framing
//!
//! Round-trip law: for any well-formed tree `t` and any compression choice,
//! `decode(encode_with(t, c)).root == t`.
//!
//! [`Tag`]: nbtkit_core::Tag

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compression;
pub mod config;
pub mod decode;
pub mod encode;
pub mod reader;
pub mod writer;

pub use compression::{is_gzip, Compression, GZIP_MAGIC};
pub use config::{CodecConfigError, DecodeConfig, EncodeConfig};
pub use decode::{decode, decode_with, Decoded};
pub use encode::{encode, encode_with, write_to};
pub use reader::TagReader;
pub use writer::TagWriter;
