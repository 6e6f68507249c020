//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from any suite's main.rs.

#![allow(dead_code)]

use nbtkit::{Tag, TagKind, TagList, TagPath, TagValue};
use std::path::PathBuf;
use tempfile::TempDir;

/// The smallest real document: `Compound "" [Int "XpLevel" 5]`.
pub const XP_LEVEL_BYTES: [u8; 18] = [
    0x0A, 0x00, 0x00, 0x03, 0x00, 0x07, b'X', b'p', b'L', b'e', b'v', b'e', b'l', 0x00, 0x00, 0x00,
    0x05, 0x00,
];

/// Parse a path literal.
pub fn p(s: &str) -> TagPath {
    s.parse().expect("valid path literal")
}

/// A player-like document touching every kind.
pub fn player() -> Tag {
    Tag::compound(
        "",
        vec![
            Tag::int("XpLevel", 5),
            Tag::string("Name", "Steve"),
            Tag::long("Seed", -4172144997902289642),
            Tag::float("Health", 20.0),
            Tag::short("Air", 300),
            Tag::byte("OnGround", 1),
            Tag::list(
                "Pos",
                TagList::of(vec![
                    TagValue::Double(0.5),
                    TagValue::Double(64.0),
                    TagValue::Double(-12.25),
                ])
                .expect("homogeneous"),
            ),
            Tag::list(
                "Inventory",
                TagList::from_items(
                    TagKind::Compound,
                    vec![
                        item("minecraft:stone", 0, 64),
                        item("minecraft:dirt", 1, 12),
                        item("minecraft:sand", 2, 3),
                    ],
                )
                .expect("homogeneous"),
            ),
            Tag::list("Tags", TagList::empty()),
            Tag::byte_array("Bytes", vec![-1, 0, 1]),
            Tag::int_array("UUID", vec![1, 2, 3, 4]),
            Tag::long_array("Longs", vec![i64::MIN, i64::MAX]),
            Tag::compound("Abilities", vec![Tag::byte("flying", 0)]),
        ],
    )
}

fn item(id: &str, slot: i8, count: i8) -> Tag {
    Tag::unnamed(TagValue::compound(vec![
        Tag::string("id", id),
        Tag::byte("Slot", slot),
        Tag::byte("Count", count),
    ]))
}

/// Temp directory plus a file path inside it.
pub fn temp_file(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(name);
    (dir, path)
}
