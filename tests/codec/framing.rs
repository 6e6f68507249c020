//! Byte-level layout and gzip transparency

use crate::common::*;
use flate2::write::GzEncoder;
use nbtkit::{decode, encode, encode_with, Compression, EncodeConfig, Tag, TagValue};
use std::io::Write;

#[test]
fn xp_level_decodes_and_reencodes_identically() {
    let decoded = decode(&XP_LEVEL_BYTES).unwrap();
    assert!(!decoded.compressed);
    assert_eq!(
        decoded.root,
        Tag::compound("", vec![Tag::int("XpLevel", 5)])
    );
    assert_eq!(encode(&decoded.root).unwrap(), XP_LEVEL_BYTES.to_vec());
}

#[test]
fn externally_gzipped_buffer_is_detected() {
    // Produced by a plain gzip stream rather than our encoder
    let mut gz = GzEncoder::new(Vec::new(), flate2::Compression::best());
    gz.write_all(&XP_LEVEL_BYTES).unwrap();
    let packed = gz.finish().unwrap();

    let decoded = decode(&packed).unwrap();
    assert!(decoded.compressed);
    assert_eq!(decoded.root, decode(&XP_LEVEL_BYTES).unwrap().root);
}

#[test]
fn every_kind_roundtrips_at_every_level() {
    let root = player();
    for level in [0, 1, 6, 9] {
        let config = EncodeConfig::default().with_compression(Compression::Gzip { level });
        let bytes = encode_with(&root, &config).unwrap();
        assert_eq!(decode(&bytes).unwrap().root, root, "level {level}");
    }
}

#[test]
fn compression_does_not_change_raw_bytes() {
    let raw = encode(&player()).unwrap();
    let packed = encode_with(&player(), &EncodeConfig::gzip()).unwrap();
    let mut inflated = Vec::new();
    let mut decoder = flate2::read::GzDecoder::new(&packed[..]);
    std::io::Read::read_to_end(&mut decoder, &mut inflated).unwrap();
    assert_eq!(inflated, raw);
}

#[test]
fn long_fidelity_beyond_double_precision() {
    let values = [i64::MIN, i64::MAX, 9_007_199_254_740_993, -9_007_199_254_740_993];
    let root = Tag::compound(
        "",
        vec![
            Tag::long("a", values[0]),
            Tag::long("b", values[1]),
            Tag::long("c", values[2]),
            Tag::long_array("d", values.to_vec()),
        ],
    );
    let back = decode(&encode(&root).unwrap()).unwrap().root;
    assert_eq!(back.get(&p(".c")).unwrap().value, TagValue::Long(values[2]));
    assert_eq!(
        back.get(&p(".d")).unwrap().value,
        TagValue::LongArray(values.to_vec())
    );
    let text = back.to_string();
    assert!(text.contains("9007199254740993L"));
    assert!(text.contains("-9223372036854775808L"));
}

#[test]
fn end_root_is_single_zero_byte() {
    assert_eq!(encode(&Tag::end()).unwrap(), vec![0]);
    assert_eq!(decode(&[0]).unwrap().root, Tag::end());
}

#[test]
fn empty_list_keeps_declared_kind_through_roundtrip() {
    let root = player();
    let back = decode(&encode(&root).unwrap()).unwrap().root;
    let tags = back.get(&p(".Tags")).unwrap().value.as_list().unwrap();
    assert!(tags.is_empty());
    assert_eq!(tags.element_kind(), nbtkit::TagKind::End);
}

#[test]
fn duplicate_names_survive_in_order() {
    let root = Tag::compound("", vec![Tag::int("a", 1), Tag::int("b", 2), Tag::int("a", 3)]);
    let back = decode(&encode(&root).unwrap()).unwrap().root;
    assert_eq!(back, root);
    assert_eq!(back.get(&p(".a#1")).unwrap().value, TagValue::Int(3));
}
