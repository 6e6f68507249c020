//! Whole-file read and write through `nbtkit::io`

use crate::common::*;
use nbtkit::io::{read_document, read_document_with_history, write_document};
use nbtkit::{is_gzip, Compression, DecodeConfig, EditOp, Error, TagValue};

#[test]
fn read_plain_file() {
    let (_dir, path) = temp_file("xp.dat");
    std::fs::write(&path, XP_LEVEL_BYTES).unwrap();
    let doc = read_document(&path, &DecodeConfig::default()).unwrap();
    assert!(!doc.source_compressed());
    assert!(!doc.is_dirty());
    assert_eq!(doc.root().get(&p(".XpLevel")).unwrap().value, TagValue::Int(5));
}

#[test]
fn missing_file_is_io_error() {
    let (_dir, path) = temp_file("absent.dat");
    let err = read_document(&path, &DecodeConfig::default()).unwrap_err();
    assert!(err.is_io(), "expected Io, got {err}");
}

#[test]
fn garbage_file_is_format_error() {
    let (_dir, path) = temp_file("garbage.dat");
    std::fs::write(&path, [0x0A, 0x00, 0x05, b'a']).unwrap();
    let err = read_document(&path, &DecodeConfig::default()).unwrap_err();
    assert!(err.is_format(), "expected Format, got {err}");
}

#[test]
fn bad_gzip_file_is_format_error() {
    let (_dir, path) = temp_file("broken.dat.gz");
    std::fs::write(&path, [0x1F, 0x8B, 0x08, 0x00, 0x01]).unwrap();
    let err = read_document(&path, &DecodeConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn invalid_config_is_config_error() {
    let (_dir, path) = temp_file("xp.dat");
    std::fs::write(&path, XP_LEVEL_BYTES).unwrap();
    let err = read_document(&path, &DecodeConfig::new().with_max_depth(0)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn save_keeps_source_framing_and_clears_dirty() {
    let (_dir, path) = temp_file("level.dat");
    let packed = nbtkit::encode_with(&player(), &nbtkit::EncodeConfig::gzip()).unwrap();
    std::fs::write(&path, packed).unwrap();

    let mut doc = read_document(&path, &DecodeConfig::default()).unwrap();
    assert!(doc.source_compressed());
    doc.apply(&EditOp::UpdateValue {
        path: p(".XpLevel"),
        value: TagValue::Int(30),
    })
    .unwrap();
    assert!(doc.is_dirty());

    write_document(&mut doc, &path, None).unwrap();
    assert!(!doc.is_dirty());

    let on_disk = std::fs::read(&path).unwrap();
    assert!(is_gzip(&on_disk));
    let reread = read_document(&path, &DecodeConfig::default()).unwrap();
    assert_eq!(reread.root(), doc.root());
}

#[test]
fn save_with_explicit_framing() {
    let (_dir, path) = temp_file("out.dat");
    let mut doc = nbtkit::Document::from_root(player(), true, 8);
    write_document(&mut doc, &path, Some(Compression::None)).unwrap();
    let on_disk = std::fs::read(&path).unwrap();
    assert!(!is_gzip(&on_disk));
    assert_eq!(on_disk, nbtkit::encode(&player()).unwrap());
}

#[test]
fn write_into_missing_directory_is_io_error_and_stays_dirty() {
    let (dir, _) = temp_file("unused");
    let path = dir.path().join("no_such_dir").join("out.dat");
    let mut doc = nbtkit::Document::from_root(player(), false, 8);
    doc.apply(&EditOp::Delete { path: p(".Air") }).unwrap();
    let err = write_document(&mut doc, &path, None).unwrap_err();
    assert!(err.is_io());
    assert!(doc.is_dirty());
}

#[test]
fn history_depth_is_configurable_on_read() {
    let (_dir, path) = temp_file("xp.dat");
    std::fs::write(&path, XP_LEVEL_BYTES).unwrap();
    let mut doc = read_document_with_history(&path, &DecodeConfig::default(), 2).unwrap();
    for n in 0..5 {
        doc.apply(&EditOp::UpdateValue {
            path: p(".XpLevel"),
            value: TagValue::Int(n),
        })
        .unwrap();
    }
    assert_eq!(doc.history().undo_len(), 2);
}
