//! Malformed buffers are rejected whole

use crate::common::*;
use nbtkit::{decode, decode_with, encode, DecodeConfig, FormatError};

#[test]
fn every_truncation_of_a_real_document_fails() {
    let bytes = encode(&player()).unwrap();
    for len in 0..bytes.len() {
        assert!(
            decode(&bytes[..len]).is_err(),
            "prefix of {len} bytes decoded"
        );
    }
}

#[test]
fn unknown_kind_reports_offset() {
    let mut bytes = XP_LEVEL_BYTES.to_vec();
    bytes[3] = 0x2A;
    assert_eq!(
        decode(&bytes),
        Err(FormatError::UnknownKind { id: 0x2A, offset: 3 })
    );
}

#[test]
fn negative_list_count_is_fatal() {
    let bytes = [0x09, 0x00, 0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF];
    assert!(matches!(
        decode(&bytes),
        Err(FormatError::NegativeLength { length: -1, .. })
    ));
}

#[test]
fn end_list_with_items_is_fatal() {
    let bytes = [0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03];
    assert!(matches!(
        decode(&bytes),
        Err(FormatError::EndListWithItems { count: 3, .. })
    ));
}

#[test]
fn forged_length_does_not_allocate_before_failing() {
    // LongArray claiming i32::MAX elements followed by nothing
    let bytes = [0x0C, 0x00, 0x00, 0x7F, 0xFF, 0xFF, 0xFF];
    assert!(matches!(
        decode(&bytes),
        Err(FormatError::UnexpectedEof { .. })
    ));
    // List of Compounds claiming i32::MAX elements, each missing
    let bytes = [0x09, 0x00, 0x00, 0x0A, 0x7F, 0xFF, 0xFF, 0xFF];
    assert!(matches!(
        decode(&bytes),
        Err(FormatError::UnexpectedEof { .. })
    ));
}

#[test]
fn invalid_utf8_in_string_payload() {
    let bytes = [0x08, 0x00, 0x00, 0x00, 0x02, 0xC3, 0x28];
    assert_eq!(decode(&bytes), Err(FormatError::InvalidUtf8 { offset: 5 }));
}

#[test]
fn hostile_nesting_hits_depth_limit() {
    // 10,000 nested lists of lists, never closed
    let mut bytes = vec![0x09, 0x00, 0x00];
    for _ in 0..10_000 {
        bytes.extend_from_slice(&[0x09, 0x00, 0x00, 0x00, 0x01]);
    }
    assert_eq!(
        decode(&bytes),
        Err(FormatError::DepthExceeded { max: 512 })
    );
}

#[test]
fn trailing_bytes_policy() {
    let mut bytes = XP_LEVEL_BYTES.to_vec();
    bytes.push(0x00);
    assert!(decode(&bytes).is_ok());
    assert_eq!(
        decode_with(&bytes, &DecodeConfig::strict()),
        Err(FormatError::TrailingBytes {
            offset: 18,
            remaining: 1
        })
    );
}
