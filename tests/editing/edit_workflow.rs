//! Edit sessions over a decoded document

use crate::common::*;
use nbtkit::{
    decode, encode, parse_value, Document, EditError, EditOp, NewChild, TagKind, TagPath,
    TagValue,
};
use std::sync::Arc;

fn open_player() -> Document {
    let bytes = encode(&player()).unwrap();
    Document::decode(&bytes, &nbtkit::DecodeConfig::default(), 64).unwrap()
}

#[test]
fn inline_edit_then_save_roundtrips() {
    let mut doc = open_player();
    let value = parse_value(TagKind::Long, "9007199254740993").unwrap();
    doc.apply(&EditOp::UpdateValue {
        path: p(".Seed"),
        value,
    })
    .unwrap();

    let saved = doc.encode(None).unwrap();
    let back = decode(&saved).unwrap().root;
    assert_eq!(
        back.get(&p(".Seed")).unwrap().value,
        TagValue::Long(9_007_199_254_740_993)
    );
    assert_eq!(&back, doc.root());
}

#[test]
fn rejected_edits_leave_document_untouched() {
    let mut doc = open_player();
    let before = doc.snapshot();

    let attempts = [
        EditOp::UpdateValue {
            path: p(".XpLevel"),
            value: TagValue::Short(1),
        },
        EditOp::AddChild {
            path: p(".Pos"),
            child: NewChild::element(1.0f32),
        },
        EditOp::Rename {
            path: p(".Inventory[0]"),
            name: "x".into(),
        },
        EditOp::Delete {
            path: TagPath::root(),
        },
        EditOp::Delete {
            path: p(".Inventory[9]"),
        },
        EditOp::UpdateValue {
            path: p(".Name"),
            value: TagValue::String("a".repeat(70_000)),
        },
        EditOp::Rename {
            path: p(".Name"),
            name: "a".repeat(70_000),
        },
    ];
    for op in &attempts {
        assert!(doc.apply(op).is_err(), "{op:?} should fail");
    }
    assert!(Arc::ptr_eq(&before, &doc.snapshot()));
    assert!(!doc.history().can_undo());
    assert!(!doc.is_dirty());
}

#[test]
fn list_homogeneity_is_enforced() {
    let mut doc = open_player();
    let err = doc
        .apply(&EditOp::AddChild {
            path: p(".Inventory"),
            child: NewChild::element(TagValue::Int(1)),
        })
        .unwrap_err();
    assert_eq!(
        err,
        EditError::KindMismatch {
            expected: TagKind::Compound,
            found: TagKind::Int
        }
    );

    doc.apply(&EditOp::AddDefaultChild {
        path: p(".Inventory"),
        name: None,
        kind: None,
    })
    .unwrap();
    let inventory = doc.root().get(&p(".Inventory")).unwrap();
    assert_eq!(inventory.children().len(), 4);
    assert_eq!(inventory.children()[3].value, TagValue::compound(vec![]));
}

#[test]
fn empty_untyped_list_adopts_first_child_kind() {
    let mut doc = open_player();
    doc.apply(&EditOp::AddChild {
        path: p(".Tags"),
        child: NewChild::element("builder"),
    })
    .unwrap();
    let err = doc
        .apply(&EditOp::AddChild {
            path: p(".Tags"),
            child: NewChild::element(3i32),
        })
        .unwrap_err();
    assert!(matches!(err, EditError::KindMismatch { .. }));
    let tags = doc.root().get(&p(".Tags")).unwrap().value.as_list().unwrap();
    assert_eq!(tags.element_kind(), TagKind::String);
    assert_eq!(tags.len(), 1);
}

#[test]
fn unrelated_subtrees_are_shared_across_snapshots() {
    let mut doc = open_player();
    let before = doc.snapshot();
    doc.apply(&EditOp::Rename {
        path: p(".Abilities"),
        name: "abilities".into(),
    })
    .unwrap();
    let after = doc.snapshot();
    let inventory_before = &before.children()[7];
    let inventory_after = &after.children()[7];
    assert!(Arc::ptr_eq(inventory_before, inventory_after));
}

#[test]
fn replayed_ops_give_the_same_tree() {
    let ops = vec![
        EditOp::AddDefaultChild {
            path: TagPath::root(),
            name: Some("Score".into()),
            kind: Some(TagKind::Int),
        },
        EditOp::UpdateValue {
            path: p(".Score"),
            value: TagValue::Int(7),
        },
        EditOp::DeleteMany {
            paths: vec![p(".Inventory[0]"), p(".Inventory[2]"), p(".Air")],
        },
    ];
    let log = serde_json::to_string(&ops).unwrap();

    let mut live = open_player();
    for op in &ops {
        live.apply(op).unwrap();
    }

    let replayed: Vec<EditOp> = serde_json::from_str(&log).unwrap();
    let mut copy = open_player();
    for op in &replayed {
        copy.apply(op).unwrap();
    }
    assert_eq!(live.root(), copy.root());
    assert_eq!(
        copy.root().get(&p(".Inventory[0].id")).unwrap().value.as_str(),
        Some("minecraft:dirt")
    );
}
