//! Whatever sequence of edits a document accepts, it can still be saved

use crate::common::*;
use nbtkit::{decode, Document, EditOp, NewChild, TagKind, TagValue};
use proptest::prelude::*;

/// Text lengths around the 2-byte prefix limit as well as ordinary ones
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{0,8}",
        (65_530usize..65_540).prop_map(|n| "a".repeat(n)),
    ]
}

fn op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        any::<i32>().prop_map(|n| EditOp::UpdateValue {
            path: p(".XpLevel"),
            value: TagValue::Int(n),
        }),
        text_strategy().prop_map(|s| EditOp::UpdateValue {
            path: p(".Name"),
            value: TagValue::String(s),
        }),
        text_strategy().prop_map(|name| EditOp::Rename {
            path: p(".Health"),
            name,
        }),
        (text_strategy(), text_strategy()).prop_map(|(name, s)| EditOp::AddChild {
            path: p(".Abilities"),
            child: NewChild::named(name, s),
        }),
        (0usize..4).prop_map(|i| EditOp::Delete {
            path: p(&format!(".Inventory[{}]", i)),
        }),
        Just(EditOp::AddDefaultChild {
            path: p(".Inventory"),
            name: None,
            kind: None,
        }),
        Just(EditOp::AddDefaultChild {
            path: p(".Pos"),
            name: None,
            kind: Some(TagKind::Double),
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, ..ProptestConfig::default() })]

    #[test]
    fn accepted_edits_always_encode(ops in prop::collection::vec(op_strategy(), 1..12)) {
        let mut doc = Document::from_root(player(), false, 16);
        for op in &ops {
            let before = doc.snapshot();
            if doc.apply(op).is_err() {
                prop_assert!(std::sync::Arc::ptr_eq(&before, &doc.snapshot()));
            }
        }
        let bytes = doc.encode(None).unwrap();
        prop_assert_eq!(&decode(&bytes).unwrap().root, doc.root());
    }
}
