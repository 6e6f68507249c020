//! Undo/redo across a whole editing session

use crate::common::*;
use nbtkit::{EditOp, EditorConfig, TagValue, Workspace};

fn set_xp(n: i32) -> EditOp {
    EditOp::UpdateValue {
        path: p(".XpLevel"),
        value: TagValue::Int(n),
    }
}

#[test]
fn undo_inverts_commit_and_redo_inverts_undo() {
    let mut ws = Workspace::default();
    let id = ws.create(player());
    let doc = ws.get_mut(id).unwrap();

    let original = doc.snapshot();
    doc.apply(&set_xp(10)).unwrap();
    let edited = doc.snapshot();

    assert!(doc.undo());
    assert_eq!(doc.root(), original.as_ref());
    assert!(doc.redo());
    assert_eq!(doc.root(), edited.as_ref());
}

#[test]
fn redo_is_invalidated_by_a_new_edit() {
    let mut ws = Workspace::default();
    let id = ws.create(player());
    let doc = ws.get_mut(id).unwrap();
    doc.apply(&set_xp(1)).unwrap();
    doc.apply(&set_xp(2)).unwrap();
    doc.undo();
    doc.undo();
    assert_eq!(doc.history().redo_len(), 2);
    doc.apply(&set_xp(3)).unwrap();
    assert_eq!(doc.history().redo_len(), 0);
    assert!(!doc.redo());
}

#[test]
fn configured_depth_caps_undo() {
    let config = EditorConfig::from_toml_str("history_depth = 3").unwrap();
    let mut ws = Workspace::new(config);
    let id = ws.create(player());
    let doc = ws.get_mut(id).unwrap();
    for n in 0..20 {
        doc.apply(&set_xp(n)).unwrap();
    }
    assert_eq!(doc.history().undo_len(), 3);

    let mut steps = 0;
    while doc.undo() {
        steps += 1;
    }
    assert_eq!(steps, 3);
    assert_eq!(
        doc.root().get(&p(".XpLevel")).unwrap().value,
        TagValue::Int(16)
    );
}

#[test]
fn undo_back_to_saved_state_is_still_dirty() {
    let mut ws = Workspace::default();
    let id = ws.open(&XP_LEVEL_BYTES).unwrap();
    let doc = ws.get_mut(id).unwrap();
    doc.apply(&set_xp(9)).unwrap();
    doc.undo();
    // Dirty tracks "changed since save", and undo is a change
    assert!(doc.is_dirty());
    doc.mark_saved();
    assert!(!doc.is_dirty());
    assert!(ws.dirty_ids().is_empty());
}
