//! Selection, range extension and bulk delete against live documents

use crate::common::*;
use nbtkit::{flatten, Document, EditOp, Selection, TagPath};

#[test]
fn shift_click_range_then_bulk_delete() {
    let mut doc = Document::from_root(player(), false, 16);
    let mut sel = Selection::new();
    sel.select_only(p(".Inventory[0]"));
    sel.extend_to(doc.root(), p(".Inventory[1].Count"));
    // Inventory[0] and its 3 children, Inventory[1] and its 3 children
    assert_eq!(sel.len(), 8);

    let new_root = sel.delete_selected(doc.root()).unwrap();
    doc.commit(new_root);
    let inventory = doc.root().get(&p(".Inventory")).unwrap();
    assert_eq!(inventory.children().len(), 1);
    assert_eq!(
        doc.root().get(&p(".Inventory[0].id")).unwrap().value.as_str(),
        Some("minecraft:sand")
    );

    assert!(doc.undo());
    assert_eq!(doc.root(), &player());
}

#[test]
fn select_all_children_by_inverting_nothing() {
    let root = player();
    let mut sel = Selection::new();
    sel.invert(&root);
    assert_eq!(sel.len(), flatten(&root).len() - 1);
    assert!(!sel.contains(&TagPath::root()));

    let emptied = sel.delete_selected(&root).unwrap();
    assert!(emptied.children().is_empty());
    assert_eq!(emptied.name(), Some(""));
}

#[test]
fn selection_is_pruned_after_an_edit_moves_things() {
    let mut doc = Document::from_root(player(), false, 16);
    let mut sel = Selection::new();
    sel.toggle(p(".Inventory[2]"));
    sel.toggle(p(".Name"));

    doc.apply(&EditOp::Delete {
        path: p(".Inventory[0]"),
    })
    .unwrap();
    sel.prune(doc.root());
    assert_eq!(sel.paths(), &[p(".Name")]);
}

#[test]
fn stale_selection_delete_is_noop() {
    let root = player();
    let mut sel = Selection::new();
    sel.toggle(p(".Gone"));
    sel.toggle(p(".Inventory[42]"));
    let out = sel.delete_selected(&root).unwrap();
    assert_eq!(out, root);
}

#[test]
fn bulk_delete_drops_subtree_once() {
    let root = player();
    let mut sel = Selection::new();
    sel.toggle(p(".Abilities"));
    sel.toggle(p(".Abilities.flying"));
    sel.toggle(p(".Pos[1]"));
    let out = sel.delete_selected(&root).unwrap();
    assert!(out.child("Abilities").is_none());
    assert_eq!(out.get(&p(".Pos")).unwrap().children().len(), 2);
}
