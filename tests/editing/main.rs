#[path = "../common/mod.rs"]
mod common;

mod edit_workflow;
mod history_bounds;
mod save_after_edits;
mod selection_workflow;
