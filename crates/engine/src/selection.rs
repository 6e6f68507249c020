//! Multi-node selection over a tree
//!
//! Paths are kept in the order they were selected. The anchor is the last
//! path clicked without shift and is where a range extension starts.

use crate::edit::delete_many;
use nbtkit_core::walk::{invert, range_between, resolve};
use nbtkit_core::{EditError, Tag, TagPath};
use std::collections::HashSet;

/// A set of selected paths with a range anchor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    paths: Vec<TagPath>,
    anchor: Option<TagPath>,
}

impl Selection {
    /// Nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected paths in selection order
    pub fn paths(&self) -> &[TagPath] {
        &self.paths
    }

    /// Start of the next range extension
    pub fn anchor(&self) -> Option<&TagPath> {
        self.anchor.as_ref()
    }

    /// True if `path` is selected
    pub fn contains(&self, path: &TagPath) -> bool {
        self.paths.contains(path)
    }

    /// Number of selected paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Drop everything, anchor included
    pub fn clear(&mut self) {
        self.paths.clear();
        self.anchor = None;
    }

    /// Add or remove one path and move the anchor to it
    pub fn toggle(&mut self, path: TagPath) {
        if let Some(pos) = self.paths.iter().position(|p| *p == path) {
            self.paths.remove(pos);
        } else {
            self.paths.push(path.clone());
        }
        self.anchor = Some(path);
    }

    /// Select exactly one path
    pub fn select_only(&mut self, path: TagPath) {
        self.paths.clear();
        self.paths.push(path.clone());
        self.anchor = Some(path);
    }

    /// Select the display-order range from the anchor to `path`
    ///
    /// Without an anchor, or with one that no longer resolves, this is
    /// [`Selection::select_only`]. The anchor stays put so repeated
    /// extensions pivot on the same node.
    pub fn extend_to(&mut self, root: &Tag, path: TagPath) {
        let range = match &self.anchor {
            Some(anchor) => range_between(root, anchor, &path),
            None => Vec::new(),
        };
        if range.is_empty() {
            self.select_only(path);
        } else {
            self.paths = range;
        }
    }

    /// Select every non-root node that is not selected now
    pub fn invert(&mut self, root: &Tag) {
        let selected: HashSet<TagPath> = self.paths.iter().cloned().collect();
        self.paths = invert(root, &selected);
        self.anchor = None;
    }

    /// Forget paths that no longer resolve in `root`
    pub fn prune(&mut self, root: &Tag) {
        self.paths.retain(|p| resolve(root, p).is_some());
        if let Some(anchor) = &self.anchor {
            if resolve(root, anchor).is_none() {
                self.anchor = None;
            }
        }
    }

    /// Delete every selected node except the root and clear the selection
    ///
    /// On error the selection is kept.
    pub fn delete_selected(&mut self, root: &Tag) -> Result<Tag, EditError> {
        let targets: HashSet<TagPath> = self
            .paths
            .iter()
            .filter(|p| !p.is_root())
            .cloned()
            .collect();
        let out = delete_many(root, &targets)?;
        self.clear();
        Ok(out)
    }
}
