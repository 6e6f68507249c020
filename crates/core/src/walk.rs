//! Path resolution and traversal
//!
//! Everything here recomputes paths from the tree it is given. A path that
//! no longer matches a node (deleted, reordered) simply fails to resolve;
//! nothing in this module returns an error for a stale path.

use crate::path::{PathSegment, TagPath};
use crate::tag::{Tag, TagValue};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Segments addressing each child of `tag`, in stored order
///
/// Compound children get `(name, occurrence)` segments, list elements get
/// index segments. Scalars have no children and yield an empty vector.
pub fn child_segments(tag: &Tag) -> Vec<PathSegment> {
    match &tag.value {
        TagValue::Compound(children) => compound_segments(children),
        TagValue::List(list) => (0..list.len()).map(PathSegment::Index).collect(),
        _ => Vec::new(),
    }
}

fn compound_segments(children: &[Arc<Tag>]) -> Vec<PathSegment> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    children
        .iter()
        .map(|child| {
            let name = child.name.as_deref().unwrap_or("");
            let counter = seen.entry(name).or_insert(0);
            let occurrence = *counter;
            *counter += 1;
            PathSegment::Child {
                name: name.to_string(),
                occurrence,
            }
        })
        .collect()
}

/// Position within `tag`'s children addressed by `segment`
pub fn locate(tag: &Tag, segment: &PathSegment) -> Option<usize> {
    match (&tag.value, segment) {
        (TagValue::Compound(children), PathSegment::Child { name, occurrence }) => children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name.as_deref() == Some(name.as_str()))
            .nth(*occurrence)
            .map(|(i, _)| i),
        (TagValue::List(list), PathSegment::Index(i)) if *i < list.len() => Some(*i),
        _ => None,
    }
}

/// Node at `path`, or `None` if the path does not exist in this tree
pub fn resolve<'a>(root: &'a Tag, path: &TagPath) -> Option<&'a Tag> {
    let mut current = root;
    for segment in path.segments() {
        let pos = locate(current, segment)?;
        current = current.children()[pos].as_ref();
    }
    Some(current)
}

impl Tag {
    /// Node at `path` below this tag
    pub fn get(&self, path: &TagPath) -> Option<&Tag> {
        resolve(self, path)
    }
}

/// Visit every node in pre-order with its path, root first
pub fn walk<F>(root: &Tag, mut visit: F)
where
    F: FnMut(&TagPath, &Tag),
{
    let mut path = TagPath::root();
    walk_inner(root, &mut path, &mut visit);
}

fn walk_inner<F>(tag: &Tag, path: &mut TagPath, visit: &mut F)
where
    F: FnMut(&TagPath, &Tag),
{
    visit(path, tag);
    let segments = child_segments(tag);
    for (segment, child) in segments.into_iter().zip(tag.children()) {
        path.push(segment);
        walk_inner(child, path, visit);
        path.pop();
    }
}

/// Every path in the tree in display order
///
/// Pre-order: the root, then compound children in stored order and list
/// elements in index order, each followed by its own subtree.
pub fn flatten(root: &Tag) -> Vec<TagPath> {
    let mut out = Vec::with_capacity(root.node_count());
    walk(root, |path, _| out.push(path.clone()));
    out
}

/// Inclusive range of paths between two endpoints in display order
///
/// The endpoints may be given in either order. If either one no longer
/// resolves the range is empty.
pub fn range_between(root: &Tag, a: &TagPath, b: &TagPath) -> Vec<TagPath> {
    let order = flatten(root);
    let start = order.iter().position(|p| p == a);
    let end = order.iter().position(|p| p == b);
    match (start, end) {
        (Some(s), Some(e)) => {
            let (lo, hi) = if s <= e { (s, e) } else { (e, s) };
            order[lo..=hi].to_vec()
        }
        _ => Vec::new(),
    }
}

/// Every non-root path not in `selected`, in display order
pub fn invert(root: &Tag, selected: &HashSet<TagPath>) -> Vec<TagPath> {
    flatten(root)
        .into_iter()
        .filter(|p| !p.is_root() && !selected.contains(p))
        .collect()
}
