//! Pure tree edits
//!
//! Every operation takes the current root by reference and returns a new
//! root. The input is never modified: only the nodes on the path from the
//! root to the edit point are rebuilt, and every other subtree is shared
//! with the input through its `Arc`.
//!
//! A failed edit returns an [`EditError`] and no tree.

use nbtkit_core::tag::check_string_len;
use nbtkit_core::walk::{child_segments, locate};
use nbtkit_core::{EditError, PathSegment, Tag, TagError, TagKind, TagList, TagPath, TagValue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// A child to be appended to a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChild {
    /// Required for compound targets, forbidden for list targets
    pub name: Option<String>,
    /// Payload of the new node
    pub value: TagValue,
}

impl NewChild {
    /// Child for a compound
    pub fn named(name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        NewChild {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// Element for a list
    pub fn element(value: impl Into<TagValue>) -> Self {
        NewChild {
            name: None,
            value: value.into(),
        }
    }
}

/// A recorded edit intent
///
/// Ops serialize, so they can be logged and replayed against another copy
/// of the same document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Replace the payload at `path`, keeping its kind
    UpdateValue {
        /// Target node
        path: TagPath,
        /// New payload
        value: TagValue,
    },
    /// Change the name of the root or of a compound child
    Rename {
        /// Target node
        path: TagPath,
        /// New name
        name: String,
    },
    /// Append a child to the container at `path`
    AddChild {
        /// Target container
        path: TagPath,
        /// Child to append
        child: NewChild,
    },
    /// Append a zero-valued child of `kind`
    AddDefaultChild {
        /// Target container
        path: TagPath,
        /// Name for compound targets
        name: Option<String>,
        /// Kind of the new child; lists may leave it to the element kind
        kind: Option<TagKind>,
    },
    /// Remove one node
    Delete {
        /// Node to remove
        path: TagPath,
    },
    /// Remove a set of nodes in one pass
    DeleteMany {
        /// Nodes to remove
        paths: Vec<TagPath>,
    },
}

/// Apply a recorded op
pub fn apply(root: &Tag, op: &EditOp) -> Result<Tag, EditError> {
    match op {
        EditOp::UpdateValue { path, value } => update_value(root, path, value.clone()),
        EditOp::Rename { path, name } => rename(root, path, name),
        EditOp::AddChild { path, child } => add_child(root, path, child.clone()),
        EditOp::AddDefaultChild { path, name, kind } => {
            add_default_child(root, path, name.clone(), *kind)
        }
        EditOp::Delete { path } => delete(root, path),
        EditOp::DeleteMany { paths } => {
            let set: HashSet<TagPath> = paths.iter().cloned().collect();
            delete_many(root, &set)
        }
    }
}

/// Replace the payload at `path`
///
/// The new payload must have the same kind as the old one.
pub fn update_value(root: &Tag, path: &TagPath, value: TagValue) -> Result<Tag, EditError> {
    value.validate()?;
    let out = modify_at(root, path, |target| {
        if target.kind() != value.kind() {
            return Err(EditError::KindMismatch {
                expected: target.kind(),
                found: value.kind(),
            });
        }
        Ok(Tag {
            name: target.name.clone(),
            value,
        })
    })?;
    debug!(%path, "Updated value");
    Ok(out)
}

/// Change the name of the root or of a compound child
pub fn rename(root: &Tag, path: &TagPath, name: &str) -> Result<Tag, EditError> {
    let target = root
        .get(path)
        .ok_or_else(|| EditError::PathNotFound(path.clone()))?;
    let renamable = match path.last_segment() {
        None => target.kind() != TagKind::End,
        Some(PathSegment::Child { .. }) => true,
        Some(PathSegment::Index(_)) => false,
    };
    if !renamable {
        return Err(EditError::NotRenamable(path.clone()));
    }
    check_string_len(name)?;
    let out = modify_at(root, path, |target| Ok(target.clone().with_name(name)))?;
    debug!(%path, name, "Renamed tag");
    Ok(out)
}

/// Append a child to the Compound or List at `path`
///
/// Compound targets need a named, non-End child. List targets need an
/// unnamed child of the declared element kind; an empty list declaring End
/// takes the child's kind.
pub fn add_child(root: &Tag, path: &TagPath, child: NewChild) -> Result<Tag, EditError> {
    if child.value.kind() == TagKind::End {
        return Err(EditError::EndTagNotAllowed);
    }
    if let Some(name) = &child.name {
        check_string_len(name)?;
    }
    child.value.validate()?;
    let out = modify_at(root, path, |target| match &target.value {
        TagValue::Compound(children) => {
            let name = child.name.ok_or(EditError::MissingName)?;
            let mut children = children.clone();
            children.push(Arc::new(Tag::new(name, child.value)));
            Ok(Tag {
                name: target.name.clone(),
                value: TagValue::Compound(children),
            })
        }
        TagValue::List(list) => {
            if child.name.is_some() {
                return Err(EditError::UnexpectedName);
            }
            let mut list = list.clone();
            list.push(Tag::unnamed(child.value)).map_err(|e| match e {
                TagError::ListKindMismatch {
                    expected, found, ..
                } => EditError::KindMismatch { expected, found },
                other => EditError::Invalid(other),
            })?;
            Ok(Tag {
                name: target.name.clone(),
                value: TagValue::List(list),
            })
        }
        _ => Err(EditError::NotAContainer {
            path: path.clone(),
            kind: target.kind(),
        }),
    })?;
    debug!(%path, "Added child");
    Ok(out)
}

/// Append a zero-valued child
///
/// With `kind` unset a List target uses its declared element kind. An
/// unset kind anywhere else, or an empty list that has no kind yet,
/// resolves to End and is rejected.
pub fn add_default_child(
    root: &Tag,
    path: &TagPath,
    name: Option<String>,
    kind: Option<TagKind>,
) -> Result<Tag, EditError> {
    let target = root
        .get(path)
        .ok_or_else(|| EditError::PathNotFound(path.clone()))?;
    let kind = match (kind, &target.value) {
        (Some(kind), _) => kind,
        (None, TagValue::List(list)) => list.element_kind(),
        (None, _) => TagKind::End,
    };
    let value = TagValue::default_for(kind).ok_or(EditError::EndTagNotAllowed)?;
    add_child(root, path, NewChild { name, value })
}

/// Remove the node at `path`
pub fn delete(root: &Tag, path: &TagPath) -> Result<Tag, EditError> {
    let last = path.last_segment().ok_or(EditError::RootNotDeletable)?;
    let parent = path.parent().unwrap_or_default();
    let out = modify_at(root, &parent, |target| {
        let pos = locate(target, last).ok_or_else(|| EditError::PathNotFound(path.clone()))?;
        let mut children = target.children().to_vec();
        children.remove(pos);
        with_children(target, children)
    })?;
    debug!(%path, "Deleted tag");
    Ok(out)
}

/// Remove every node whose path is in `paths`
///
/// Membership is decided in a single top-down walk of the current tree, so
/// removing one node never shifts the address of another before it is
/// checked. A matched node is dropped whole without looking inside it.
/// Paths that match nothing are ignored; an empty set returns an equal tree.
pub fn delete_many(root: &Tag, paths: &HashSet<TagPath>) -> Result<Tag, EditError> {
    if paths.iter().any(TagPath::is_root) {
        return Err(EditError::RootNotDeletable);
    }
    // Only walk into nodes that lead to at least one selected path
    let mut spine: HashSet<TagPath> = HashSet::new();
    for path in paths {
        let mut current = path.parent();
        while let Some(p) = current {
            if !spine.insert(p.clone()) {
                break;
            }
            current = p.parent();
        }
    }

    let mut path = TagPath::root();
    let mut removed = 0;
    let out = match prune(root, &mut path, paths, &spine, &mut removed)? {
        Some(tag) => tag,
        None => root.clone(),
    };
    debug!(requested = paths.len(), removed, "Deleted tags");
    Ok(out)
}

/// Rebuilt node, or `None` when nothing below it was removed
fn prune(
    node: &Tag,
    path: &mut TagPath,
    targets: &HashSet<TagPath>,
    spine: &HashSet<TagPath>,
    removed: &mut usize,
) -> Result<Option<Tag>, EditError> {
    if !spine.contains(path) {
        return Ok(None);
    }
    let mut changed = false;
    let mut kept = Vec::with_capacity(node.children().len());
    for (segment, child) in child_segments(node).into_iter().zip(node.children()) {
        path.push(segment);
        if targets.contains(path) {
            *removed += 1;
            changed = true;
        } else {
            match prune(child, path, targets, spine, removed)? {
                Some(rebuilt) => {
                    changed = true;
                    kept.push(Arc::new(rebuilt));
                }
                None => kept.push(Arc::clone(child)),
            }
        }
        path.pop();
    }
    if !changed {
        return Ok(None);
    }
    with_children(node, kept).map(Some)
}

/// Apply `f` to the node at `path` and rebuild the spine above it
fn modify_at<F>(root: &Tag, path: &TagPath, f: F) -> Result<Tag, EditError>
where
    F: FnOnce(&Tag) -> Result<Tag, EditError>,
{
    rebuild(root, path.segments(), path, f)
}

fn rebuild<F>(node: &Tag, rest: &[PathSegment], full: &TagPath, f: F) -> Result<Tag, EditError>
where
    F: FnOnce(&Tag) -> Result<Tag, EditError>,
{
    match rest.split_first() {
        None => f(node),
        Some((segment, tail)) => {
            let pos =
                locate(node, segment).ok_or_else(|| EditError::PathNotFound(full.clone()))?;
            let child = rebuild(&node.children()[pos], tail, full, f)?;
            let mut children = node.children().to_vec();
            children[pos] = Arc::new(child);
            with_children(node, children)
        }
    }
}

/// Same container with a new child vector
fn with_children(node: &Tag, children: Vec<Arc<Tag>>) -> Result<Tag, EditError> {
    let value = match &node.value {
        TagValue::Compound(_) => TagValue::Compound(children),
        TagValue::List(list) => TagValue::List(TagList::from_shared(list.element_kind(), children)?),
        _ => {
            return Err(EditError::NotAContainer {
                path: TagPath::root(),
                kind: node.kind(),
            })
        }
    };
    Ok(Tag {
        name: node.name.clone(),
        value,
    })
}
