//! Bounded undo/redo history
//!
//! `History<T>` keeps two stacks of snapshots, most recent last. Committing
//! a new state pushes the old one onto the undo stack and forgets every
//! redo state. Undo and redo move the current state across to the other
//! stack. The undo stack never grows past its depth: the oldest snapshot
//! is dropped first.
//!
//! Snapshots are whole values. With `T = Arc<Tag>` each one costs a
//! pointer, since unchanged subtrees are shared between snapshots.

use nbtkit_core::limits::DEFAULT_HISTORY_DEPTH;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Undo and redo stacks over snapshots of `T`
#[derive(Debug, Clone)]
pub struct History<T> {
    undo: VecDeque<T>,
    redo: VecDeque<T>,
    depth: usize,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl<T: Clone> History<T> {
    /// Empty history keeping at most `depth` undo snapshots
    pub fn new(depth: usize) -> Self {
        History {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            depth,
        }
    }

    /// Maximum number of undo snapshots
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Record a transition from `current` to `new` and return `new`
    pub fn commit(&mut self, current: T, new: T) -> T {
        self.undo.push_back(current);
        let dropped_redo = self.redo.len();
        self.redo.clear();
        let evicted = Self::trim(&mut self.undo, self.depth);
        if evicted > 0 {
            warn!(evicted, depth = self.depth, "Undo history full, dropped oldest snapshot");
        }
        debug!(
            undo = self.undo.len(),
            dropped_redo, "Committed history snapshot"
        );
        new
    }

    /// Step back one state
    ///
    /// Returns the previous state, or `None` with nothing changed when
    /// there is nothing to undo.
    pub fn undo(&mut self, current: &T) -> Option<T> {
        let previous = self.undo.pop_back()?;
        self.redo.push_back(current.clone());
        Self::trim(&mut self.redo, self.depth);
        debug!(undo = self.undo.len(), redo = self.redo.len(), "Undo");
        Some(previous)
    }

    /// Step forward one state
    ///
    /// Returns the next state, or `None` with nothing changed when there is
    /// nothing to redo.
    pub fn redo(&mut self, current: &T) -> Option<T> {
        let next = self.redo.pop_back()?;
        self.undo.push_back(current.clone());
        Self::trim(&mut self.undo, self.depth);
        debug!(undo = self.undo.len(), redo = self.redo.len(), "Redo");
        Some(next)
    }

    /// Forget every snapshot
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// True if [`History::undo`] would change state
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// True if [`History::redo`] would change state
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Snapshots on the undo stack
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Snapshots on the redo stack
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    fn trim(stack: &mut VecDeque<T>, depth: usize) -> usize {
        let mut evicted = 0;
        while stack.len() > depth {
            stack.pop_front();
            evicted += 1;
        }
        evicted
    }
}
