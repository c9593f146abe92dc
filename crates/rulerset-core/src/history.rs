//! Bounded undo/redo over whole-state snapshots.

use std::collections::VecDeque;

/// Default number of undo states to keep.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// What a push displaced: the redo stack and, when full, the oldest snapshot.
#[derive(Debug, Clone)]
pub struct Revert<T> {
    evicted: Option<T>,
    redo: VecDeque<T>,
}

/// Two bounded stacks of snapshots.
///
/// Any fresh push clears the redo stack; when the undo stack overflows the
/// oldest snapshot is dropped.
#[derive(Debug, Clone)]
pub struct History<T> {
    undo_stack: VecDeque<T>,
    redo_stack: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<T> History<T> {
    /// Create an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a snapshot taken before a change.
    pub fn push(&mut self, state: T) {
        self.push_revertible(state);
    }

    /// Like [`push`](Self::push), but returns what the push displaced so
    /// [`revert`](Self::revert) can put it back.
    pub fn push_revertible(&mut self, state: T) -> Revert<T> {
        self.undo_stack.push_back(state);
        let redo = std::mem::take(&mut self.redo_stack);
        let evicted = if self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front()
        } else {
            None
        };
        Revert { evicted, redo }
    }

    /// Step back. Returns the snapshot to restore, or `None` when there is
    /// nothing to undo; `current` is kept for redo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop_back()?;
        push_bounded(&mut self.redo_stack, current, self.capacity);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop_back()?;
        push_bounded(&mut self.undo_stack, current, self.capacity);
        Some(next)
    }

    /// Undo a [`push_revertible`](Self::push_revertible): pop its snapshot,
    /// return the evicted snapshot to the bottom of the undo stack and restore
    /// the redo stack. Must be called before any other push.
    pub fn revert(&mut self, revert: Revert<T>) -> Option<T> {
        let state = self.undo_stack.pop_back()?;
        if let Some(evicted) = revert.evicted {
            self.undo_stack.push_front(evicted);
        }
        self.redo_stack = revert.redo;
        Some(state)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Snapshots on the undo stack, oldest first.
    pub fn undo_snapshots(&self) -> impl Iterator<Item = &T> {
        self.undo_stack.iter()
    }
}

fn push_bounded<T>(stack: &mut VecDeque<T>, state: T, capacity: usize) {
    stack.push_back(state);
    if stack.len() > capacity {
        stack.pop_front();
    }
}
