//! Editor-session undo/redo history.
//!
//! A bounded, in-memory history of content-editing states, decoupled from
//! persisted version snapshots: the stack tracks what one editing session
//! did, never what was published. Operations never suspend.
//!
//! Rapid pushes inside the debounce window coalesce into a single history
//! step (replacing the newest entry) so per-keystroke updates do not flood
//! the stack. The window is best-effort UX smoothing, not a correctness
//! boundary, and is configurable per stack.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Maximum number of retained undo entries unless overridden.
pub const DEFAULT_MAX_STACK_SIZE: usize = 50;

/// Default coalescing window for rapid successive pushes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// The editing action that produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    Edit,
    Save,
    Publish,
    Revert,
    Create,
    Delete,
    Reorder,
}

/// One recorded editing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditState<T> {
    pub data: T,
    pub action: EditAction,
    pub description: Option<String>,
    pub affected_block_id: Option<DbId>,
    pub recorded_at: Timestamp,
}

/// Serializable copy of both stacks, for best-effort mirroring into a
/// transient per-tab store. Restoring re-applies the capacity cap; losing a
/// snapshot never affects in-memory correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySnapshot<T> {
    pub undo: Vec<EditState<T>>,
    pub redo: Vec<EditState<T>>,
}

/// Bounded two-stack undo/redo history.
///
/// The newest undo entry is the *current* state, not itself undoable:
/// [`UndoRedoStack::undo`] needs at least two entries to produce a result.
pub struct UndoRedoStack<T> {
    undo: VecDeque<EditState<T>>,
    redo: Vec<EditState<T>>,
    max_size: usize,
    debounce: Duration,
    last_push: Option<Instant>,
}

impl<T: Clone> UndoRedoStack<T> {
    /// Create a stack with the default capacity and debounce window.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_STACK_SIZE, DEFAULT_DEBOUNCE)
    }

    /// Create a stack with explicit limits. `max_size` is clamped to at
    /// least 1 so the current state can always be held.
    pub fn with_limits(max_size: usize, debounce: Duration) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_size: max_size.max(1),
            debounce,
            last_push: None,
        }
    }

    /// Record a new state.
    ///
    /// A push within the debounce window replaces the newest entry instead
    /// of appending. Either way the redo stack is cleared: any new forward
    /// action invalidates prior redo history.
    pub fn push_state(
        &mut self,
        data: T,
        action: EditAction,
        description: Option<String>,
        affected_block_id: Option<DbId>,
    ) {
        let entry = EditState {
            data,
            action,
            description,
            affected_block_id,
            recorded_at: chrono::Utc::now(),
        };

        let coalesce = self
            .last_push
            .is_some_and(|at| at.elapsed() < self.debounce);

        match self.undo.back_mut() {
            Some(newest) if coalesce => *newest = entry,
            _ => {
                self.undo.push_back(entry);
                // Truncate from the oldest end; the newest entry is never dropped.
                while self.undo.len() > self.max_size {
                    self.undo.pop_front();
                }
            }
        }

        self.redo.clear();
        self.last_push = Some(Instant::now());
    }

    /// Step back one state, returning the data of the previous entry.
    ///
    /// Returns `None` (and mutates nothing) with fewer than two entries —
    /// the sole entry is the current baseline.
    pub fn undo(&mut self) -> Option<T> {
        if self.undo.len() < 2 {
            return None;
        }
        let current = self.undo.pop_back()?;
        self.redo.push(current);
        // A push right after undo must append, never coalesce into the
        // restored entry.
        self.last_push = None;
        self.undo.back().map(|state| state.data.clone())
    }

    /// Step forward one state, returning its data, or `None` if nothing was
    /// undone since the last push.
    pub fn redo(&mut self) -> Option<T> {
        let entry = self.redo.pop()?;
        let data = entry.data.clone();
        self.undo.push_back(entry);
        while self.undo.len() > self.max_size {
            self.undo.pop_front();
        }
        self.last_push = None;
        Some(data)
    }

    /// Drop all history, e.g. on page navigation.
    pub fn clear_history(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.last_push = None;
    }

    /// `true` when [`UndoRedoStack::undo`] would produce a result.
    pub fn can_undo(&self) -> bool {
        self.undo.len() >= 2
    }

    /// `true` when [`UndoRedoStack::redo`] would produce a result.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// The current (newest) recorded state, if any.
    pub fn current(&self) -> Option<&EditState<T>> {
        self.undo.back()
    }

    /// Number of retained undo entries (including the current baseline).
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable entries.
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Copy both stacks for transient session mirroring.
    pub fn snapshot(&self) -> HistorySnapshot<T> {
        HistorySnapshot {
            undo: self.undo.iter().cloned().collect(),
            redo: self.redo.clone(),
        }
    }

    /// Replace both stacks from a snapshot, re-applying the capacity cap
    /// and resetting the coalescing timer.
    pub fn restore(&mut self, snapshot: HistorySnapshot<T>) {
        self.undo = snapshot.undo.into();
        while self.undo.len() > self.max_size {
            self.undo.pop_front();
        }
        self.redo = snapshot.redo;
        self.last_push = None;
    }
}

impl<T: Clone> Default for UndoRedoStack<T> {
    fn default() -> Self {
        Self::new()
    }
}
