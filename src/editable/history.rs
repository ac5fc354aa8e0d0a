//! Snapshot undo/redo for the text editing engine.
//!
//! Every entry is a full copy of the editor state. The text is a `Rope`, so
//! taking a snapshot shares structure with the live buffer instead of copying.

use std::time::Duration;

use ropey::Rope;

use super::cursor::CaretIndex;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_ENTRIES: usize = 200;

/// Editor state captured at a commit point
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub text: Rope,
    pub caret: CaretIndex,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub content_width: f32,
    pub content_height: f32,
}

impl Snapshot {
    /// Snapshot of a text with the caret at 0 and no scroll
    pub fn of_text(text: Rope) -> Self {
        Self {
            text,
            caret: CaretIndex::default(),
            scroll_x: 0.0,
            scroll_y: 0.0,
            content_width: 0.0,
            content_height: 0.0,
        }
    }
}

/// Undo and redo stacks plus the coalescing timer.
///
/// The undo stack is never empty: its top is the state the buffer was in at
/// the last commit.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    interval: Duration,
    since_check: Duration,
    max_entries: usize,
}

impl History {
    pub fn new(initial: Snapshot) -> Self {
        Self::with_limits(initial, DEFAULT_INTERVAL, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_limits(initial: Snapshot, interval: Duration, max_entries: usize) -> Self {
        Self {
            undo_stack: vec![initial],
            redo_stack: Vec::new(),
            interval,
            since_check: Duration::ZERO,
            max_entries: max_entries.max(1),
        }
    }

    /// The state at the last commit
    pub fn top(&self) -> &Snapshot {
        // Invariant: undo_stack.len() >= 1
        &self.undo_stack[self.undo_stack.len() - 1]
    }

    /// True when `text` differs from the last committed text
    pub fn is_dirty(&self, text: &Rope) -> bool {
        self.top().text != *text
    }

    /// Push a snapshot unless its text equals the top entry.
    ///
    /// A successful commit clears the redo stack and drops the oldest entries
    /// beyond the depth cap. Returns whether anything was pushed.
    pub fn commit(&mut self, snapshot: Snapshot) -> bool {
        if !self.is_dirty(&snapshot.text) {
            return false;
        }
        self.redo_stack.clear();
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > self.max_entries {
            let excess = self.undo_stack.len() - self.max_entries;
            self.undo_stack.drain(..excess);
        }
        tracing::trace!(
            target: "history",
            depth = self.undo_stack.len(),
            "snapshot committed"
        );
        true
    }

    /// Advance the coalescing timer. Returns true once per elapsed interval.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.since_check += dt;
        if self.since_check >= self.interval {
            self.since_check = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Step back one entry. Returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let popped = self.undo_stack.pop()?;
        self.redo_stack.push(popped);
        Some(self.top())
    }

    /// Re-apply the last undone entry. Returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(entry);
        Some(self.top())
    }

    /// Drop all history and start over from `initial`
    pub fn reset(&mut self, initial: Snapshot) {
        self.undo_stack.clear();
        self.undo_stack.push(initial);
        self.redo_stack.clear();
        self.since_check = Duration::ZERO;
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
