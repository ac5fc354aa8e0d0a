//! Text buffer for the editing engine.
//!
//! Wraps `ropey::Rope` and owns the no-carriage-return invariant: every write
//! that originates outside the engine passes through `strip_carriage_returns`.

use ropey::Rope;
use std::ops::Range;

use crate::util::strip_carriage_returns;

/// The edited text. All offsets are char indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a TextBuffer from a string slice, dropping carriage returns
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(&strip_carriage_returns(s)),
        }
    }

    /// Access the underlying Rope. Cloning it is O(1).
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Replace the contents with a previously captured rope
    pub fn restore(&mut self, rope: Rope) {
        self.rope = rope;
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get character at index, None if out of bounds
    pub fn char_at(&self, index: usize) -> Option<char> {
        (index < self.rope.len_chars()).then(|| self.rope.char(index))
    }

    pub fn chars(&self) -> ropey::iter::Chars<'_> {
        self.rope.chars()
    }

    /// Get slice of text as String (by char indices, clamped)
    pub fn slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Get full content as String
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Insert text at a char offset (clamped). Returns the number of chars inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let text = strip_carriage_returns(text);
        let clamped = offset.min(self.len_chars());
        self.rope.insert(clamped, &text);
        text.chars().count()
    }

    /// Remove text in char range (clamped)
    pub fn remove(&mut self, range: Range<usize>) {
        let end = range.end.min(self.len_chars());
        let start = range.start.min(end);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Set content, replacing everything
    pub fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(&strip_carriage_returns(text));
    }

    /// Index of the first `'\n'` at or after `from`, or the buffer length
    pub fn next_newline(&self, from: usize) -> usize {
        let len = self.len_chars();
        let from = from.min(len);
        self.rope
            .chars_at(from)
            .position(|c| c == '\n')
            .map_or(len, |p| from + p)
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
