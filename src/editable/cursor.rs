//! Caret index type for the text editing engine.

use crate::layout::LineIndex;

/// Owning line resolved against a particular line-index generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineHint {
    generation: u64,
    index: usize,
    at_end_of_line: bool,
    line: usize,
}

/// A caret position: an absolute char index plus an end-of-line flag.
///
/// The end of a soft-wrapped line and the start of the next one are the same
/// buffer index; `at_end_of_line` places the caret visually on the former.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaretIndex {
    pub index: usize,
    pub at_end_of_line: bool,
    /// Cached owning line. Ignored once the line index is rebuilt or the
    /// caret moves, so it never outlives the layout it was computed from.
    hint: Option<LineHint>,
}

impl PartialEq for CaretIndex {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.at_end_of_line == other.at_end_of_line
    }
}

impl Eq for CaretIndex {}

impl CaretIndex {
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            at_end_of_line: false,
            hint: None,
        }
    }

    /// Caret drawn at the end of the soft-wrapped line ending before `index`
    pub const fn at_line_end(index: usize) -> Self {
        Self {
            index,
            at_end_of_line: true,
            hint: None,
        }
    }

    /// Line whose range contains this caret; the last line when none does
    pub fn owning_line(&self, lines: &LineIndex) -> usize {
        match self.hint {
            Some(hint)
                if hint.generation == lines.generation()
                    && hint.index == self.index
                    && hint.at_end_of_line == self.at_end_of_line
                    && hint.line < lines.len() =>
            {
                hint.line
            }
            _ => lines.line_of(self.index, self.at_end_of_line && self.index > 0),
        }
    }

    /// Resolve and cache the owning line
    pub fn locate(&mut self, lines: &LineIndex) -> usize {
        let line = self.owning_line(lines);
        self.hint = Some(LineHint {
            generation: lines.generation(),
            index: self.index,
            at_end_of_line: self.at_end_of_line,
            line,
        });
        line
    }

    /// Column of the caret within its owning line
    pub fn index_in_line(&self, lines: &LineIndex) -> usize {
        let line = lines.line(self.owning_line(lines));
        self.index.saturating_sub(line.start)
    }

    /// Same caret with `index` limited to `len`
    pub fn clamped(self, len: usize) -> Self {
        if self.index > len {
            Self::new(len)
        } else {
            self
        }
    }
}

impl From<usize> for CaretIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}
