//! Selection types for the text editing engine.
//!
//! A selection is a pair of carets in insertion order: `start` is the fixed
//! edge and `end` the moving one. No selection is `None`, never an empty pair.

use std::ops::Range;

use super::cursor::CaretIndex;

/// A non-empty text selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Fixed edge (where the selection started)
    pub start: CaretIndex,
    /// Moving edge (follows the caret while extending)
    pub end: CaretIndex,
}

/// Which way the moving edge lies relative to the fixed edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionExtent {
    None,
    ExtendingLeft,
    ExtendingRight,
}

#[allow(clippy::len_without_is_empty)]
impl Selection {
    /// Pair two carets; None when they sit on the same index
    pub fn new(start: CaretIndex, end: CaretIndex) -> Option<Self> {
        (start.index != end.index).then_some(Self { start, end })
    }

    /// Selection over a char range in left-to-right order
    pub fn from_range(range: Range<usize>) -> Option<Self> {
        Self::new(CaretIndex::new(range.start), CaretIndex::new(range.end))
    }

    /// Edge with the smaller index
    pub fn left(&self) -> CaretIndex {
        if self.start.index <= self.end.index {
            self.start
        } else {
            self.end
        }
    }

    /// Edge with the larger index
    pub fn right(&self) -> CaretIndex {
        if self.start.index > self.end.index {
            self.start
        } else {
            self.end
        }
    }

    /// Selected chars as `[left, right)`
    pub fn range(&self) -> Range<usize> {
        self.left().index..self.right().index
    }

    pub fn len(&self) -> usize {
        self.right().index - self.left().index
    }

    /// Check if a char index is within this selection (end exclusive)
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    pub fn extent(&self) -> SelectionExtent {
        if self.end.index > self.start.index {
            SelectionExtent::ExtendingRight
        } else {
            SelectionExtent::ExtendingLeft
        }
    }
}

impl SelectionExtent {
    pub fn of(selection: Option<&Selection>) -> Self {
        selection.map_or(SelectionExtent::None, Selection::extent)
    }
}

/// Apply a shift-move of the caret from `from` to `to`.
///
/// Without a selection `from` becomes the fixed edge. With one, the edge the
/// caret was sitting on moves (the `end` edge when it sat on neither) and the
/// other edge stays put. Moving past the fixed edge flips the extent; landing
/// on it clears the selection.
pub fn extend(current: Option<Selection>, from: CaretIndex, to: CaretIndex) -> Option<Selection> {
    let fixed = match current {
        None => from,
        Some(sel) if sel.end.index == from.index => sel.start,
        Some(sel) if sel.start.index == from.index => sel.end,
        Some(sel) => sel.start,
    };
    Selection::new(fixed, to)
}
