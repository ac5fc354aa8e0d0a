//! Intents accepted by the text area and events it emits.

use ropey::Rope;

use super::selection::Selection;

/// Target for caret movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move one display line up
    Up,
    /// Move one display line down
    Down,
    /// Move to the previous word start
    WordLeft,
    /// Move to the next word start
    WordRight,
    /// Home: first non-indent char, then the line start on the next press
    LineStart,
    /// Move to end of the display line
    LineEnd,
    /// Move one page up
    PageUp,
    /// Move one page down
    PageDown,
    /// Move to start of the buffer
    DocumentStart,
    /// Move to end of the buffer
    DocumentEnd,
}

/// Keyboard-level editing intents.
#[derive(Debug, Clone, PartialEq)]
pub enum TextEditMsg {
    // === Movement ===
    /// Move caret without extending (collapses an active selection)
    Move(MoveTarget),
    /// Move caret and extend selection
    MoveWithSelection(MoveTarget),

    // === Insertion ===
    /// Type a single character
    InsertChar(char),
    /// Insert a string at the caret (commits a history entry)
    InsertText(String),
    /// Type a newline
    InsertNewline,

    // === Deletion ===
    /// Delete character before caret (Backspace)
    DeleteBackward,
    /// Delete character after caret (Delete)
    DeleteForward,
    /// Delete back to the previous word start
    DeleteWordBackward,
    /// Delete forward to the next word start
    DeleteWordForward,

    // === Selection ===
    SelectAll,
    /// Enter sticky selection mode: moves extend until cancelled
    StartSelection,
    /// Clear the selection and leave sticky selection mode
    CancelSelection,

    // === Clipboard ===
    Copy,
    Cut,
    /// Insert the clipboard contents at the caret
    Paste,

    // === Undo/Redo ===
    Undo,
    Redo,

    /// Switch between insert and overtype
    ToggleOverwrite,
}

impl TextEditMsg {
    /// Check if this message can modify the buffer
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            TextEditMsg::InsertChar(_)
                | TextEditMsg::InsertText(_)
                | TextEditMsg::InsertNewline
                | TextEditMsg::DeleteBackward
                | TextEditMsg::DeleteForward
                | TextEditMsg::DeleteWordBackward
                | TextEditMsg::DeleteWordForward
                | TextEditMsg::Cut
                | TextEditMsg::Paste
                | TextEditMsg::Undo
                | TextEditMsg::Redo
        )
    }

    /// Typed input: edits grouped by the history timer instead of committing
    pub fn is_typing(&self) -> bool {
        matches!(
            self,
            TextEditMsg::InsertChar(_)
                | TextEditMsg::InsertNewline
                | TextEditMsg::DeleteBackward
                | TextEditMsg::DeleteForward
                | TextEditMsg::DeleteWordBackward
                | TextEditMsg::DeleteWordForward
        )
    }

    /// Check if this message is a movement operation
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            TextEditMsg::Move(_) | TextEditMsg::MoveWithSelection(_)
        )
    }

    /// Check if this message is a vertical movement (keeps the pixel anchor)
    pub fn is_vertical(&self) -> bool {
        matches!(
            self,
            TextEditMsg::Move(
                MoveTarget::Up | MoveTarget::Down | MoveTarget::PageUp | MoveTarget::PageDown
            ) | TextEditMsg::MoveWithSelection(
                MoveTarget::Up | MoveTarget::Down | MoveTarget::PageUp | MoveTarget::PageDown
            )
        )
    }
}

/// Pointer input in content-relative coordinates (scroll not applied)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseMsg {
    Down { x: f32, y: f32, shift: bool },
    Move { x: f32, y: f32 },
    Up,
}

/// Notifications for the host, drained with `TextArea::drain_events`
#[derive(Debug, Clone, PartialEq)]
pub enum TextAreaEvent {
    TextChanged { old: Rope, new: Rope },
    SelectionChanged { selection: Option<Selection> },
}
