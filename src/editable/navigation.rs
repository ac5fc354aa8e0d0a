//! Caret movement over the buffer and its display lines.
//!
//! Every function here is pure: it takes the current caret and returns the
//! target. Selection handling and the pixel anchor live in the engine.

use super::buffer::TextBuffer;
use super::cursor::CaretIndex;
use crate::layout::hit_test::{line_end_caret, pixel_to_index};
use crate::layout::LineIndex;
use crate::util::is_splitter;

/// One char left, clamped at 0
pub fn step_left(caret: CaretIndex) -> CaretIndex {
    CaretIndex::new(caret.index.saturating_sub(1))
}

/// One char right, clamped at the buffer end.
///
/// Stepping off the last char of a soft-wrapped line lands at the end of that
/// line rather than the start of the next.
pub fn step_right(lines: &LineIndex, caret: CaretIndex, len: usize) -> CaretIndex {
    if caret.index >= len {
        return CaretIndex::new(len);
    }
    let line_no = caret.owning_line(lines);
    let line = lines.line(line_no);
    let target = caret.index + 1;
    let soft_wrapped = !line.ends_in_newline && line_no < lines.last();
    if soft_wrapped && target == line.content_end() {
        CaretIndex::at_line_end(target)
    } else {
        CaretIndex::new(target)
    }
}

fn is_word_start(buffer: &TextBuffer, p: usize) -> bool {
    match (buffer.char_at(p.wrapping_sub(1)), buffer.char_at(p)) {
        (Some(prev), Some(cur)) => is_splitter(prev) && !is_splitter(cur),
        _ => false,
    }
}

/// Nearest word start after `index`, or the buffer end
pub fn word_right(buffer: &TextBuffer, index: usize) -> usize {
    let len = buffer.len_chars();
    ((index + 1)..len)
        .find(|&p| is_word_start(buffer, p))
        .unwrap_or(len)
}

/// Nearest word start before `index`, or 0
pub fn word_left(buffer: &TextBuffer, index: usize) -> usize {
    (1..index.min(buffer.len_chars()))
        .rev()
        .find(|&p| is_word_start(buffer, p))
        .unwrap_or(0)
}

/// Move `delta` display lines, keeping the horizontal pixel anchor.
///
/// Already on the first line, an upward move goes to 0; already on the last
/// line, a downward move goes to the buffer end. Otherwise the target line is
/// clamped into range.
pub fn vertical(
    lines: &LineIndex,
    caret: CaretIndex,
    preferred_x: f32,
    delta: isize,
    len: usize,
) -> CaretIndex {
    let line_no = caret.owning_line(lines);
    if delta < 0 && line_no == 0 {
        return CaretIndex::new(0);
    }
    if delta > 0 && line_no >= lines.last() {
        return CaretIndex::new(len);
    }
    let target = line_no
        .saturating_add_signed(delta)
        .min(lines.last());
    pixel_to_index(lines, target, preferred_x)
}

/// Lines moved by PageUp/PageDown for a viewport of `height` pixels
pub fn page_lines(height: f32, line_height: f32) -> usize {
    if line_height <= 0.0 {
        return 1;
    }
    ((height / line_height).floor() as usize).max(1)
}

/// Home with the indent latch.
///
/// Returns the target and the new latch state. The first press stops at the
/// first non-indent char and sets the latch; a latched press, or a press
/// already on that char, goes to the line start. Blank lines always go to the
/// line start.
pub fn home(lines: &LineIndex, caret: CaretIndex, latched: bool) -> (CaretIndex, bool) {
    let line = lines.line(caret.owning_line(lines));
    let start = CaretIndex::new(line.start);
    match line.first_non_indent() {
        None => (start, false),
        Some(col) => {
            let indent_end = line.start + col;
            if latched || caret.index == indent_end {
                (start, false)
            } else {
                (CaretIndex::new(indent_end), true)
            }
        }
    }
}

/// End of the caret's display line
pub fn end(lines: &LineIndex, caret: CaretIndex) -> CaretIndex {
    line_end_caret(lines, caret.owning_line(lines))
}
