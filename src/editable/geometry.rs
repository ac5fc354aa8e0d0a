//! Caret and selection geometry handed to the host for painting.

use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::layout::LineIndex;

/// Caret rectangle in content space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CaretGeometry {
    pub x: f32,
    pub y: f32,
    pub height: f32,
    /// Blink phase; always true right after input
    pub visible: bool,
}

/// One highlighted span of a selection, in content space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionRect {
    pub line: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Selected columns of one display line, for hosts that restyle glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlaySpan {
    pub line: usize,
    pub start_col: usize,
    pub end_col: usize,
}

/// How the host wants selections described
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRenderMode {
    /// Filled rectangles behind the text
    #[default]
    Rects,
    /// Per-line column spans drawn over the text
    InlineOverlay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectionGeometry {
    Rects(Vec<SelectionRect>),
    InlineOverlay { lines: Vec<OverlaySpan> },
}

impl SelectionGeometry {
    pub fn is_empty(&self) -> bool {
        match self {
            SelectionGeometry::Rects(rects) => rects.is_empty(),
            SelectionGeometry::InlineOverlay { lines } => lines.is_empty(),
        }
    }
}

/// Blink phase after `since_activity` of idle time.
///
/// Visible for the first interval, hidden for the next, and so on. A zero
/// interval disables blinking.
pub fn caret_visible(since_activity: Duration, interval: Duration) -> bool {
    if interval.is_zero() {
        return true;
    }
    (since_activity.as_nanos() / interval.as_nanos()) % 2 == 0
}

/// Column spans covered by `range` on each display line it touches.
///
/// A span includes the newline column when the range runs past the end of a
/// newline-terminated line.
pub fn overlay_spans(lines: &LineIndex, range: Range<usize>) -> Vec<OverlaySpan> {
    if range.is_empty() {
        return Vec::new();
    }
    let first = lines.line_of(range.start, false);
    lines.lines()[first..]
        .iter()
        .take_while(|line| line.start < range.end)
        .filter_map(|line| {
            let start = range.start.max(line.start);
            let end = range.end.min(line.end());
            (start < end).then(|| OverlaySpan {
                line: line.index,
                start_col: start - line.start,
                end_col: end - line.start,
            })
        })
        .collect()
}

/// Rectangles for `range`. A selected newline draws `newline_width` wide.
pub fn selection_rects(
    lines: &LineIndex,
    range: Range<usize>,
    newline_width: f32,
) -> Vec<SelectionRect> {
    overlay_spans(lines, range)
        .into_iter()
        .map(|span| {
            let line = lines.line(span.line);
            let x = line.x_at(span.start_col);
            let mut width = line.x_at(span.end_col) - x;
            if line.ends_in_newline && span.end_col > line.content_len() {
                width += newline_width;
            }
            SelectionRect {
                line: span.line,
                x,
                y: span.line as f32 * lines.line_height(),
                width,
                height: lines.line_height(),
            }
        })
        .collect()
}
