//! Pixel ↔ index mapping over the line index, plus word and line ranges.

use std::ops::Range;

use super::lines::{Line, LineIndex};
use super::measure::{MeasureCache, TextMeasure};
use crate::editable::{CaretIndex, TextBuffer};
use crate::util::is_splitter;

/// A point in content space (scroll offset already applied)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pixel offset of `col` within `line`, measured as one cached substring
pub fn column_to_x(
    line: &Line,
    col: usize,
    font: &dyn TextMeasure,
    cache: &mut MeasureCache,
) -> f32 {
    let col = col.min(line.content_len());
    let prefix = match line.text.char_indices().nth(col) {
        Some((byte, _)) => &line.text[..byte],
        None => line.text.as_str(),
    };
    cache.measure(font, prefix)
}

/// Top-left corner of the caret in content space
pub fn index_to_pixel(
    lines: &LineIndex,
    caret: &CaretIndex,
    font: &dyn TextMeasure,
    cache: &mut MeasureCache,
) -> Point {
    let line_no = caret.owning_line(lines);
    let line = lines.line(line_no);
    let col = caret.index.saturating_sub(line.start);
    Point::new(
        column_to_x(line, col, font, cache),
        line_no as f32 * lines.line_height(),
    )
}

/// Caret position in `line` nearest to the horizontal offset `x`.
///
/// Past the right edge the caret lands after the last visible char; on a
/// soft-wrapped line that placement is flagged `at_end_of_line`.
pub fn pixel_to_index(lines: &LineIndex, line_no: usize, x: f32) -> CaretIndex {
    let line_no = line_no.min(lines.last());
    let line = lines.line(line_no);

    if x <= 0.0 {
        return CaretIndex::new(line.start);
    }
    if x >= line.pixel_width() {
        return line_end_caret(lines, line_no);
    }

    let mut acc = 0.0;
    for (col, width) in line.char_widths[..line.content_len()].iter().enumerate() {
        if acc + width / 2.0 >= x {
            return CaretIndex::new(line.start + col);
        }
        acc += width;
    }
    line_end_caret(lines, line_no)
}

/// Caret after the last visible char of `line_no`
pub fn line_end_caret(lines: &LineIndex, line_no: usize) -> CaretIndex {
    let line = lines.line(line_no);
    let soft_wrapped = !line.ends_in_newline && line_no < lines.last() && line.len > 0;
    if soft_wrapped {
        CaretIndex::at_line_end(line.content_end())
    } else {
        CaretIndex::new(line.content_end())
    }
}

/// Caret under a content-space point
pub fn point_to_caret(lines: &LineIndex, point: Point) -> CaretIndex {
    pixel_to_index(lines, lines.line_at_y(point.y), point.x)
}

/// The word containing `index`.
///
/// An index directly after a word belongs to that word. On a splitter with no
/// adjacent word the range covers that single char.
pub fn word_range_at(buffer: &TextBuffer, index: usize) -> Range<usize> {
    let len = buffer.len_chars();
    let is_word = |i: usize| buffer.char_at(i).is_some_and(|c| !is_splitter(c));

    let mut pivot = index.min(len);
    if !is_word(pivot) {
        if pivot > 0 && is_word(pivot - 1) {
            pivot -= 1;
        } else {
            return pivot..(pivot + 1).min(len);
        }
    }

    let mut start = pivot;
    while start > 0 && is_word(start - 1) {
        start -= 1;
    }
    let mut end = pivot;
    while end < len && is_word(end) {
        end += 1;
    }
    start..end
}

/// Visible chars of a line: the newline is excluded, a soft wrap is not
pub fn line_range(line: &Line) -> Range<usize> {
    line.start..line.content_end()
}

/// Selection edges for a drag that started on a word or line snap.
///
/// Returns `(fixed, moving)`. The result always covers `anchor`: dragging
/// left of it fixes its right edge, dragging right of it fixes its left edge.
pub fn snap_drag(anchor: &Range<usize>, index: usize) -> (usize, usize) {
    if index < anchor.start {
        (anchor.end, index)
    } else if index >= anchor.end {
        (anchor.start, index)
    } else {
        (anchor.start, anchor.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::MonospaceMeasure;

    const FONT: MonospaceMeasure = MonospaceMeasure::new(10.0, 20.0);

    fn index_for(text: &str, limit: f32) -> LineIndex {
        let mut index = LineIndex::new(20.0);
        let mut cache = MeasureCache::default();
        index.rebuild(text.chars(), &FONT, &mut cache, limit);
        index
    }

    #[test]
    fn test_index_to_pixel() {
        let lines = index_for("ab\ncd", f32::INFINITY);
        let mut cache = MeasureCache::default();

        let p = index_to_pixel(&lines, &CaretIndex::new(1), &FONT, &mut cache);
        assert_eq!(p, Point::new(10.0, 0.0));

        let p = index_to_pixel(&lines, &CaretIndex::new(5), &FONT, &mut cache);
        assert_eq!(p, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_index_to_pixel_end_of_wrapped_line() {
        let lines = index_for("The quick brown fox", 105.0);
        let mut cache = MeasureCache::default();

        let p = index_to_pixel(&lines, &CaretIndex::at_line_end(10), &FONT, &mut cache);
        assert_eq!(p, Point::new(100.0, 0.0));

        let p = index_to_pixel(&lines, &CaretIndex::new(10), &FONT, &mut cache);
        assert_eq!(p, Point::new(0.0, 20.0));
    }

    #[test]
    fn test_pixel_to_index_midpoints() {
        let lines = index_for("abcd", f32::INFINITY);

        assert_eq!(pixel_to_index(&lines, 0, -5.0).index, 0);
        assert_eq!(pixel_to_index(&lines, 0, 4.0).index, 0);
        assert_eq!(pixel_to_index(&lines, 0, 6.0).index, 1);
        assert_eq!(pixel_to_index(&lines, 0, 15.0).index, 1);
        assert_eq!(pixel_to_index(&lines, 0, 16.0).index, 2);
        assert_eq!(pixel_to_index(&lines, 0, 400.0).index, 4);
    }

    #[test]
    fn test_pixel_to_index_past_end() {
        let lines = index_for("ab\nThe quick brown fox", 105.0);

        let newline_end = pixel_to_index(&lines, 0, 999.0);
        assert_eq!(newline_end.index, 2);
        assert!(!newline_end.at_end_of_line);

        let wrapped_end = pixel_to_index(&lines, 1, 999.0);
        assert_eq!(wrapped_end.index, 13);
        assert!(wrapped_end.at_end_of_line);

        let last_end = pixel_to_index(&lines, 2, 999.0);
        assert_eq!(last_end.index, 22);
        assert!(!last_end.at_end_of_line);
    }

    #[test]
    fn test_point_to_caret() {
        let lines = index_for("ab\ncd", f32::INFINITY);
        assert_eq!(point_to_caret(&lines, Point::new(12.0, 25.0)).index, 4);
        assert_eq!(point_to_caret(&lines, Point::new(12.0, 500.0)).index, 4);
    }

    #[test]
    fn test_word_range_at() {
        let buffer = TextBuffer::from_text("foo bar baz");
        assert_eq!(word_range_at(&buffer, 5), 4..7);
        assert_eq!(word_range_at(&buffer, 4), 4..7);
        assert_eq!(word_range_at(&buffer, 7), 4..7);
        assert_eq!(word_range_at(&buffer, 0), 0..3);
        assert_eq!(word_range_at(&buffer, 11), 8..11);
    }

    #[test]
    fn test_word_range_on_splitter_run() {
        let buffer = TextBuffer::from_text("a  b");
        assert_eq!(word_range_at(&buffer, 2), 2..3);
    }

    #[test]
    fn test_line_range() {
        let lines = index_for("ab\nThe quick brown fox", 105.0);
        assert_eq!(line_range(lines.line(0)), 0..2);
        assert_eq!(line_range(lines.line(1)), 3..13);
        assert_eq!(line_range(lines.line(2)), 13..22);
    }

    #[test]
    fn test_snap_drag() {
        let anchor = 4..7;
        assert_eq!(snap_drag(&anchor, 1), (7, 1));
        assert_eq!(snap_drag(&anchor, 5), (4, 7));
        assert_eq!(snap_drag(&anchor, 7), (4, 7));
        assert_eq!(snap_drag(&anchor, 10), (4, 10));
    }
}
