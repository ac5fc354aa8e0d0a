//! Line index: partitions the buffer into display lines under a pixel-width limit.

use serde::Serialize;

use super::measure::{MeasureCache, TextMeasure};
use crate::util::is_wrap_point;

/// A contiguous slice of the buffer chosen for display.
///
/// `text` and `len` include the trailing `'\n'` of newline-terminated lines,
/// so concatenating every line's `text` reproduces the buffer exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub index: usize,
    /// Char index of the first char of this line
    pub start: usize,
    /// Number of chars, including a trailing newline
    pub len: usize,
    pub ends_in_newline: bool,
    pub text: String,
    /// Pixel width of each char in `text` (the newline measures 0)
    pub char_widths: Vec<f32>,
}

impl Line {
    fn empty(index: usize, start: usize) -> Self {
        Self {
            index,
            start,
            len: 0,
            ends_in_newline: false,
            text: String::new(),
            char_widths: Vec::new(),
        }
    }

    /// Index of the last char of the line (the newline, for terminated lines)
    pub fn end_index(&self) -> usize {
        self.start + self.len.saturating_sub(1)
    }

    /// One past the last char of the line
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Number of visible chars (excludes the newline)
    pub fn content_len(&self) -> usize {
        self.len - usize::from(self.ends_in_newline)
    }

    /// One past the last visible char
    pub fn content_end(&self) -> usize {
        self.start + self.content_len()
    }

    /// Text without the trailing newline
    pub fn content(&self) -> &str {
        self.text.strip_suffix('\n').unwrap_or(&self.text)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end_index()
    }

    pub fn pixel_width(&self) -> f32 {
        self.char_widths[..self.content_len()].iter().sum()
    }

    /// Pixel offset of the caret placed before column `col`
    pub fn x_at(&self, col: usize) -> f32 {
        let col = col.min(self.content_len());
        self.char_widths[..col].iter().sum()
    }

    pub fn char_at(&self, col: usize) -> Option<char> {
        self.text.chars().nth(col)
    }

    /// Column of the first char that is not a space or tab, None for blank lines
    pub fn first_non_indent(&self) -> Option<usize> {
        self.content()
            .chars()
            .position(|c| !crate::util::is_indent(c))
    }
}

/// Ordered display lines for the whole buffer, plus the content extent.
///
/// `generation` increases on every rebuild; carets cache their owning line
/// tagged with the generation they resolved against.
#[derive(Debug, Clone)]
pub struct LineIndex {
    lines: Vec<Line>,
    generation: u64,
    line_height: f32,
    content_width: f32,
}

#[allow(clippy::len_without_is_empty)]
impl LineIndex {
    /// Index for an empty buffer: a single empty line
    pub fn new(line_height: f32) -> Self {
        Self {
            lines: vec![Line::empty(0, 0)],
            generation: 0,
            line_height,
            content_width: 0.0,
        }
    }

    /// Re-wrap the buffer. Never fails and always leaves at least one line.
    pub fn rebuild<I>(
        &mut self,
        chars: I,
        font: &dyn TextMeasure,
        cache: &mut MeasureCache,
        width_limit: f32,
    ) where
        I: IntoIterator<Item = char>,
    {
        self.lines = wrap(chars, font, cache, width_limit);
        self.generation += 1;
        self.line_height = font.line_height();
        self.content_width = self
            .lines
            .iter()
            .map(Line::pixel_width)
            .fold(0.0, f32::max);

        tracing::trace!(
            target: "layout",
            generation = self.generation,
            lines = self.lines.len(),
            width_limit,
            "lines rebuilt"
        );
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn get(&self, line: usize) -> Option<&Line> {
        self.lines.get(line)
    }

    /// The line at `line`, clamped to the last line
    pub fn line(&self, line: usize) -> &Line {
        &self.lines[line.min(self.last())]
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Number of the last line
    pub fn last(&self) -> usize {
        self.lines.len() - 1
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Widest line in pixels
    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    pub fn content_height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    /// The line owning a caret at `index`.
    ///
    /// With `at_end_of_line` the caret belongs to the line containing
    /// `index - 1`. Indices past the last line resolve to the last line.
    pub fn line_of(&self, index: usize, at_end_of_line: bool) -> usize {
        let probe = if at_end_of_line {
            index.saturating_sub(1)
        } else {
            index
        };
        let line = self
            .lines
            .partition_point(|l| l.start <= probe)
            .saturating_sub(1);
        if self.lines[line].contains(probe) {
            line
        } else {
            self.last()
        }
    }

    /// The line under a content-space y coordinate, clamped
    pub fn line_at_y(&self, y: f32) -> usize {
        if y <= 0.0 || self.line_height <= 0.0 {
            return 0;
        }
        ((y / self.line_height) as usize).min(self.last())
    }
}

/// Partition `chars` into display lines no wider than `width_limit`.
///
/// Lines break after `'\n'`, at the last space or hyphen that keeps the line
/// within the limit, or immediately before the char that overflows when no
/// such point exists. The final line is always emitted, possibly empty.
pub fn wrap<I>(
    chars: I,
    font: &dyn TextMeasure,
    cache: &mut MeasureCache,
    width_limit: f32,
) -> Vec<Line>
where
    I: IntoIterator<Item = char>,
{
    let mut out = LineSink::default();
    let mut current = String::new();
    let mut current_chars = 0usize;
    // Char count of `current` directly after its last wrap point
    let mut split_after: Option<usize> = None;
    let wrapping = width_limit.is_finite();

    for ch in chars {
        if ch == '\n' {
            current.push('\n');
            out.push(std::mem::take(&mut current), true, font, cache);
            current_chars = 0;
            split_after = None;
            continue;
        }

        while wrapping && current_chars > 0 {
            current.push(ch);
            let width = cache.measure(font, &current);
            current.pop();
            if width <= width_limit {
                break;
            }

            let at = match split_after {
                Some(at) if at > 0 && at < current_chars => at,
                _ => current_chars,
            };
            let tail = split_off_chars(&mut current, at);
            out.push(std::mem::replace(&mut current, tail), false, font, cache);
            current_chars -= at;
            split_after = current
                .chars()
                .enumerate()
                .filter(|(_, c)| is_wrap_point(*c))
                .map(|(i, _)| i + 1)
                .last();
        }

        current.push(ch);
        current_chars += 1;
        if is_wrap_point(ch) {
            split_after = Some(current_chars);
        }
    }

    out.push(current, false, font, cache);
    out.lines
}

/// Split `s` after `at` chars, returning the remainder
fn split_off_chars(s: &mut String, at: usize) -> String {
    let byte = s.char_indices().nth(at).map(|(i, _)| i).unwrap_or(s.len());
    s.split_off(byte)
}

#[derive(Default)]
struct LineSink {
    lines: Vec<Line>,
    next_start: usize,
}

impl LineSink {
    fn push(
        &mut self,
        text: String,
        ends_in_newline: bool,
        font: &dyn TextMeasure,
        cache: &mut MeasureCache,
    ) {
        let mut buf = [0u8; 4];
        let char_widths: Vec<f32> = text
            .chars()
            .map(|c| {
                if c == '\n' {
                    0.0
                } else {
                    cache.measure(font, c.encode_utf8(&mut buf))
                }
            })
            .collect();
        let len = char_widths.len();

        self.lines.push(Line {
            index: self.lines.len(),
            start: self.next_start,
            len,
            ends_in_newline,
            text,
            char_widths,
        });
        self.next_start += len;
    }
}
