//! Shared test helpers for integration tests

#![allow(dead_code)]

use std::time::Duration;

use textarea::config::TextAreaConfig;
use textarea::editable::{MemoryClipboard, MouseMsg, MoveTarget, SyncReport, TextArea, TextEditMsg};
use textarea::layout::MonospaceMeasure;

/// Advance of every char in test layouts
pub const CHAR_W: f32 = 10.0;
/// Height of every display line in test layouts
pub const LINE_H: f32 = 20.0;
/// One frame of engine time
pub const FRAME: Duration = Duration::from_millis(16);

/// Create a text area with no viewport (no wrapping, no scrolling)
pub fn test_area(text: &str) -> TextArea {
    test_area_with_config(text, 0.0, 0.0, TextAreaConfig::default())
}

/// Create a text area wrapping at `width` pixels, 200 pixels tall
pub fn wrapped_area(text: &str, width: f32) -> TextArea {
    test_area_with_config(text, width, 200.0, TextAreaConfig::default())
}

/// Create a text area with a sized viewport
pub fn sized_area(text: &str, width: f32, height: f32) -> TextArea {
    test_area_with_config(text, width, height, TextAreaConfig::default())
}

pub fn test_area_with_config(
    text: &str,
    width: f32,
    height: f32,
    config: TextAreaConfig,
) -> TextArea {
    let font = Box::new(MonospaceMeasure::new(CHAR_W, LINE_H));
    let mut area = TextArea::with_text(text, font, config)
        .with_clipboard(Box::new(MemoryClipboard::new()))
        .with_viewport_size(width, height);
    area.update(Duration::ZERO);
    area
}

/// Text `"0\n1\n...\n{n-1}"`: `n` one-char lines
pub fn numbered_lines(n: usize) -> String {
    (0..n).map(|i| (i % 10).to_string()).collect::<Vec<_>>().join("\n")
}

/// Apply an intent and run one frame
pub fn press(area: &mut TextArea, msg: TextEditMsg) -> SyncReport {
    area.handle(msg);
    area.update(FRAME)
}

pub fn move_to(area: &mut TextArea, target: MoveTarget) -> SyncReport {
    press(area, TextEditMsg::Move(target))
}

pub fn select_to(area: &mut TextArea, target: MoveTarget) -> SyncReport {
    press(area, TextEditMsg::MoveWithSelection(target))
}

/// Type each char as its own intent, one frame apart
pub fn type_chars(area: &mut TextArea, text: &str) {
    for ch in text.chars() {
        press(area, TextEditMsg::InsertChar(ch));
    }
}

/// Press and release the pointer without advancing the clock
pub fn click(area: &mut TextArea, x: f32, y: f32) {
    area.handle_mouse(MouseMsg::Down { x, y, shift: false });
    area.handle_mouse(MouseMsg::Up);
}

/// Place the caret and resolve it
pub fn caret_at(area: &mut TextArea, index: usize) {
    area.set_caret(index);
    area.update(Duration::ZERO);
}

pub fn selection_range(area: &TextArea) -> Option<std::ops::Range<usize>> {
    area.selection().map(|s| s.range())
}

/// Content of every display line, without newlines
pub fn line_texts(area: &TextArea) -> Vec<String> {
    area.lines().iter().map(|l| l.content().to_string()).collect()
}
