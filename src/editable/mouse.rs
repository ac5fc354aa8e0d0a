//! Click counting and drag state for pointer selection.

use std::ops::Range;
use std::time::Duration;

pub const DEFAULT_MULTI_CLICK: Duration = Duration::from_millis(300);

/// Click tracking state for double/triple click detection.
///
/// Times come from the engine clock, not the wall clock.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    last_click_time: Option<Duration>,
    last_click_index: Option<usize>,
    click_count: u8,
    window: Duration,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MULTI_CLICK)
    }
}

impl ClickTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            last_click_time: None,
            last_click_index: None,
            click_count: 0,
            window,
        }
    }

    /// Register a press at buffer `index` and return the click count (1, 2 or 3).
    ///
    /// Presses within the window on the same index count up; a fourth press
    /// starts over at 1.
    pub fn track_click(&mut self, now: Duration, index: usize) -> u8 {
        let is_rapid = self
            .last_click_time
            .is_some_and(|last| now.saturating_sub(last) < self.window);
        let is_same_position = self.last_click_index == Some(index);

        self.click_count = if is_rapid && is_same_position && self.click_count < 3 {
            self.click_count + 1
        } else {
            1
        };
        self.last_click_time = Some(now);
        self.last_click_index = Some(index);
        self.click_count
    }

    pub fn reset(&mut self) {
        self.click_count = 0;
        self.last_click_index = None;
    }
}

/// What a drag extends from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragAnchor {
    /// Single click: the press index
    Caret(usize),
    /// Double or triple click: the snapped word or line
    Snapped(Range<usize>),
}

/// Pointer drag in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub anchor: DragAnchor,
}
