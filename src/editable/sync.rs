//! Render-sync bookkeeping: dirty flags, the viewport and the per-tick report.

/// Pending work for the next `TextArea::update`.
///
/// Resolved in field order: lines, text, caret, anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    /// Buffer or width limit changed; the line index is stale
    pub lines: bool,
    /// Host needs to redraw the text
    pub text: bool,
    /// Caret geometry must be recomputed and revealed
    pub caret: bool,
    /// Pixel anchor for vertical moves must follow the caret
    pub anchor: bool,
}

impl DirtyFlags {
    pub const ALL: DirtyFlags = DirtyFlags {
        lines: true,
        text: true,
        caret: true,
        anchor: true,
    };

    /// Everything a caret move invalidates
    pub const CARET: DirtyFlags = DirtyFlags {
        lines: false,
        text: false,
        caret: true,
        anchor: true,
    };

    pub fn any(&self) -> bool {
        self.lines || self.text || self.caret || self.anchor
    }

    pub fn merge(&mut self, other: DirtyFlags) {
        self.lines |= other.lines;
        self.text |= other.text;
        self.caret |= other.caret;
        self.anchor |= other.anchor;
    }
}

/// Which render-sync steps ran during one `update`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub lines_recalculated: bool,
    pub text_redrawn: bool,
    pub caret_repositioned: bool,
    pub anchor_refreshed: bool,
    pub scrolled: bool,
    pub history_committed: bool,
}

impl SyncReport {
    pub fn is_idle(&self) -> bool {
        *self == SyncReport::default()
    }
}

/// The visible region of the content, in content pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Scroll the least amount that keeps a caret of `height` at `(x, y)`
    /// at least `margin` pixels inside the visible region.
    ///
    /// An axis with no size yet is left alone. Returns whether anything moved.
    pub fn reveal(&mut self, x: f32, y: f32, height: f32, margin: f32) -> bool {
        let before = (self.scroll_x, self.scroll_y);

        if self.height > 0.0 {
            if y - margin < self.scroll_y {
                self.scroll_y = (y - margin).max(0.0);
            } else if y + height + margin > self.scroll_y + self.height {
                self.scroll_y = (y + height + margin - self.height).max(0.0);
            }
        }

        if self.width > 0.0 {
            if x - margin < self.scroll_x {
                self.scroll_x = (x - margin).max(0.0);
            } else if x + margin > self.scroll_x + self.width {
                self.scroll_x = (x + margin - self.width).max(0.0);
            }
        }

        before != (self.scroll_x, self.scroll_y)
    }

    /// Pull the scroll offsets back inside a content extent
    pub fn clamp_to(&mut self, content_width: f32, content_height: f32) {
        let max_x = (content_width - self.width).max(0.0);
        let max_y = (content_height - self.height).max(0.0);
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }

    /// Convert a viewport-relative point to content space
    pub fn to_content(&self, x: f32, y: f32) -> (f32, f32) {
        (x + self.scroll_x, y + self.scroll_y)
    }
}
