//! TextArea - the editing engine: buffer, line index, caret, selection and history.

use std::ops::Range;
use std::time::Duration;

use ropey::Rope;

use super::buffer::TextBuffer;
use super::clipboard::{Clipboard, MemoryClipboard};
use super::constraints::EditConstraints;
use super::cursor::CaretIndex;
use super::geometry::{
    caret_visible, overlay_spans, selection_rects, CaretGeometry, SelectionGeometry,
    SelectionRenderMode,
};
use super::history::{History, Snapshot};
use super::messages::{MouseMsg, MoveTarget, TextAreaEvent, TextEditMsg};
use super::mouse::{ClickTracker, DragAnchor, DragState};
use super::navigation;
use super::selection::{self, Selection, SelectionExtent};
use super::sync::{DirtyFlags, SyncReport, Viewport};
use crate::config::TextAreaConfig;
use crate::layout::hit_test::{
    index_to_pixel, line_end_caret, line_range, point_to_caret, snap_drag, word_range_at,
};
use crate::layout::{Line, LineIndex, MeasureCache, Point, TextMeasure};
use crate::util::strip_carriage_returns;

/// A multi-line text editing engine.
///
/// Mutations and caret moves only mark state dirty; `update` resolves the
/// dirty flags once per tick, in order: re-wrap lines, request a redraw,
/// recompute the caret and scroll it into view, refresh the pixel anchor used
/// by vertical moves.
#[derive(Debug)]
pub struct TextArea {
    buffer: TextBuffer,
    lines: LineIndex,
    /// Width limit the line index was last built with
    layout_width: f32,
    caret: CaretIndex,
    /// Caret position in content space, valid once `dirty.caret` is clear
    caret_pos: Point,
    selection: Option<Selection>,
    /// Set by StartSelection: moves extend until cancelled or an edit
    sticky_selection: bool,
    history: History,
    dirty: DirtyFlags,
    viewport: Viewport,
    content_width: f32,
    content_height: f32,
    constraints: EditConstraints,
    overwrite: bool,
    /// Horizontal pixel anchor for vertical moves
    preferred_x: f32,
    home_latch: bool,
    font: Box<dyn TextMeasure>,
    cache: MeasureCache,
    newline_width: f32,
    clipboard: Box<dyn Clipboard>,
    config: TextAreaConfig,
    clock: Duration,
    last_activity: Duration,
    clicks: ClickTracker,
    drag: Option<DragState>,
    events: Vec<TextAreaEvent>,
    redraw_requested: bool,
}

impl TextArea {
    pub fn new(font: Box<dyn TextMeasure>, config: TextAreaConfig) -> Self {
        Self::with_text("", font, config)
    }

    pub fn with_text(text: &str, font: Box<dyn TextMeasure>, config: TextAreaConfig) -> Self {
        let buffer = TextBuffer::from_text(text);
        let mut cache = MeasureCache::new(config.measure_cache_capacity);
        let newline_width = cache.measure(font.as_ref(), " ");
        let history = History::with_limits(
            Snapshot::of_text(buffer.rope().clone()),
            config.history_interval(),
            config.max_history,
        );
        let constraints = EditConstraints {
            read_only: config.read_only,
            ..EditConstraints::default()
        };

        Self {
            buffer,
            lines: LineIndex::new(font.line_height()),
            layout_width: f32::NAN,
            caret: CaretIndex::default(),
            caret_pos: Point::default(),
            selection: None,
            sticky_selection: false,
            history,
            dirty: DirtyFlags::ALL,
            viewport: Viewport::default(),
            content_width: 0.0,
            content_height: 0.0,
            constraints,
            overwrite: false,
            preferred_x: 0.0,
            home_latch: false,
            font,
            cache,
            newline_width,
            clipboard: Box::new(MemoryClipboard::new()),
            clicks: ClickTracker::new(config.multi_click()),
            config,
            clock: Duration::ZERO,
            last_activity: Duration::ZERO,
            drag: None,
            events: Vec::new(),
            redraw_requested: false,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_constraints(mut self, constraints: EditConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_viewport_size(mut self, width: f32, height: f32) -> Self {
        self.set_viewport_size(width, height);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the text content as a String
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn rope(&self) -> &Rope {
        self.buffer.rope()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn caret(&self) -> CaretIndex {
        self.caret
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection_extent(&self) -> SelectionExtent {
        SelectionExtent::of(self.selection.as_ref())
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        self.selection
            .map(|sel| self.buffer.slice(sel.range()))
            .unwrap_or_default()
    }

    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn is_selecting(&self) -> bool {
        self.sticky_selection
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.history.is_dirty(self.buffer.rope())
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn constraints(&self) -> &EditConstraints {
        &self.constraints
    }

    pub fn constraints_mut(&mut self) -> &mut EditConstraints {
        &mut self.constraints
    }

    pub fn config(&self) -> &TextAreaConfig {
        &self.config
    }

    /// Display lines. Stale until the next `update` after an edit.
    pub fn lines(&self) -> &[Line] {
        self.lines.lines()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// `(width, height)` of the laid-out content in pixels
    pub fn content_size(&self) -> (f32, f32) {
        (self.content_width, self.content_height)
    }

    pub fn preferred_x(&self) -> f32 {
        self.preferred_x
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Scroll offsets may be written freely; size changes take effect on the
    /// next `update`.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.viewport.clamp_to(self.content_width, self.content_height);
        self.dirty.caret = true;
    }

    /// Swap the font; everything is re-measured on the next `update`
    pub fn set_font(&mut self, font: Box<dyn TextMeasure>) {
        self.font = font;
        self.cache.clear();
        self.newline_width = self.cache.measure(self.font.as_ref(), " ");
        self.dirty.merge(DirtyFlags::ALL);
    }

    pub fn measure_cache(&self) -> &MeasureCache {
        &self.cache
    }

    /// Time since the engine was created, advanced by `update`
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Take the pending redraw request set by the render-sync pass
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, TextAreaEvent> {
        self.events.drain(..)
    }

    fn width_limit(&self) -> f32 {
        if self.config.wrap && self.viewport.width > 0.0 {
            self.viewport.width
        } else {
            f32::INFINITY
        }
    }

    // =========================================================================
    // Render sync
    // =========================================================================

    /// Advance the clock by `dt` and resolve pending work
    pub fn update(&mut self, dt: Duration) -> SyncReport {
        self.clock += dt;
        let mut report = SyncReport::default();

        if self.width_limit() != self.layout_width {
            self.dirty.merge(DirtyFlags::ALL);
        }

        if self.dirty.lines {
            self.recalc_lines();
            report.lines_recalculated = true;
        }

        if self.dirty.text {
            self.dirty.text = false;
            self.redraw_requested = true;
            report.text_redrawn = true;
        }

        if self.dirty.caret {
            report.scrolled = self.reposition_caret();
            report.caret_repositioned = true;
        }

        if self.dirty.anchor {
            self.dirty.anchor = false;
            self.preferred_x = self.caret_pos.x;
            report.anchor_refreshed = true;
        }

        if self.history.tick(dt) {
            report.history_committed = self.commit_snapshot();
        }

        if !report.is_idle() {
            tracing::trace!(target: "sync", ?report, "update");
        }
        report
    }

    fn recalc_lines(&mut self) {
        let width_limit = self.width_limit();
        self.lines.rebuild(
            self.buffer.chars(),
            self.font.as_ref(),
            &mut self.cache,
            width_limit,
        );
        self.layout_width = width_limit;
        self.content_width = self.lines.content_width();
        self.content_height = self.lines.content_height();
        self.dirty.lines = false;
        self.viewport.clamp_to(self.content_width, self.content_height);

        self.validate_end_of_line();
    }

    /// Drop the end-of-line placement unless the caret really sits at the
    /// end of a soft-wrapped line. A caret shifted by a removal keeps its
    /// placement when it still ends a wrapped line after re-wrapping.
    fn validate_end_of_line(&mut self) {
        if !self.caret.at_end_of_line {
            return;
        }
        let line_no = self.lines.line_of(self.caret.index, true);
        let line = self.lines.line(line_no);
        let valid = self.caret.index > 0
            && !line.ends_in_newline
            && line_no < self.lines.last()
            && line.content_end() == self.caret.index;
        if !valid {
            self.caret = CaretIndex::new(self.caret.index);
        }
    }

    /// Recompute the caret position and reveal it. Returns whether the
    /// viewport scrolled.
    fn reposition_caret(&mut self) -> bool {
        self.dirty.caret = false;
        self.caret.locate(&self.lines);
        self.caret_pos = index_to_pixel(
            &self.lines,
            &self.caret,
            self.font.as_ref(),
            &mut self.cache,
        );
        self.viewport.reveal(
            self.caret_pos.x,
            self.caret_pos.y,
            self.lines.line_height(),
            self.config.scroll_margin,
        )
    }

    /// Bring the line index up to date outside of `update`; used by
    /// navigation that needs geometry
    fn ensure_layout(&mut self) {
        if self.dirty.lines || self.width_limit() != self.layout_width {
            self.recalc_lines();
            self.dirty.text = true;
            self.dirty.caret = true;
        }
    }

    fn refresh_anchor(&mut self) {
        self.ensure_layout();
        let pos = index_to_pixel(&self.lines, &self.caret, self.font.as_ref(), &mut self.cache);
        self.preferred_x = pos.x;
        self.dirty.anchor = false;
    }

    pub fn caret_geometry(&self) -> CaretGeometry {
        let idle = self.clock.saturating_sub(self.last_activity);
        CaretGeometry {
            x: self.caret_pos.x,
            y: self.caret_pos.y,
            height: self.lines.line_height(),
            visible: caret_visible(idle, self.config.blink_interval()),
        }
    }

    pub fn selection_geometry(&self) -> SelectionGeometry {
        let range = self.selection.map_or(0..0, |sel| sel.range());
        match self.config.selection_render {
            SelectionRenderMode::Rects => {
                SelectionGeometry::Rects(selection_rects(&self.lines, range, self.newline_width))
            }
            SelectionRenderMode::InlineOverlay => SelectionGeometry::InlineOverlay {
                lines: overlay_spans(&self.lines, range),
            },
        }
    }

    fn touch(&mut self) {
        self.last_activity = self.clock;
    }

    // =========================================================================
    // Intent dispatch
    // =========================================================================

    /// Apply a keyboard intent.
    ///
    /// In debug builds this logs the intent in a span with the caret diff and
    /// checks the engine invariants afterwards.
    #[inline]
    pub fn handle(&mut self, msg: TextEditMsg) {
        #[cfg(debug_assertions)]
        {
            self.handle_traced(msg)
        }
        #[cfg(not(debug_assertions))]
        {
            self.apply(msg)
        }
    }

    #[cfg(debug_assertions)]
    fn handle_traced(&mut self, msg: TextEditMsg) {
        use crate::tracing::CaretSnapshot;

        let msg_name = format!("{:?}", msg);
        let _span = tracing::span!(tracing::Level::DEBUG, "handle", msg = %msg_name).entered();
        tracing::debug!(target: "message", msg = %msg_name, "processing");

        let before = CaretSnapshot::from_area(self);
        self.apply(msg);
        let after = CaretSnapshot::from_area(self);
        if let Some(diff) = before.diff(&after) {
            tracing::debug!(target: "caret", %diff, "state changed");
        }

        self.assert_invariants(&msg_name);
    }

    fn apply(&mut self, msg: TextEditMsg) {
        if !self.constraints.interactable {
            tracing::trace!(target: "message", "ignored: not interactable");
            return;
        }
        if !matches!(
            msg,
            TextEditMsg::Move(MoveTarget::LineStart)
                | TextEditMsg::MoveWithSelection(MoveTarget::LineStart)
        ) {
            self.home_latch = false;
        }

        match msg {
            TextEditMsg::Move(target) => self.move_caret(target, false),
            TextEditMsg::MoveWithSelection(target) => self.move_caret(target, true),

            TextEditMsg::InsertChar(ch) => {
                let mut buf = [0u8; 4];
                self.type_text(ch.encode_utf8(&mut buf));
            }
            TextEditMsg::InsertText(text) => {
                self.insert_text(self.caret.index, &text);
            }
            TextEditMsg::InsertNewline => {
                self.type_text("\n");
            }

            TextEditMsg::DeleteBackward => {
                if !self.remove_selection() && self.caret.index > 0 {
                    self.remove_chars(self.caret.index - 1, 1);
                }
            }
            TextEditMsg::DeleteForward => {
                if !self.remove_selection() {
                    self.remove_chars(self.caret.index, 1);
                }
            }
            TextEditMsg::DeleteWordBackward => {
                if !self.remove_selection() {
                    let at = self.caret.index;
                    let target = navigation::word_left(&self.buffer, at);
                    self.remove_chars(target, at - target);
                }
            }
            TextEditMsg::DeleteWordForward => {
                if !self.remove_selection() {
                    let at = self.caret.index;
                    let target = navigation::word_right(&self.buffer, at);
                    self.remove_chars(at, target - at);
                }
            }

            TextEditMsg::SelectAll => self.select_all(),
            TextEditMsg::StartSelection => {
                self.sticky_selection = true;
                tracing::debug!(target: "selection", "sticky selection on");
            }
            TextEditMsg::CancelSelection => {
                self.sticky_selection = false;
                self.set_selection(None);
                self.dirty.caret = true;
            }

            TextEditMsg::Copy => self.copy(),
            TextEditMsg::Cut => {
                self.cut();
            }
            TextEditMsg::Paste => {
                self.paste();
            }

            TextEditMsg::Undo => {
                self.undo();
            }
            TextEditMsg::Redo => {
                self.redo();
            }

            TextEditMsg::ToggleOverwrite => {
                self.overwrite = !self.overwrite;
                self.touch();
            }
        }
    }

    /// Replace the selection, emitting SelectionChanged when it differs
    fn set_selection(&mut self, selection: Option<Selection>) {
        if self.selection != selection {
            self.selection = selection;
            self.events.push(TextAreaEvent::SelectionChanged { selection });
            self.dirty.text = true;
        }
    }

    // =========================================================================
    // Caret movement
    // =========================================================================

    fn move_caret(&mut self, target: MoveTarget, extend: bool) {
        let extend = extend || self.sticky_selection;
        let vertical = matches!(
            target,
            MoveTarget::Up | MoveTarget::Down | MoveTarget::PageUp | MoveTarget::PageDown
        );

        self.ensure_layout();
        if vertical && self.dirty.anchor {
            self.refresh_anchor();
        }

        if !extend {
            if let Some(sel) = self.selection {
                let edge = match target {
                    MoveTarget::Left => Some(sel.left()),
                    MoveTarget::Right => Some(sel.right()),
                    _ => None,
                };
                if let Some(edge) = edge {
                    self.caret = edge;
                    self.set_selection(None);
                    self.mark_caret_moved(false);
                    return;
                }
            }
        }

        let from = self.caret;
        let len = self.buffer.len_chars();
        let page = navigation::page_lines(self.viewport.height, self.lines.line_height()) as isize;

        let to = match target {
            MoveTarget::Left => navigation::step_left(from),
            MoveTarget::Right => navigation::step_right(&self.lines, from, len),
            MoveTarget::WordLeft => {
                CaretIndex::new(navigation::word_left(&self.buffer, from.index))
            }
            MoveTarget::WordRight => {
                CaretIndex::new(navigation::word_right(&self.buffer, from.index))
            }
            MoveTarget::Up => navigation::vertical(&self.lines, from, self.preferred_x, -1, len),
            MoveTarget::Down => navigation::vertical(&self.lines, from, self.preferred_x, 1, len),
            MoveTarget::PageUp => {
                navigation::vertical(&self.lines, from, self.preferred_x, -page, len)
            }
            MoveTarget::PageDown => {
                navigation::vertical(&self.lines, from, self.preferred_x, page, len)
            }
            MoveTarget::LineStart => {
                let (to, latch) = navigation::home(&self.lines, from, self.home_latch);
                self.home_latch = latch;
                to
            }
            MoveTarget::LineEnd => navigation::end(&self.lines, from),
            MoveTarget::DocumentStart => CaretIndex::new(0),
            MoveTarget::DocumentEnd => CaretIndex::new(len),
        };

        if extend {
            let sel = selection::extend(self.selection, from, to);
            tracing::trace!(target: "selection", ?sel, "extend");
            self.set_selection(sel);
        } else {
            self.set_selection(None);
        }
        self.caret = to;
        self.mark_caret_moved(vertical);
    }

    fn mark_caret_moved(&mut self, vertical: bool) {
        self.dirty.caret = true;
        if !vertical {
            self.dirty.anchor = true;
        }
        self.touch();
    }

    /// Place the caret at `index` (clamped) and clear the selection
    pub fn set_caret(&mut self, index: usize) {
        self.caret = CaretIndex::new(index.min(self.buffer.len_chars()));
        self.set_selection(None);
        self.home_latch = false;
        self.mark_caret_moved(false);
    }

    /// Select `range` (clamped); the caret goes to its end
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.buffer.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        self.set_selection(Selection::new(CaretIndex::new(start), CaretIndex::new(end)));
        self.caret = CaretIndex::new(end);
        self.mark_caret_moved(false);
    }

    pub fn select_all(&mut self) {
        let len = self.buffer.len_chars();
        self.set_selection(Selection::from_range(0..len));
        self.caret = CaretIndex::new(len);
        self.mark_caret_moved(false);
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert `text` at `index` and commit a history entry.
    ///
    /// Rejected (false) when the area is not editable, `index` is past the
    /// end, or the constraints refuse the text. An active selection is
    /// deleted first.
    pub fn insert_text(&mut self, index: usize, text: &str) -> bool {
        if !self.splice(index, 0, text) {
            return false;
        }
        self.commit_snapshot();
        true
    }

    /// Remove `count` chars starting at `index` and commit a history entry
    pub fn remove_text(&mut self, index: usize, count: usize) -> bool {
        if !self.remove_chars(index, count) {
            return false;
        }
        self.commit_snapshot();
        true
    }

    /// Delete the selected range and commit a history entry
    pub fn delete_selection(&mut self) -> bool {
        if !self.remove_selection() {
            return false;
        }
        self.commit_snapshot();
        true
    }

    /// Replace the whole text. History restarts from the new content.
    pub fn set_text(&mut self, text: &str) {
        let old = self.buffer.rope().clone();
        self.buffer.set_content(text);
        self.caret = CaretIndex::new(0);
        self.set_selection(None);
        self.sticky_selection = false;
        self.drag = None;
        self.viewport.scroll_x = 0.0;
        self.viewport.scroll_y = 0.0;
        self.dirty.merge(DirtyFlags::ALL);
        self.history.reset(self.snapshot());
        self.touch();
        if old != *self.buffer.rope() {
            self.events.push(TextAreaEvent::TextChanged {
                old,
                new: self.buffer.rope().clone(),
            });
        }
    }

    /// Typed input: replaces the selection, honours overtype, never commits
    fn type_text(&mut self, text: &str) -> bool {
        let at = self.caret.index;
        let overtype = if self.overwrite && self.selection.is_none() {
            let stop = self.buffer.next_newline(at);
            text.chars().count().min(stop - at)
        } else {
            0
        };
        self.splice(at, overtype, text)
    }

    /// Delete the active selection without committing. False when there is none.
    fn remove_selection(&mut self) -> bool {
        match self.selection {
            Some(sel) => {
                let range = sel.range();
                self.remove_chars(range.start, range.len())
            }
            None => false,
        }
    }

    /// Replace `replace` chars at `index` with `text`, after deleting any
    /// active selection
    fn splice(&mut self, index: usize, replace: usize, text: &str) -> bool {
        if !self.constraints.is_editable() {
            tracing::trace!(target: "message", "insert rejected: not editable");
            return false;
        }
        let len = self.buffer.len_chars();
        if index > len {
            return false;
        }
        let text = strip_carriage_returns(text);
        if text.is_empty() {
            return false;
        }

        let selected = self.selection.map_or(0..0, |sel| sel.range());
        let replace = replace.min(len - index);
        if !self
            .constraints
            .allows_insert(&text, len - selected.len() - replace)
        {
            tracing::trace!(target: "message", "insert rejected by constraints");
            return false;
        }

        let old = self.buffer.rope().clone();
        let selection_before = self.selection;

        let mut index = index;
        if !selected.is_empty() {
            index = if index >= selected.end {
                index - selected.len()
            } else if index > selected.start {
                selected.start
            } else {
                index
            };
            self.remove_range(selected);
        }
        if replace > 0 {
            self.remove_range(index..index + replace);
        }

        let inserted = self.buffer.insert(index, &text);
        if self.caret.index >= index {
            self.caret = CaretIndex::new(self.caret.index + inserted);
        }
        self.selection = self.selection.and_then(|sel| {
            Selection::new(
                shift_insert(sel.start, index, inserted),
                shift_insert(sel.end, index, inserted),
            )
        });

        self.finish_edit(old, selection_before);
        true
    }

    /// Remove `count` chars at `index` without committing
    fn remove_chars(&mut self, index: usize, count: usize) -> bool {
        if !self.constraints.is_editable() {
            tracing::trace!(target: "message", "remove rejected: not editable");
            return false;
        }
        let len = self.buffer.len_chars();
        if index > len {
            return false;
        }
        let count = count.min(len - index);
        if count == 0 {
            return false;
        }

        let old = self.buffer.rope().clone();
        let selection_before = self.selection;
        self.remove_range(index..index + count);
        self.finish_edit(old, selection_before);
        true
    }

    /// Remove a range from the buffer and shift the caret and selection
    fn remove_range(&mut self, range: Range<usize>) {
        self.buffer.remove(range.clone());
        self.caret = shift_remove(self.caret, &range);
        self.selection = self.selection.and_then(|sel| {
            Selection::new(shift_remove(sel.start, &range), shift_remove(sel.end, &range))
        });
    }

    fn finish_edit(&mut self, old: Rope, selection_before: Option<Selection>) {
        self.dirty.merge(DirtyFlags::ALL);
        // Drag anchors are buffer indices
        self.drag = None;
        self.sticky_selection = false;
        self.home_latch = false;
        self.touch();
        self.events.push(TextAreaEvent::TextChanged {
            old,
            new: self.buffer.rope().clone(),
        });
        if self.selection != selection_before {
            self.events.push(TextAreaEvent::SelectionChanged {
                selection: self.selection,
            });
        }
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    pub fn copy(&mut self) {
        if self.selection.is_some() {
            let text = self.selected_text();
            self.clipboard.set_text(&text);
            tracing::debug!(target: "clipboard", chars = text.chars().count(), "copied");
        }
    }

    pub fn cut(&mut self) -> bool {
        if self.selection.is_none() || !self.constraints.is_editable() {
            return false;
        }
        self.copy();
        self.delete_selection()
    }

    /// Insert the clipboard text at the caret
    pub fn paste(&mut self) -> bool {
        match self.clipboard.get_text() {
            Some(text) if !text.is_empty() => self.insert_text(self.caret.index, &text),
            _ => false,
        }
    }

    // =========================================================================
    // History
    // =========================================================================

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.buffer.rope().clone(),
            caret: self.caret,
            scroll_x: self.viewport.scroll_x,
            scroll_y: self.viewport.scroll_y,
            content_width: self.content_width,
            content_height: self.content_height,
        }
    }

    /// Commit the current state if the text changed since the last commit
    fn commit_snapshot(&mut self) -> bool {
        let snapshot = self.snapshot();
        self.history.commit(snapshot)
    }

    /// Step back one history entry. Uncommitted typing is committed first so
    /// it undoes as one step.
    pub fn undo(&mut self) -> bool {
        if !self.constraints.is_editable() {
            return false;
        }
        self.commit_snapshot();
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        tracing::debug!(target: "history", depth = self.history.undo_count(), "undo");
        self.restore(snapshot);
        true
    }

    /// Re-apply the last undone entry. Uncommitted typing is committed
    /// first, which clears the redo stack and keeps the typed text.
    pub fn redo(&mut self) -> bool {
        if !self.constraints.is_editable() {
            return false;
        }
        self.commit_snapshot();
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        tracing::debug!(target: "history", depth = self.history.undo_count(), "redo");
        self.restore(snapshot);
        true
    }

    fn restore(&mut self, snapshot: Snapshot) {
        let old = self.buffer.rope().clone();
        self.buffer.restore(snapshot.text);
        self.caret = snapshot.caret.clamped(self.buffer.len_chars());
        self.viewport.scroll_x = snapshot.scroll_x;
        self.viewport.scroll_y = snapshot.scroll_y;
        self.content_width = snapshot.content_width;
        self.content_height = snapshot.content_height;
        self.set_selection(None);
        self.sticky_selection = false;
        self.drag = None;
        self.dirty.merge(DirtyFlags::ALL);
        self.touch();
        if old != *self.buffer.rope() {
            self.events.push(TextAreaEvent::TextChanged {
                old,
                new: self.buffer.rope().clone(),
            });
        }
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Apply pointer input. Coordinates are relative to the viewport.
    pub fn handle_mouse(&mut self, msg: MouseMsg) {
        if !self.constraints.interactable {
            return;
        }
        self.ensure_layout();

        match msg {
            MouseMsg::Down { x, y, shift } => self.mouse_down(x, y, shift),
            MouseMsg::Move { x, y } => self.mouse_drag(x, y),
            MouseMsg::Up => self.drag = None,
        }
    }

    fn mouse_down(&mut self, x: f32, y: f32, shift: bool) {
        let (cx, cy) = self.viewport.to_content(x, y);
        let hit = point_to_caret(&self.lines, Point::new(cx, cy));
        let clicks = self.clicks.track_click(self.clock, hit.index);
        self.home_latch = false;
        self.sticky_selection = false;
        tracing::debug!(target: "selection", index = hit.index, clicks, "mouse down");

        let anchor = match clicks {
            1 if shift => {
                let sel = selection::extend(self.selection, self.caret, hit);
                let fixed = sel.map_or(hit.index, |s| s.start.index);
                self.set_selection(sel);
                self.caret = hit;
                DragAnchor::Caret(fixed)
            }
            1 => {
                self.set_selection(None);
                self.caret = hit;
                DragAnchor::Caret(hit.index)
            }
            2 => {
                let range = word_range_at(&self.buffer, hit.index);
                self.set_selection(Selection::from_range(range.clone()));
                self.caret = CaretIndex::new(range.end);
                DragAnchor::Snapped(range)
            }
            _ => {
                let line_no = self.lines.line_at_y(cy);
                let range = line_range(self.lines.line(line_no));
                self.set_selection(Selection::from_range(range.clone()));
                self.caret = line_end_caret(&self.lines, line_no);
                DragAnchor::Snapped(range)
            }
        };

        self.drag = Some(DragState { anchor });
        self.mark_caret_moved(false);
    }

    fn mouse_drag(&mut self, x: f32, y: f32) {
        let Some(drag) = &self.drag else {
            return;
        };
        let (cx, cy) = self.viewport.to_content(x, y);
        let hit = point_to_caret(&self.lines, Point::new(cx, cy));

        let (sel, caret) = match &drag.anchor {
            DragAnchor::Caret(fixed) => (Selection::new(CaretIndex::new(*fixed), hit), hit),
            DragAnchor::Snapped(range) => {
                let (fixed, moving) = snap_drag(range, hit.index);
                let caret = if moving == hit.index {
                    hit
                } else {
                    CaretIndex::new(moving)
                };
                (Selection::new(CaretIndex::new(fixed), caret), caret)
            }
        };

        self.set_selection(sel);
        if self.caret != caret {
            self.caret = caret;
            self.mark_caret_moved(false);
        }
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Check engine invariants (debug builds only)
    pub fn assert_invariants(&self, context: &str) {
        let len = self.buffer.len_chars();
        debug_assert!(
            self.caret.index <= len,
            "[{}] caret {} past end {}",
            context,
            self.caret.index,
            len
        );
        if let Some(sel) = self.selection {
            debug_assert!(
                sel.right().index <= len,
                "[{}] selection {:?} past end {}",
                context,
                sel.range(),
                len
            );
            debug_assert!(
                sel.start.index != sel.end.index,
                "[{}] empty selection stored",
                context
            );
        }
        debug_assert!(!self.lines.lines().is_empty(), "[{}] no lines", context);
        if !self.dirty.lines {
            let covered: usize = self.lines.lines().iter().map(|l| l.len).sum();
            debug_assert_eq!(covered, len, "[{}] lines do not cover buffer", context);
        }
    }
}

/// Caret position after `inserted` chars were inserted at `index`
fn shift_insert(caret: CaretIndex, index: usize, inserted: usize) -> CaretIndex {
    if caret.index >= index {
        CaretIndex::new(caret.index + inserted)
    } else {
        caret
    }
}

/// Caret position after `range` was removed: inside moves to its start,
/// after shifts left keeping the end-of-line placement
fn shift_remove(caret: CaretIndex, range: &Range<usize>) -> CaretIndex {
    if caret.index >= range.end {
        let index = caret.index - range.len();
        if caret.at_end_of_line {
            CaretIndex::at_line_end(index)
        } else {
            CaretIndex::new(index)
        }
    } else if caret.index > range.start {
        CaretIndex::new(range.start)
    } else {
        caret
    }
}
