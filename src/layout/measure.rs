//! Text measurement: the host-supplied width function and the substring width cache.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings};

/// Identifies a font face at a given size. Cached widths are keyed by it.
pub type FontId = u64;

/// Width measurement supplied by the host.
pub trait TextMeasure: fmt::Debug {
    /// Identity of the face/size combination; two measurers with the same id
    /// must return identical widths for identical text.
    fn font_id(&self) -> FontId;

    /// Width in pixels of `text` laid out on a single line
    fn measure(&self, text: &str) -> f32;

    /// Distance between consecutive baselines in pixels
    fn line_height(&self) -> f32;
}

/// Fixed-advance measurement, one advance per char (newlines measure 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceMeasure {
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn font_id(&self) -> FontId {
        ((self.advance.to_bits() as u64) << 32) | self.line_height.to_bits() as u64
    }

    fn measure(&self, text: &str) -> f32 {
        text.chars().filter(|&c| c != '\n').count() as f32 * self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Measurement backed by a TrueType/OpenType face rasterized with fontdue.
///
/// Widths are the sum of per-glyph advance widths at `px`; no kerning.
pub struct FontdueMeasure {
    font: Font,
    px: f32,
    line_height: f32,
    id: FontId,
}

impl FontdueMeasure {
    /// Load a face from raw font bytes at the given pixel size
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow!("Failed to parse font: {}", e))?;
        let line_height = font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size)
            .unwrap_or(px * 1.2);
        let id = ((font.file_hash() as u64) << 32) ^ px.to_bits() as u64;

        Ok(Self {
            font,
            px,
            line_height,
            id,
        })
    }

    /// Load a face from a font file on disk
    pub fn from_file(path: &Path, px: f32) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font file {}", path.display()))?;
        Self::from_bytes(&bytes, px)
            .with_context(|| format!("Failed to load font {}", path.display()))
    }

    pub fn px(&self) -> f32 {
        self.px
    }
}

impl fmt::Debug for FontdueMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontdueMeasure")
            .field("px", &self.px)
            .field("line_height", &self.line_height)
            .field("id", &self.id)
            .finish()
    }
}

impl TextMeasure for FontdueMeasure {
    fn font_id(&self) -> FontId {
        self.id
    }

    fn measure(&self, text: &str) -> f32 {
        text.chars()
            .filter(|&c| c != '\n')
            .map(|c| self.font.metrics(c, self.px).advance_width)
            .sum()
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Default number of cached substrings before the cache is flushed
pub const DEFAULT_CACHE_CAPACITY: usize = 8192;

/// Width cache keyed by (font, exact substring).
///
/// Eviction is wholesale: once `capacity` entries are stored the cache is
/// cleared before the next insert.
#[derive(Debug, Clone)]
pub struct MeasureCache {
    entries: HashMap<FontId, HashMap<String, f32>>,
    len: usize,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MeasureCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            len: 0,
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Width of `text` under `font`, measured at most once per cache lifetime
    pub fn measure(&mut self, font: &dyn TextMeasure, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let id = font.font_id();
        if let Some(width) = self.entries.get(&id).and_then(|m| m.get(text)) {
            self.hits += 1;
            return *width;
        }

        self.misses += 1;
        if self.len >= self.capacity {
            tracing::trace!(target: "layout", entries = self.len, "measure cache flushed");
            self.entries.clear();
            self.len = 0;
        }

        let width = font.measure(text);
        self.entries
            .entry(id)
            .or_default()
            .insert(text.to_owned(), width);
        self.len += 1;
        width
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
