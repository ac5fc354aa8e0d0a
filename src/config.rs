//! Text area configuration persistence
//!
//! Stores preferences in `~/.config/textarea/config.yaml`

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::editable::SelectionRenderMode;
use crate::layout::measure::DEFAULT_CACHE_CAPACITY;

/// Text area configuration. Every field falls back to its default when
/// missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextAreaConfig {
    /// Idle time before typed input is committed as one undo step
    pub history_interval_ms: u64,
    /// Undo depth; the oldest entries are dropped beyond it
    pub max_history: usize,
    /// Caret blink half-period, 0 disables blinking
    pub blink_interval_ms: u64,
    /// Window for counting double and triple clicks
    pub multi_click_ms: u64,
    /// Soft-wrap at the viewport width
    pub wrap: bool,
    /// Pixels kept between the caret and the viewport edge when scrolling
    pub scroll_margin: f32,
    pub selection_render: SelectionRenderMode,
    pub measure_cache_capacity: usize,
    pub read_only: bool,
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self {
            history_interval_ms: 500,
            max_history: 200,
            blink_interval_ms: 530,
            multi_click_ms: 300,
            wrap: true,
            scroll_margin: 0.0,
            selection_render: SelectionRenderMode::Rects,
            measure_cache_capacity: DEFAULT_CACHE_CAPACITY,
            read_only: false,
        }
    }
}

impl TextAreaConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to the user config directory
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn history_interval(&self) -> Duration {
        Duration::from_millis(self.history_interval_ms)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    pub fn multi_click(&self) -> Duration {
        Duration::from_millis(self.multi_click_ms)
    }
}
