//! Debug tracing infrastructure for development diagnostics
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=caret=trace,selection=debug` - scoped filtering
//! - `RUST_LOG=textarea::layout=trace` - module-level filtering
//!
//! Logs are also written to `~/.config/textarea/logs/textarea.log` with daily
//! rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::TextArea;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so stdout stays clean for CLI output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    // A host may already have installed a subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of caret/selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretSnapshot {
    pub index: usize,
    pub at_end_of_line: bool,
    /// `(fixed, moving)` edges
    pub selection: Option<(usize, usize)>,
    pub overwrite: bool,
}

impl CaretSnapshot {
    pub fn from_area(area: &TextArea) -> Self {
        let caret = area.caret();
        Self {
            index: caret.index,
            at_end_of_line: caret.at_end_of_line,
            selection: area.selection().map(|s| (s.start.index, s.end.index)),
            overwrite: area.is_overwrite(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &CaretSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.index != other.index || self.at_end_of_line != other.at_end_of_line {
            changes.push(format!(
                "caret: {}{} → {}{}",
                self.index,
                if self.at_end_of_line { "$" } else { "" },
                other.index,
                if other.at_end_of_line { "$" } else { "" },
            ));
        }

        if self.selection != other.selection {
            match other.selection {
                Some((fixed, moving)) => changes.push(format!("selection {}..{}", fixed, moving)),
                None => changes.push("selection cleared".to_string()),
            }
        }

        if self.overwrite != other.overwrite {
            changes.push(format!("overwrite {}", other.overwrite));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
