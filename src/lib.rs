//! textarea - a multi-line text editing engine
//!
//! Wraps a text buffer into display lines under a pixel width, tracks a caret
//! and selection in char indices, maps pixels to indices and back, and keeps
//! a snapshot undo history. Rendering, windowing and event plumbing belong to
//! the host; the engine exposes line, caret and selection geometry.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod layout;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::TextAreaConfig;
pub use editable::{CaretIndex, Selection, TextArea, TextEditMsg};
pub use layout::{Line, LineIndex, MonospaceMeasure, TextMeasure};
