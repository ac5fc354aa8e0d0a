//! Utility modules

pub mod text;

pub use text::{is_indent, is_punctuation, is_splitter, is_wrap_point, strip_carriage_returns};
