//! Display layout: text measurement, line wrapping and hit-testing.

pub mod hit_test;
pub mod lines;
pub mod measure;

pub use hit_test::Point;
pub use lines::{Line, LineIndex};
pub use measure::{FontId, FontdueMeasure, MeasureCache, MonospaceMeasure, TextMeasure};
