//! The text editing engine.
//!
//! # Architecture
//!
//! - [`TextBuffer`]: the edited text, backed by `ropey::Rope`
//! - [`CaretIndex`] / [`Selection`]: caret and selection in char indices
//! - [`navigation`]: pure caret movement over the buffer and its lines
//! - [`History`]: snapshot undo/redo with a coalescing timer
//! - [`TextArea`]: owns all of the above plus the line index, the viewport
//!   and the dirty flags resolved by [`TextArea::update`]
//! - [`TextEditMsg`] / [`MouseMsg`]: input intents; [`keys::binding`] maps raw
//!   keys to intents
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use textarea::config::TextAreaConfig;
//! use textarea::editable::{MoveTarget, TextArea, TextEditMsg};
//! use textarea::layout::MonospaceMeasure;
//!
//! let mut area = TextArea::with_text(
//!     "hello",
//!     Box::new(MonospaceMeasure::new(8.0, 16.0)),
//!     TextAreaConfig::default(),
//! );
//! area.handle(TextEditMsg::Move(MoveTarget::DocumentEnd));
//! area.handle(TextEditMsg::InsertChar('!'));
//! area.update(Duration::from_millis(16));
//!
//! assert_eq!(area.text(), "hello!");
//! ```

mod buffer;
mod clipboard;
mod constraints;
mod cursor;
mod geometry;
mod history;
pub mod keys;
mod messages;
mod mouse;
pub mod navigation;
mod selection;
mod state;
mod sync;

pub use buffer::TextBuffer;
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use constraints::{CharFilter, EditConstraints};
pub use cursor::CaretIndex;
pub use geometry::{
    caret_visible, CaretGeometry, OverlaySpan, SelectionGeometry, SelectionRect,
    SelectionRenderMode,
};
pub use history::{History, Snapshot};
pub use keys::{binding, parse_keystroke, KeyCode, Keystroke, Modifiers};
pub use messages::{MouseMsg, MoveTarget, TextAreaEvent, TextEditMsg};
pub use mouse::{ClickTracker, DragAnchor, DragState};
pub use selection::{extend, Selection, SelectionExtent};
pub use state::TextArea;
pub use sync::{DirtyFlags, SyncReport, Viewport};
