//! Clipboard adapter used by Copy, Cut and Paste.

use std::fmt::Debug;

/// Text clipboard the engine reads from and writes to.
///
/// Failures are swallowed: a clipboard that cannot be opened behaves as empty.
pub trait Clipboard: Debug {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// The OS clipboard, opened per access
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => clipboard.get_text().ok(),
            Err(e) => {
                tracing::debug!(target: "clipboard", "clipboard unavailable: {}", e);
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            if let Err(e) = clipboard.set_text(text) {
                tracing::debug!(target: "clipboard", "clipboard write failed: {}", e);
            }
        }
    }
}

/// Process-local clipboard for headless hosts and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_owned());
    }
}
