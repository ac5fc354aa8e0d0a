//! Edit constraints for the text area.
//!
//! Constraints gate which writes the mutation engine accepts. A rejected write
//! leaves the buffer untouched; nothing is truncated or partially applied.

/// Character filter function type. Returns true if the character is allowed.
pub type CharFilter = fn(char) -> bool;

/// Constraints that limit what edits are allowed.
#[derive(Debug, Clone)]
pub struct EditConstraints {
    /// Reject every edit; navigation, selection and copy still work
    pub read_only: bool,

    /// Reject every edit and pointer interaction
    pub interactable: bool,

    /// Allow newlines in the buffer
    pub allow_multiline: bool,

    /// Maximum length in characters (None = unlimited)
    pub max_length: Option<usize>,

    /// Character filter (None = all characters allowed)
    pub char_filter: Option<CharFilter>,
}

impl Default for EditConstraints {
    fn default() -> Self {
        Self {
            read_only: false,
            interactable: true,
            allow_multiline: true,
            max_length: None,
            char_filter: None,
        }
    }
}

impl EditConstraints {
    /// Navigation and copy only
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// One line of free text
    pub fn single_line() -> Self {
        Self {
            allow_multiline: false,
            ..Self::default()
        }
    }

    /// Digits only, single line
    pub fn numeric() -> Self {
        Self {
            allow_multiline: false,
            max_length: Some(10),
            char_filter: Some(|c| c.is_ascii_digit()),
            ..Self::default()
        }
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn with_filter(mut self, filter: CharFilter) -> Self {
        self.char_filter = Some(filter);
        self
    }

    /// Whether edits are accepted at all
    pub fn is_editable(&self) -> bool {
        self.interactable && !self.read_only
    }

    /// Check if a character passes the filter and the multiline rule
    pub fn allows_char(&self, c: char) -> bool {
        if c == '\n' && !self.allow_multiline {
            return false;
        }
        self.char_filter.map_or(true, |filter| filter(c))
    }

    /// Check whether inserting `text` into a buffer that will hold
    /// `remaining_len` chars before the insert is allowed
    pub fn allows_insert(&self, text: &str, remaining_len: usize) -> bool {
        if !self.is_editable() || !text.chars().all(|c| self.allows_char(c)) {
            return false;
        }
        match self.max_length {
            Some(max) => remaining_len + text.chars().count() <= max,
            None => true,
        }
    }
}
