//! Character classes and normalization shared by wrapping, navigation and hit-testing

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
    )
}

/// Splitter characters delimit words for ctrl-navigation and double-click selection.
///
/// Whitespace (including `'\n'`) and common punctuation.
pub fn is_splitter(ch: char) -> bool {
    ch.is_whitespace() || is_punctuation(ch)
}

/// A line may be soft-wrapped directly after one of these characters.
pub fn is_wrap_point(ch: char) -> bool {
    ch == ' ' || ch == '-'
}

/// Whitespace that Home skips over when looking for the first real character.
pub fn is_indent(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Strip every carriage return so the buffer only ever holds `'\n'` line endings.
pub fn strip_carriage_returns(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains('\r') {
        std::borrow::Cow::Owned(text.chars().filter(|&c| c != '\r').collect())
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}
