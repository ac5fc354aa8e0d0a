//! Raw key input and the default bindings that turn it into intents.

use std::fmt;

use anyhow::{anyhow, bail, Result};

use super::messages::{MoveTarget, TextEditMsg};

/// Modifier keys as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        if meta {
            bits |= Self::META.0;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ctrl, or Cmd on macOS keyboards
    #[inline]
    pub const fn command(self) -> bool {
        self.ctrl() || self.meta()
    }

    /// Modifier that turns a char step into a word step
    #[inline]
    pub const fn word(self) -> bool {
        self.ctrl() || self.alt()
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Keys the text area understands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character, as typed
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
}

/// A key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// The intent this keystroke produces under the default bindings
    pub fn intent(&self) -> Option<TextEditMsg> {
        binding(self.key, self.mods)
    }
}

/// Default key bindings.
///
/// Returns None for keys the text area ignores (e.g. Ctrl with an unbound
/// letter) so the host can route them elsewhere.
pub fn binding(key: KeyCode, mods: Modifiers) -> Option<TextEditMsg> {
    let movement = |target: MoveTarget| {
        Some(if mods.shift() {
            TextEditMsg::MoveWithSelection(target)
        } else {
            TextEditMsg::Move(target)
        })
    };

    match key {
        KeyCode::Left if mods.word() => movement(MoveTarget::WordLeft),
        KeyCode::Right if mods.word() => movement(MoveTarget::WordRight),
        KeyCode::Left => movement(MoveTarget::Left),
        KeyCode::Right => movement(MoveTarget::Right),
        KeyCode::Up => movement(MoveTarget::Up),
        KeyCode::Down => movement(MoveTarget::Down),
        KeyCode::Home if mods.command() => movement(MoveTarget::DocumentStart),
        KeyCode::End if mods.command() => movement(MoveTarget::DocumentEnd),
        KeyCode::Home => movement(MoveTarget::LineStart),
        KeyCode::End => movement(MoveTarget::LineEnd),
        KeyCode::PageUp => movement(MoveTarget::PageUp),
        KeyCode::PageDown => movement(MoveTarget::PageDown),

        KeyCode::Backspace if mods.word() => Some(TextEditMsg::DeleteWordBackward),
        KeyCode::Delete if mods.word() => Some(TextEditMsg::DeleteWordForward),
        KeyCode::Backspace => Some(TextEditMsg::DeleteBackward),
        KeyCode::Delete => Some(TextEditMsg::DeleteForward),
        KeyCode::Enter => Some(TextEditMsg::InsertNewline),
        KeyCode::Tab if mods.is_empty() => Some(TextEditMsg::InsertChar('\t')),
        KeyCode::Tab => None,
        KeyCode::Escape => Some(TextEditMsg::CancelSelection),
        KeyCode::Insert if mods.shift() => Some(TextEditMsg::Paste),
        KeyCode::Insert if mods.command() => Some(TextEditMsg::Copy),
        KeyCode::Insert => Some(TextEditMsg::ToggleOverwrite),

        KeyCode::Char(c) if mods.command() => match (c.to_ascii_lowercase(), mods.shift()) {
            ('a', false) => Some(TextEditMsg::SelectAll),
            ('c', false) => Some(TextEditMsg::Copy),
            ('x', false) => Some(TextEditMsg::Cut),
            ('v', false) => Some(TextEditMsg::Paste),
            ('z', false) => Some(TextEditMsg::Undo),
            ('z', true) | ('y', false) => Some(TextEditMsg::Redo),
            _ => None,
        },
        KeyCode::Char(c) if c.is_control() => None,
        KeyCode::Char(c) => Some(TextEditMsg::InsertChar(c)),
    }
}

/// Parse a key string like "ctrl+shift+left" or "a"
pub fn parse_keystroke(s: &str) -> Result<Keystroke> {
    let mut mods = Modifiers::NONE;
    let mut key = None;

    for part in s.split('+') {
        let lower = part.trim().to_lowercase();
        match lower.as_str() {
            "ctrl" | "control" | "cmd" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            _ => {
                if key.is_some() {
                    bail!("multiple keys in '{}'", s);
                }
                key = Some(parse_key_code(part.trim())?);
            }
        }
    }

    let key = key.ok_or_else(|| anyhow!("no key in '{}'", s))?;
    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let code = match key.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "backspace" | "back" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "insert" | "ins" => KeyCode::Insert,
        _ => bail!("unknown key '{}'", key),
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows() {
        assert_eq!(
            binding(KeyCode::Left, Modifiers::NONE),
            Some(TextEditMsg::Move(MoveTarget::Left))
        );
        assert_eq!(
            binding(KeyCode::Right, Modifiers::SHIFT),
            Some(TextEditMsg::MoveWithSelection(MoveTarget::Right))
        );
        assert_eq!(
            binding(KeyCode::Left, Modifiers::CTRL | Modifiers::SHIFT),
            Some(TextEditMsg::MoveWithSelection(MoveTarget::WordLeft))
        );
    }

    #[test]
    fn test_home_end() {
        assert_eq!(
            binding(KeyCode::Home, Modifiers::NONE),
            Some(TextEditMsg::Move(MoveTarget::LineStart))
        );
        assert_eq!(
            binding(KeyCode::End, Modifiers::CTRL),
            Some(TextEditMsg::Move(MoveTarget::DocumentEnd))
        );
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(binding(KeyCode::Char('a'), Modifiers::CTRL), Some(TextEditMsg::SelectAll));
        assert_eq!(binding(KeyCode::Char('Z'), Modifiers::CTRL), Some(TextEditMsg::Undo));
        assert_eq!(
            binding(KeyCode::Char('z'), Modifiers::CTRL | Modifiers::SHIFT),
            Some(TextEditMsg::Redo)
        );
        assert_eq!(binding(KeyCode::Char('y'), Modifiers::META), Some(TextEditMsg::Redo));
        assert_eq!(binding(KeyCode::Char('q'), Modifiers::CTRL), None);
    }

    #[test]
    fn test_typing() {
        assert_eq!(
            binding(KeyCode::Char('A'), Modifiers::SHIFT),
            Some(TextEditMsg::InsertChar('A'))
        );
        assert_eq!(binding(KeyCode::Enter, Modifiers::NONE), Some(TextEditMsg::InsertNewline));
        assert_eq!(binding(KeyCode::Tab, Modifiers::NONE), Some(TextEditMsg::InsertChar('\t')));
        assert_eq!(binding(KeyCode::Insert, Modifiers::NONE), Some(TextEditMsg::ToggleOverwrite));
        assert_eq!(
            binding(KeyCode::Backspace, Modifiers::ALT),
            Some(TextEditMsg::DeleteWordBackward)
        );
    }

    #[test]
    fn test_parse_keystroke() {
        let ks = parse_keystroke("shift+end").unwrap();
        assert_eq!(ks, Keystroke::new(KeyCode::End, Modifiers::SHIFT));

        let ks = parse_keystroke("ctrl+shift+Left").unwrap();
        assert!(ks.mods.ctrl() && ks.mods.shift());
        assert_eq!(ks.key, KeyCode::Left);

        assert_eq!(parse_keystroke("x").unwrap().key, KeyCode::Char('x'));
        assert!(parse_keystroke("ctrl+a+b").is_err());
        assert!(parse_keystroke("ctrl").is_err());
        assert!(parse_keystroke("hyper").is_err());
    }

    #[test]
    fn test_modifiers_display() {
        assert_eq!((Modifiers::CTRL | Modifiers::SHIFT).to_string(), "Ctrl+Shift");
        assert_eq!(Modifiers::NONE.to_string(), "");
    }
}
