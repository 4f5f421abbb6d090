//! Platform-independent input events.
//!
//! The viewer never polls device state; it only reacts to these events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer buttons the viewer distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button: click to select, drag to orbit.
    Left,
    /// Secondary button: drag to pan freely.
    Right,
    /// Wheel button.
    Middle,
    /// Any other button.
    Other,
}

/// A logical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character, stored uppercase.
    Char(char),
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
}

impl Key {
    /// Parse a binding name such as `"O"`, `"space"`, or `"Enter"`.
    pub fn parse(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "space" => return Some(Key::Space),
            "enter" | "return" => return Some(Key::Enter),
            "escape" | "esc" => return Some(Key::Escape),
            _ => {}
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Key::from_char(c)),
            _ => None,
        }
    }

    /// Key for a typed character; letters are folded to uppercase.
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            Key::Space
        } else {
            Key::Char(c.to_ascii_uppercase())
        }
    }
}

/// One discrete input event, positions in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer button went down.
    PointerDown {
        /// Cursor position.
        position: Vec2,
        /// Button pressed.
        button: PointerButton,
    },
    /// A pointer button went up.
    PointerUp {
        /// Cursor position.
        position: Vec2,
        /// Button released.
        button: PointerButton,
    },
    /// The cursor moved.
    PointerMove {
        /// Cursor position.
        position: Vec2,
    },
    /// Wheel scrolled; positive zooms out.
    Wheel {
        /// Scroll amount in lines.
        delta_y: f32,
    },
    /// A key was pressed.
    KeyPress(Key),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(Key::parse("Space"), Some(Key::Space));
        assert_eq!(Key::parse(" return "), Some(Key::Enter));
        assert_eq!(Key::parse("esc"), Some(Key::Escape));
    }

    #[test]
    fn test_parse_characters_fold_case() {
        assert_eq!(Key::parse("o"), Some(Key::Char('O')));
        assert_eq!(Key::parse("F"), Some(Key::Char('F')));
        assert_eq!(Key::from_char(' '), Key::Space);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Key::parse(""), None);
        assert_eq!(Key::parse("ctrl+o"), None);
    }
}
