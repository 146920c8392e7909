//! Input event records.
//!
//! Every record here is `Copy`. Window adapters keep one instance of each
//! kind alive for their whole lifetime and rewrite its fields per dispatched
//! message; delivery to the application copies the current contents, so no
//! event allocation happens on the input path.

use bitflags::bitflags;

use crate::geometry::{Point, Rect};

bitflags! {
    /// Keyboard modifier state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// A mouse button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }

    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}

/// What a mouse event reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseKind {
    Down,
    Up,
    #[default]
    Moved,
    DoubleClick,
}

/// A mouse event, positioned in the receiving widget's client space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseKind,
    pub button: MouseButton,
    pub position: Point,
    pub modifiers: Modifiers,
    pub click_count: u8,
}

/// A key, either a named non-printing key or a printable character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Return,
    Escape,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    /// A function key, `F(1)` through `F(12)`.
    F(u8),
    /// A printable character.
    Char(char),
}

// Named keys encode above the Unicode range so the two spaces cannot collide.
const NAMED_BASE: u32 = 0x0200_0000;

impl Key {
    /// Encode into the raw key code carried by native key messages.
    pub const fn to_raw(self) -> u32 {
        match self {
            Self::Return => NAMED_BASE,
            Self::Escape => NAMED_BASE + 1,
            Self::Tab => NAMED_BASE + 2,
            Self::Backspace => NAMED_BASE + 3,
            Self::Delete => NAMED_BASE + 4,
            Self::Left => NAMED_BASE + 5,
            Self::Right => NAMED_BASE + 6,
            Self::Up => NAMED_BASE + 7,
            Self::Down => NAMED_BASE + 8,
            Self::Home => NAMED_BASE + 9,
            Self::End => NAMED_BASE + 10,
            Self::PageUp => NAMED_BASE + 11,
            Self::PageDown => NAMED_BASE + 12,
            Self::Space => NAMED_BASE + 13,
            Self::F(n) => NAMED_BASE + 0x100 + n as u32,
            Self::Char(c) => c as u32,
        }
    }

    /// Decode a raw key code. Unknown codes decode to `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        if raw < NAMED_BASE {
            return char::from_u32(raw).map(Self::Char);
        }
        let key = match raw - NAMED_BASE {
            0 => Self::Return,
            1 => Self::Escape,
            2 => Self::Tab,
            3 => Self::Backspace,
            4 => Self::Delete,
            5 => Self::Left,
            6 => Self::Right,
            7 => Self::Up,
            8 => Self::Down,
            9 => Self::Home,
            10 => Self::End,
            11 => Self::PageUp,
            12 => Self::PageDown,
            13 => Self::Space,
            n if (0x100..=0x10c).contains(&n) => Self::F((n - 0x100) as u8),
            _ => return None,
        };
        Some(key)
    }
}

/// Whether a key event is a raw key press or a translated character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyKind {
    #[default]
    Down,
    Char,
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyKind,
    pub key: Key,
    pub modifiers: Modifiers,
}

impl Default for KeyEvent {
    fn default() -> Self {
        Self {
            kind: KeyKind::Down,
            key: Key::Space,
            modifiers: Modifiers::empty(),
        }
    }
}

/// What a window event reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowKind {
    #[default]
    Opened,
    Closing,
    Closed,
    Resized,
    Moved,
    FocusGained,
    FocusLost,
}

/// A window lifecycle or geometry event.
///
/// `bounds` is meaningful for `Resized` and `Moved`; other kinds carry the
/// window's bounds at the time of the event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowEvent {
    pub kind: WindowKind,
    pub bounds: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes_round_trip() {
        for key in [
            Key::Return,
            Key::Escape,
            Key::PageDown,
            Key::F(5),
            Key::Char('q'),
            Key::Char('é'),
        ] {
            assert_eq!(Key::from_raw(key.to_raw()), Some(key));
        }
    }

    #[test]
    fn test_key_codes_disjoint() {
        assert_ne!(Key::Char('a').to_raw(), Key::Return.to_raw());
        assert!(Key::from_raw(NAMED_BASE + 0x500).is_none());
    }
}
