//! Device-neutral keys, modifiers, and chords such as `ctrl+left`.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

/// Keys a chord can name.
///
/// Typed characters arrive as text events; [`Key::Char`] only appears in
/// chords with a modifier, such as `ctrl+h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
    Delete,
    Enter,
    Tab,
    /// A character key, stored lowercase.
    Char(char),
}

impl Key {
    const ALL: [Key; 12] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Home,
        Key::End,
        Key::PageUp,
        Key::PageDown,
        Key::Backspace,
        Key::Delete,
        Key::Enter,
        Key::Tab,
    ];

    fn name(self) -> Option<&'static str> {
        let name = match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
            Key::Down => "down",
            Key::Home => "home",
            Key::End => "end",
            Key::PageUp => "pageup",
            Key::PageDown => "pagedown",
            Key::Backspace => "backspace",
            Key::Delete => "delete",
            Key::Enter => "enter",
            Key::Tab => "tab",
            Key::Char(_) => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Key::Char(ch) = self {
            return write!(f, "{ch}");
        }
        f.write_str(self.name().unwrap_or_default())
    }
}

impl FromStr for Key {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let alias = match lower.as_str() {
            "bs" => Some(Key::Backspace),
            "del" => Some(Key::Delete),
            "return" => Some(Key::Enter),
            "pgup" => Some(Key::PageUp),
            "pgdn" => Some(Key::PageDown),
            _ => None,
        };
        let named = alias.or_else(|| {
            Key::ALL
                .into_iter()
                .find(|k| k.name() == Some(lower.as_str()))
        });
        if let Some(key) = named {
            return Ok(key);
        }
        let mut chars = lower.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch != '+' => Ok(Key::Char(ch)),
            _ => anyhow::bail!("unknown key {s:?}"),
        }
    }
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };
}

/// A key together with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyChord {
    type Err = anyhow::Error;

    /// Parses `+`-separated chords, modifiers first: `ctrl+shift+end`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some(key_name) = parts.pop().filter(|k| !k.is_empty()) else {
            anyhow::bail!("empty key chord {s:?}");
        };
        let key: Key = key_name.parse()?;

        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                other => anyhow::bail!("unknown modifier {other:?} in chord {s:?}"),
            }
        }
        Ok(KeyChord::new(key, modifiers))
    }
}
