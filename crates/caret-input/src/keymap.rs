//! Translation of device events into editor actions.
//!
//! A [`Keymap`] binds key chords to named [`Command`]s and implements
//! [`InputAdapter`], the boundary where device input becomes an [`Action`].
//! Text and paste payloads become insertions, pointer hits become caret
//! placements, and unbound chords are ignored.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use caret_config::EditorConfig;
use caret_core::{Action, Direction};

use crate::key::{Key, KeyChord, Modifiers};

/// Input as delivered by a device layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    /// Characters typed by the user.
    Text(String),
    /// Clipboard contents to insert.
    Paste(String),
    /// A key press.
    Key(KeyChord),
    /// A pointer press already hit-tested to a linear offset.
    PointerHit { offset: usize },
}

/// Turns device events into actions.
pub trait InputAdapter {
    /// Returns the action for `event`, or `None` if the event does nothing.
    fn translate(&self, event: &DeviceEvent) -> Option<Action>;
}

/// Named editor commands that key chords bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveWordLeft,
    MoveWordRight,
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    SmartHome,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    Backspace,
    DeleteWordBackward,
    Delete,
    DeleteWordForward,
    Newline,
    Indent,
}

impl Command {
    const ALL: [Command; 18] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveWordLeft,
        Command::MoveWordRight,
        Command::LineUp,
        Command::LineDown,
        Command::PageUp,
        Command::PageDown,
        Command::SmartHome,
        Command::LineEnd,
        Command::DocumentStart,
        Command::DocumentEnd,
        Command::Backspace,
        Command::DeleteWordBackward,
        Command::Delete,
        Command::DeleteWordForward,
        Command::Newline,
        Command::Indent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::MoveLeft => "move_left",
            Command::MoveRight => "move_right",
            Command::MoveWordLeft => "move_word_left",
            Command::MoveWordRight => "move_word_right",
            Command::LineUp => "line_up",
            Command::LineDown => "line_down",
            Command::PageUp => "page_up",
            Command::PageDown => "page_down",
            Command::SmartHome => "smart_home",
            Command::LineEnd => "line_end",
            Command::DocumentStart => "document_start",
            Command::DocumentEnd => "document_end",
            Command::Backspace => "backspace",
            Command::DeleteWordBackward => "delete_word_backward",
            Command::Delete => "delete",
            Command::DeleteWordForward => "delete_word_forward",
            Command::Newline => "newline",
            Command::Indent => "indent",
        }
    }

    /// Builds the action this command performs.
    pub fn to_action(self, page_lines: usize, tab_text: &str) -> Action {
        let page = isize::try_from(page_lines).unwrap_or(isize::MAX);
        let horizontal = |direction, word| Action::MoveHorizontal { direction, word };
        match self {
            Command::MoveLeft => horizontal(Direction::Backward, false),
            Command::MoveRight => horizontal(Direction::Forward, false),
            Command::MoveWordLeft => horizontal(Direction::Backward, true),
            Command::MoveWordRight => horizontal(Direction::Forward, true),
            Command::LineUp => Action::MoveVertical { by: -1 },
            Command::LineDown => Action::MoveVertical { by: 1 },
            Command::PageUp => Action::MoveVertical { by: -page },
            Command::PageDown => Action::MoveVertical { by: page },
            Command::SmartHome => Action::Home { of_text: false },
            Command::LineEnd => Action::End { of_text: false },
            Command::DocumentStart => Action::Home { of_text: true },
            Command::DocumentEnd => Action::End { of_text: true },
            Command::Backspace => Action::Backspace { word: false },
            Command::DeleteWordBackward => Action::Backspace { word: true },
            Command::Delete => Action::Delete { word: false },
            Command::DeleteWordForward => Action::Delete { word: true },
            Command::Newline => Action::Newline,
            Command::Indent => Action::insert(tab_text),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Command::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| anyhow::anyhow!("unknown command {s:?}"))
    }
}

/// Chord-to-command bindings plus the settings commands need.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyChord, Command>,
    page_lines: usize,
    tab_text: String,
}

impl Default for Keymap {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self::with_defaults(config.page_lines, config.tab_text)
    }
}

impl Keymap {
    /// Creates a keymap with the standard bindings.
    pub fn with_defaults(page_lines: usize, tab_text: impl Into<String>) -> Self {
        let bindings = [
            (KeyChord::plain(Key::Left), Command::MoveLeft),
            (KeyChord::plain(Key::Right), Command::MoveRight),
            (KeyChord::ctrl(Key::Left), Command::MoveWordLeft),
            (KeyChord::ctrl(Key::Right), Command::MoveWordRight),
            (KeyChord::plain(Key::Up), Command::LineUp),
            (KeyChord::plain(Key::Down), Command::LineDown),
            (KeyChord::plain(Key::PageUp), Command::PageUp),
            (KeyChord::plain(Key::PageDown), Command::PageDown),
            (KeyChord::plain(Key::Home), Command::SmartHome),
            (KeyChord::plain(Key::End), Command::LineEnd),
            (KeyChord::ctrl(Key::Home), Command::DocumentStart),
            (KeyChord::ctrl(Key::End), Command::DocumentEnd),
            (KeyChord::plain(Key::Backspace), Command::Backspace),
            (KeyChord::ctrl(Key::Backspace), Command::DeleteWordBackward),
            (KeyChord::plain(Key::Delete), Command::Delete),
            (KeyChord::ctrl(Key::Delete), Command::DeleteWordForward),
            (KeyChord::plain(Key::Enter), Command::Newline),
            (KeyChord::plain(Key::Tab), Command::Indent),
        ]
        .into_iter()
        .collect();

        Self {
            bindings,
            page_lines: page_lines.max(1),
            tab_text: tab_text.into(),
        }
    }

    /// Creates a keymap from config: standard bindings, then the config's
    /// overrides in order. Invalid overrides are logged and skipped.
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut keymap = Self::with_defaults(config.page_lines, config.tab_text.clone());
        for entry in &config.bindings {
            let parsed = entry
                .chord
                .parse::<KeyChord>()
                .and_then(|chord| Ok((chord, entry.command.parse::<Command>()?)));
            match parsed {
                Ok((chord, command)) => {
                    tracing::debug!(%chord, %command, "binding override");
                    keymap.bind(chord, command);
                }
                Err(e) => {
                    tracing::warn!(
                        "Ignoring binding {:?} -> {:?}: {e}",
                        entry.chord,
                        entry.command
                    );
                }
            }
        }
        keymap
    }

    /// Binds `chord` to `command`, returning the command it replaced.
    pub fn bind(&mut self, chord: KeyChord, command: Command) -> Option<Command> {
        self.bindings.insert(chord, command)
    }

    /// Removes the binding for `chord`.
    pub fn unbind(&mut self, chord: &KeyChord) -> Option<Command> {
        self.bindings.remove(chord)
    }

    /// Returns the command bound to `chord`.
    ///
    /// Shift only extends selections, which this editor does not have, so a
    /// shifted chord falls back to its unshifted binding.
    pub fn command_for(&self, chord: &KeyChord) -> Option<Command> {
        self.bindings.get(chord).copied().or_else(|| {
            if !chord.modifiers.shift {
                return None;
            }
            let unshifted = KeyChord::new(
                chord.key,
                Modifiers {
                    shift: false,
                    ..chord.modifiers
                },
            );
            self.bindings.get(&unshifted).copied()
        })
    }
}

impl InputAdapter for Keymap {
    fn translate(&self, event: &DeviceEvent) -> Option<Action> {
        match event {
            DeviceEvent::Text(text) | DeviceEvent::Paste(text) if text.is_empty() => None,
            DeviceEvent::Text(text) | DeviceEvent::Paste(text) => Some(Action::insert(text.as_str())),
            DeviceEvent::Key(chord) => {
                let command = self.command_for(chord);
                if command.is_none() {
                    tracing::debug!(%chord, "unbound chord");
                }
                command.map(|c| c.to_action(self.page_lines, &self.tab_text))
            }
            DeviceEvent::PointerHit { offset } => Some(Action::SetCaret { offset: *offset }),
        }
    }
}
