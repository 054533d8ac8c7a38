//! The edit engine: `apply(state, action) -> state`.
//!
//! Every action is total. Requests past a buffer edge are clamped, and
//! edits that cannot happen (backspace at the start, delete at the end)
//! return a state equal to the input.

use serde::{Deserialize, Serialize};

use crate::document::LINE_SEPARATOR;
use crate::position::{effective_column, to_cursor_position, to_linear_offset};
use crate::state::{CursorPosition, EditorState};
use crate::word::{unit_at, Direction};

/// An edit or motion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Insert text at the cursor. Carriage returns are dropped.
    Insert { text: String },
    /// Delete before the cursor: one char, or one word unit.
    Backspace {
        #[serde(default)]
        word: bool,
    },
    /// Delete after the cursor without moving it: one char, or one word unit.
    Delete {
        #[serde(default)]
        word: bool,
    },
    /// Split the line at the cursor.
    Newline,
    /// Move left or right by one char or one word unit.
    MoveHorizontal {
        direction: Direction,
        #[serde(default)]
        word: bool,
    },
    /// Move `by` lines (negative is up), keeping the desired column.
    MoveVertical { by: isize },
    /// Smart home on the current line, or the start of the document.
    Home {
        #[serde(default)]
        of_text: bool,
    },
    /// End of the current line, or the end of the document.
    End {
        #[serde(default)]
        of_text: bool,
    },
    /// Place the caret at a linear offset (e.g. from a pointer hit-test).
    SetCaret { offset: usize },
}

impl Action {
    pub fn insert(text: impl Into<String>) -> Self {
        Self::Insert { text: text.into() }
    }
}

/// Applies `action` to `state`, returning the next state.
pub fn apply(state: &EditorState, action: &Action) -> EditorState {
    match action {
        Action::Insert { text } => insert(state, text),
        Action::Backspace { word } => backspace(state, *word),
        Action::Delete { word } => delete_forward(state, *word),
        Action::Newline => newline(state),
        Action::MoveHorizontal { direction, word } => move_horizontal(state, *direction, *word),
        Action::MoveVertical { by } => move_vertical(state, *by),
        Action::Home { of_text } => home(state, *of_text),
        Action::End { of_text } => end(state, *of_text),
        Action::SetCaret { offset } => {
            state.with_cursor(to_cursor_position(*offset, state.document()))
        }
    }
}

/// Returns how far one step in `direction` reaches from `offset`.
fn step_len(state: &EditorState, offset: usize, direction: Direction, word: bool) -> usize {
    if word {
        unit_at(state.document(), offset, direction)
    } else {
        1
    }
}

fn insert(state: &EditorState, text: &str) -> EditorState {
    let text: String = text.chars().filter(|&c| c != '\r').collect();
    let offset = to_linear_offset(state);

    let mut document = state.document().clone();
    if document.insert(offset, &text).is_err() {
        return state.clone();
    }
    let cursor = to_cursor_position(offset + text.chars().count(), &document);
    EditorState::from_parts(document, cursor)
}

fn backspace(state: &EditorState, word: bool) -> EditorState {
    let offset = to_linear_offset(state);
    if offset == 0 {
        return state.clone();
    }
    let len = step_len(state, offset, Direction::Backward, word).min(offset);
    let start = offset - len;

    let mut document = state.document().clone();
    if document.remove(start, offset).is_err() {
        return state.clone();
    }
    // The text before `start` is unchanged, so this matches the old document.
    let cursor = to_cursor_position(start, state.document());
    EditorState::from_parts(document, cursor)
}

fn delete_forward(state: &EditorState, word: bool) -> EditorState {
    let offset = to_linear_offset(state);
    let total = state.document().len_chars();
    if offset >= total {
        return state.clone();
    }
    let len = step_len(state, offset, Direction::Forward, word);
    let end = (offset + len).min(total);

    let mut document = state.document().clone();
    if document.remove(offset, end).is_err() {
        return state.clone();
    }
    // The cursor keeps its (x, y): forward deletion never moves it.
    EditorState::from_parts(document, state.cursor())
}

fn newline(state: &EditorState) -> EditorState {
    let offset = to_linear_offset(state);

    let mut document = state.document().clone();
    if document.insert(offset, &LINE_SEPARATOR.to_string()).is_err() {
        return state.clone();
    }
    EditorState::from_parts(document, CursorPosition::new(0, state.cursor().y + 1))
}

fn move_horizontal(state: &EditorState, direction: Direction, word: bool) -> EditorState {
    let offset = to_linear_offset(state);
    let len = step_len(state, offset, direction, word);
    let target = match direction {
        Direction::Backward => offset.saturating_sub(len),
        Direction::Forward => offset.saturating_add(len).min(state.document().len_chars()),
    };
    state.with_cursor(to_cursor_position(target, state.document()))
}

fn move_vertical(state: &EditorState, by: isize) -> EditorState {
    let last_line = state.document().len_lines().saturating_sub(1);
    let cursor = state.cursor();
    let y = cursor.y.saturating_add_signed(by).min(last_line);
    state.with_cursor(CursorPosition::new(cursor.x, y))
}

/// Column of the first non-whitespace char on `line`, if any.
fn indentation_end(state: &EditorState, line: usize) -> Option<usize> {
    let text = state.document().line(line).ok()?;
    text.chars().position(|c| !c.is_whitespace())
}

fn home(state: &EditorState, of_text: bool) -> EditorState {
    if of_text {
        return state.with_cursor(CursorPosition::default());
    }
    let y = state.cursor().y;
    let x = match indentation_end(state, y) {
        Some(start) if start != effective_column(state) => start,
        _ => 0,
    };
    state.with_cursor(CursorPosition::new(x, y))
}

fn end(state: &EditorState, of_text: bool) -> EditorState {
    let document = state.document();
    if of_text {
        return state.with_cursor(to_cursor_position(document.len_chars(), document));
    }
    let y = state.cursor().y;
    let line_len = document.line_len_chars(y).unwrap_or(0);
    state.with_cursor(CursorPosition::new(line_len, y))
}
