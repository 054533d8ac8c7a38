//! Conversion between linear char offsets and cursor positions.

use crate::document::Document;
use crate::state::{CursorPosition, EditorState};

/// Returns the column the cursor actually occupies: the desired column
/// clamped to the length of its line.
pub fn effective_column(state: &EditorState) -> usize {
    let cursor = state.cursor();
    let line_len = state.document().line_len_chars(cursor.y).unwrap_or(0);
    cursor.x.min(line_len)
}

/// Returns the cursor with any sticky overshoot removed.
pub fn effective_cursor(state: &EditorState) -> CursorPosition {
    CursorPosition::new(effective_column(state), state.cursor().y)
}

/// Converts the cursor of `state` to a linear offset into its document.
///
/// Every preceding line contributes its length plus one for the consumed
/// `\n`; the cursor line contributes the effective column.
pub fn to_linear_offset(state: &EditorState) -> usize {
    let line_start = state.document().line_to_char(state.cursor().y).unwrap_or(0);
    line_start + effective_column(state)
}

/// Converts a linear offset to a cursor position in `document`.
///
/// `y` is the number of lines in the first `offset` chars minus one and `x`
/// is the length of the last of those lines. Offsets past the end are
/// clamped to the end.
pub fn to_cursor_position(offset: usize, document: &Document) -> CursorPosition {
    let clamped = offset.min(document.len_chars());
    let line = document.char_to_line(clamped).unwrap_or(0);
    let line_start = document.line_to_char(line).unwrap_or(0);
    CursorPosition::new(clamped - line_start, line)
}
