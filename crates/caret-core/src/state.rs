//! Editor state: a document paired with a cursor.
//!
//! `EditorState` is an immutable value. It can only be built through
//! [`EditorState::new`], which rejects cursors whose line does not exist, so
//! every state the engine receives is structurally valid.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::document::Document;

/// A cursor as a desired column and a line index.
///
/// `x` is the *desired* column and may exceed the length of line `y`; it is
/// kept across vertical motion through shorter lines. The column actually
/// used on the line is `min(x, line length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CursorPosition {
    /// Desired column, in chars.
    pub x: usize,
    /// 0-indexed line.
    pub y: usize,
}

impl CursorPosition {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.y + 1, self.x + 1)
    }
}

/// A document together with its cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    document: Document,
    cursor: CursorPosition,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            document: Document::new(),
            cursor: CursorPosition::default(),
        }
    }
}

impl EditorState {
    /// Pairs a document with a cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if `cursor.y` is not a line of `document`.
    pub fn new(document: Document, cursor: CursorPosition) -> Result<Self> {
        let lines = document.len_lines();
        if cursor.y >= lines {
            anyhow::bail!(
                "cursor line {} out of bounds (document has {} lines)",
                cursor.y,
                lines
            );
        }
        Ok(Self { document, cursor })
    }

    /// Creates a state with the cursor at the start of `document`.
    pub fn at_start(document: Document) -> Self {
        Self {
            document,
            cursor: CursorPosition::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    /// Returns a state with the same document and a different cursor.
    ///
    /// Only the engine builds states this way; it guarantees the line exists.
    pub(crate) fn with_cursor(&self, cursor: CursorPosition) -> Self {
        debug_assert!(cursor.y < self.document.len_lines());
        Self {
            document: self.document.clone(),
            cursor,
        }
    }

    /// Builds a state from parts the engine has already checked.
    pub(crate) fn from_parts(document: Document, cursor: CursorPosition) -> Self {
        debug_assert!(cursor.y < document.len_lines());
        Self { document, cursor }
    }
}
