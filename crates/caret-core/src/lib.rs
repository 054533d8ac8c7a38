//! Editing core for a plain-text buffer.
//!
//! The crate is a pure state-transition engine: [`apply`] maps an
//! [`EditorState`] and an [`Action`] to the next state. Positions convert
//! between linear offsets and `(x, y)` cursors in [`position`], and word-wise
//! motion and deletion share the scanner in [`word`].
pub mod document;
pub mod engine;
pub mod position;
pub mod session;
pub mod state;
pub mod word;

pub use document::Document;
pub use engine::{apply, Action};
pub use position::{effective_cursor, to_cursor_position, to_linear_offset};
pub use session::Session;
pub use state::{CursorPosition, EditorState};
pub use word::Direction;
