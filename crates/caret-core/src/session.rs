//! Single-writer holder of the current editor state.

use std::sync::Arc;

use crate::engine::{apply, Action};
use crate::position::to_linear_offset;
use crate::state::EditorState;

/// Owns the authoritative current state and replaces it on every action.
///
/// Readers take an `Arc` snapshot with [`Session::current`]; a snapshot is
/// never changed by later dispatches.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Arc<EditorState>,
    actions_applied: u64,
}

impl Session {
    pub fn new(state: EditorState) -> Self {
        Self {
            current: Arc::new(state),
            actions_applied: 0,
        }
    }

    /// Returns the published state.
    pub fn current(&self) -> Arc<EditorState> {
        Arc::clone(&self.current)
    }

    /// Number of actions dispatched so far, no-ops included.
    pub fn actions_applied(&self) -> u64 {
        self.actions_applied
    }

    /// Applies `action` to the current state and publishes the result.
    pub fn dispatch(&mut self, action: &Action) -> Arc<EditorState> {
        let next = apply(&self.current, action);
        tracing::trace!(
            ?action,
            cursor = %next.cursor(),
            offset = to_linear_offset(&next),
            "dispatched"
        );
        self.current = Arc::new(next);
        self.actions_applied += 1;
        self.current()
    }

    /// Dispatches each action in order and returns the final state.
    pub fn dispatch_all<'a, I>(&mut self, actions: I) -> Arc<EditorState>
    where
        I: IntoIterator<Item = &'a Action>,
    {
        for action in actions {
            self.dispatch(action);
        }
        self.current()
    }
}
