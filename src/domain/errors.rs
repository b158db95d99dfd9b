// Domain-level errors for session and persistence workflows.

use crate::domain::game_state::GameState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The action is not allowed from the current game state.
    InvalidTransition { from: GameState, action: &'static str },
    /// The mission board does not offer this distance.
    UnknownRoute(u32),
}

#[derive(Debug)]
pub enum StoreError {
    /// Backend could not be reached or timed out.
    Unavailable,
    /// Backend answered with a non-success status.
    Rejected(u16),
    /// Payload could not be encoded or decoded.
    Malformed,
    /// Local file access failed.
    Io(std::io::Error),
}
