//! Error types for rr-game
//!
//! Only the session layer fails hard; scoring itself always yields a value.

use thiserror::Error;
use uuid::Uuid;

/// Result type for game service operations
pub type GameResult<T> = std::result::Result<T, GameError>;

/// Game service error type
#[derive(Debug, Error)]
pub enum GameError {
    /// No active session with this id
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    /// Invalid request parameter
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// rr-common error
    #[error("Common error: {0}")]
    Common(#[from] rr_common::Error),
}
