//! Error types for the War engine

use crate::game::audit::CountMismatch;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarError {
    #[error("Could not decode game token: {0}")]
    StateDecode(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Move submitted too soon: retry in {remaining_ms} ms")]
    CooldownActive { remaining_ms: u64 },

    #[error("Card conservation violated: {0}")]
    InvariantViolation(CountMismatch),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WarError {
    /// Recoverable errors leave the caller's state usable: reject the move,
    /// keep the old token (or start a fresh game after a decode failure).
    /// An invariant violation means the game state is corrupt.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, WarError::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, WarError>;
