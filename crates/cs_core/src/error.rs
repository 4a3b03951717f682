use thiserror::Error;

use crate::engine::PendingInput;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("A replacement batsman name is required")]
    MissingReplacement,

    #[error("No bowler is set for the next delivery")]
    NoActiveBowler,

    #[error("Lineup is incomplete: {0}")]
    IncompleteLineup(String),

    #[error("Awaiting follow-up input: {0}")]
    AwaitingInput(PendingInput),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Match is already complete")]
    MatchComplete,
}

impl ScoringError {
    /// Every scoring error leaves core state untouched; the caller is
    /// expected to re-prompt and retry.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
