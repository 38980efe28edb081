use thiserror::Error;

/// Result type for ranking operations.
pub type Result<T> = std::result::Result<T, RankingError>;

/// Input rejected before any ranking work is done.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    /// A score has no defined order (NaN).
    #[error("invalid input for participant \"{id}\": {reason}")]
    InvalidInput { id: String, reason: String },

    /// The same identifier appears more than once in one ranking run.
    #[error("duplicate participant id: \"{0}\"")]
    DuplicateParticipant(String),
}

impl RankingError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RankingError::InvalidInput { .. })
    }
}
