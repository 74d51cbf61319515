//! Error types for the matchcal ecosystem.

use thiserror::Error;

/// Errors that can occur in matchcal operations.
#[derive(Error, Debug)]
pub enum MatchCalError {
    /// An instant in a match record could not be read as a timestamp.
    #[error("Invalid timestamp '{value}': {reason}")]
    Format { value: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MatchCalError {
    pub fn format(value: impl Into<String>, reason: impl ToString) -> Self {
        MatchCalError::Format {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for matchcal operations.
pub type MatchCalResult<T> = Result<T, MatchCalError>;
