//! Error types for aggregation runs.

use database::DatabaseError;
use learning_core::LlmError;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Fetcher, validator, thumbnail and suggester failures never show up here;
/// they degrade to empty results inside the run.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// Language model call failed on a path with no fallback.
    #[error("model error: {0}")]
    Llm(#[from] LlmError),

    /// Model output could not be parsed.
    #[error("could not parse model output: {message}")]
    Parse { message: String, raw: String },

    /// Reading or writing recommendations failed.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// A request lacked something the run needs.
    #[error("{0}")]
    InvalidInput(String),

    /// A concurrent task panicked or was cancelled.
    #[error("task failed: {0}")]
    Join(String),
}

impl AggregatorError {
    pub(crate) fn parse(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            raw: raw.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
