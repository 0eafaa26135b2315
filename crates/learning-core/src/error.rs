//! Error types for upstream calls.

use thiserror::Error;

/// Errors raised by a [`LanguageModel`](crate::LanguageModel).
#[derive(Debug, Error)]
pub enum LlmError {
    /// Client misconfiguration (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success response from the provider.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered but the payload was unusable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors raised inside a [`ContentFetcher`](crate::ContentFetcher).
///
/// These never escape [`ContentFetcher::search`](crate::ContentFetcher::search);
/// they are logged and the fetch degrades to an empty result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Language model call failed.
    #[error("model error: {0}")]
    Model(#[from] LlmError),

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success response from a search API.
    #[error("search API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Fetcher misconfiguration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
