//! xAI Grok completion client.
//!
//! This crate provides a [`LanguageModel`] implementation that uses the xAI
//! Grok API, with optional Live Search grounding whose citation URLs are
//! returned as structured metadata.
//!
//! # Usage
//!
//! ```rust,no_run
//! use grok_client::{CompletionRequest, GrokClient, Grounding, LanguageModel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GrokClient::from_env()?;
//!     let completion = client
//!         .complete(
//!             CompletionRequest::new("Find beginner SQL courses")
//!                 .with_grounding(Grounding::restricted_to(["coursera.org"])),
//!         )
//!         .await?;
//!     for citation in completion.citations {
//!         println!("{}", citation.url);
//!     }
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;

pub use client::GrokClient;
pub use config::{GrokConfig, GrokConfigBuilder};

// Re-export learning-core types for convenience
pub use learning_core::{
    async_trait, Citation, Completion, CompletionRequest, Grounding, LanguageModel, LlmError,
};
