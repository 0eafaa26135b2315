//! Recommendation aggregation pipeline for GrowWise.
//!
//! This crate provides the [`RecommendationAggregator`], which builds an
//! employee's learning recommendations from several content sources, and the
//! [`AgentPipeline`], which curates content and designs tutoring agents from
//! a user's question history.
//!
//! # Architecture
//!
//! ```text
//! Trigger (POST /recommendations/generate)
//!          ↓
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  RECOMMENDATION AGGREGATOR                   │
//! │                                                              │
//! │  1. Lock the employee, load profile                          │
//! │         ↓                                                    │
//! │  2. Resolve profession, or extract learning intents          │
//! │         ↓                                                    │
//! │  3. Fetch concurrently:                                      │
//! │     • article / video / course fetchers                      │
//! │     • agent suggester (profession mode)                      │
//! │         ↓                                                    │
//! │  4. Validate links and cap per type (single pass)            │
//! │         ↓                                                    │
//! │  5. Resolve thumbnails, explain the batch                    │
//! │         ↓                                                    │
//! │  6. Replace the employee's set in one transaction            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use aggregator::{AggregatorConfig, RecommendationAggregator};
//!
//! let aggregator = RecommendationAggregator::new(database, model, fetchers, validator, thumbnails)
//!     .with_config(AggregatorConfig::from_env());
//!
//! let outcome = aggregator.generate_for_profession(employee_id, None).await?;
//! println!("{} recommendations", outcome.recommendations.len());
//! ```

mod aggregator;
mod config;
mod error;
mod intent;
pub mod json;
mod locks;
mod pipeline;
mod reconcile;
mod suggester;

pub use aggregator::{GenerationOutcome, GenerationStage, RecommendationAggregator};
pub use config::{AggregatorConfig, DEFAULT_PROFESSION};
pub use error::{AggregatorError, Result};
pub use intent::{IntentExtractor, TransitionContext};
pub use locks::EmployeeLocks;
pub use pipeline::{distinct_agents, patch_urls_from_citations, AgentPipeline, CuratedItem, PipelineReport};
pub use reconcile::{reconcile, QuotaTracker, Staged};
pub use suggester::AgentSuggester;
