//! Configuration for the aggregation pipeline.

use std::env;

use learning_core::Quotas;

/// Label used when an employee has no profession on record.
pub const DEFAULT_PROFESSION: &str = "General Professional";

/// Configuration for [`RecommendationAggregator`](crate::RecommendationAggregator)
/// and [`AgentPipeline`](crate::AgentPipeline).
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Per-type cap on one persisted batch.
    pub quotas: Quotas,

    /// Per-type limit for each intent's fetches.
    pub intent_limits: Quotas,

    /// Profession used when the employee has none.
    pub default_profession: String,

    /// Maximum concurrent fetches during intent fan-out.
    pub intent_workers: usize,

    /// Maximum concurrent link checks.
    pub validation_concurrency: usize,

    /// Number of recent questions the agent pipeline reads.
    pub question_history: i64,

    /// Upper bound on tutoring agents kept from one design call.
    pub max_custom_agents: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            quotas: Quotas::default(),
            intent_limits: Quotas::new(5, 3, 3),
            default_profession: DEFAULT_PROFESSION.to_string(),
            intent_workers: 6,
            validation_concurrency: 8,
            question_history: 50,
            max_custom_agents: 10,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl AggregatorConfig {
    /// Create configuration from environment variables.
    ///
    /// All variables are optional; unparseable values fall back to defaults.
    /// - `QUOTA_ARTICLE` / `QUOTA_VIDEO` / `QUOTA_COURSE` - Batch caps (default: 15 / 5 / 4)
    /// - `DEFAULT_PROFESSION` - Fallback profession (default: General Professional)
    /// - `INTENT_WORKERS` - Intent fan-out concurrency (default: 6)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let quotas = Quotas::new(
            parse_var("QUOTA_ARTICLE").unwrap_or(defaults.quotas.article),
            parse_var("QUOTA_VIDEO").unwrap_or(defaults.quotas.video),
            parse_var("QUOTA_COURSE").unwrap_or(defaults.quotas.course),
        );

        let default_profession = env::var("DEFAULT_PROFESSION")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.default_profession);

        let intent_workers = parse_var::<usize>("INTENT_WORKERS")
            .filter(|n| *n > 0)
            .unwrap_or(defaults.intent_workers);

        Self {
            quotas,
            default_profession,
            intent_workers,
            ..defaults
        }
    }

    /// Set the batch quotas.
    pub fn with_quotas(mut self, quotas: Quotas) -> Self {
        self.quotas = quotas;
        self
    }

    /// Set the per-intent fetch limits.
    pub fn with_intent_limits(mut self, limits: Quotas) -> Self {
        self.intent_limits = limits;
        self
    }

    /// Set the intent fan-out concurrency.
    pub fn with_intent_workers(mut self, workers: usize) -> Self {
        self.intent_workers = workers.max(1);
        self
    }
}
