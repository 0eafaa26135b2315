//! The recommendation aggregator.

use std::fmt;
use std::sync::Arc;

use database::{employee, organization, recommendation, Database, NewRecommendation, Recommendation};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use learning_core::{
    AgentSuggestion, CandidateItem, ContentType, FetcherSet, LanguageModel, ThumbnailResolver,
    UrlValidator,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::intent::{IntentExtractor, TransitionContext};
use crate::locks::EmployeeLocks;
use crate::reconcile::{reconcile, Staged};
use crate::suggester::AgentSuggester;

/// Steps of one generation run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Start,
    ContextBuilt,
    Resolved,
    Fetching,
    Validating,
    Enriching,
    Summarizing,
    Persisting,
    Done,
}

impl GenerationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStage::Start => "start",
            GenerationStage::ContextBuilt => "context_built",
            GenerationStage::Resolved => "intents_or_profession_resolved",
            GenerationStage::Fetching => "fetching",
            GenerationStage::Validating => "validating",
            GenerationStage::Enriching => "enriching",
            GenerationStage::Summarizing => "summarizing",
            GenerationStage::Persisting => "persisting",
            GenerationStage::Done => "done",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn enter(employee_id: i64, stage: GenerationStage) {
    debug!(employee_id, stage = %stage, "Generation stage");
}

/// Result of a generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutcome {
    /// The employee's new recommendation set, as persisted.
    pub recommendations: Vec<Recommendation>,
    /// Tutoring agents proposed alongside, not persisted.
    pub suggested_agents: Vec<AgentSuggestion>,
}

impl GenerationOutcome {
    /// Outcome of a run that stopped on a missing prerequisite.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Builds and persists an employee's recommendation set.
///
/// Two modes share the same validate, cap, enrich and persist tail:
///
/// - [`generate_for_profession`](Self::generate_for_profession) queries
///   every fetcher with the profession and explains the batch with one
///   model-written sentence.
/// - [`generate_for_career_path`](Self::generate_for_career_path) extracts
///   learning intents from the employee's next career step and fans out
///   one fetch per intent and content type.
///
/// Runs for the same employee are serialized.
pub struct RecommendationAggregator {
    database: Database,
    fetchers: FetcherSet,
    validator: Arc<dyn UrlValidator>,
    thumbnails: Arc<dyn ThumbnailResolver>,
    intents: IntentExtractor,
    suggester: AgentSuggester,
    config: AggregatorConfig,
    locks: EmployeeLocks,
}

impl RecommendationAggregator {
    pub fn new(
        database: Database,
        model: Arc<dyn LanguageModel>,
        fetchers: FetcherSet,
        validator: Arc<dyn UrlValidator>,
        thumbnails: Arc<dyn ThumbnailResolver>,
    ) -> Self {
        Self {
            database,
            fetchers,
            validator,
            thumbnails,
            intents: IntentExtractor::new(model.clone()),
            suggester: AgentSuggester::new(model),
            config: AggregatorConfig::default(),
            locks: EmployeeLocks::new(),
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Generate recommendations from the employee's profession.
    ///
    /// `profession` overrides the one on record; with neither, the
    /// configured default label is used.
    pub async fn generate_for_profession(
        &self,
        employee_id: i64,
        profession: Option<&str>,
    ) -> Result<GenerationOutcome> {
        let _guard = self.locks.acquire(employee_id).await;
        enter(employee_id, GenerationStage::Start);

        let employee = employee::get_employee(self.database.pool(), employee_id).await?;
        enter(employee_id, GenerationStage::ContextBuilt);

        let profession = profession
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .or_else(|| employee.profession.filter(|p| !p.trim().is_empty()))
            .unwrap_or_else(|| self.config.default_profession.clone());
        enter(employee_id, GenerationStage::Resolved);
        info!(employee_id, profession = %profession, "Generating recommendations");

        enter(employee_id, GenerationStage::Fetching);
        let quotas = self.config.quotas;
        let (articles, videos, courses, suggestions) = tokio::join!(
            self.fetchers.article.search(&profession, quotas.article),
            self.fetchers.video.search(&profession, quotas.video),
            self.fetchers.course.search(&profession, quotas.course),
            self.suggester.suggest(&profession),
        );

        let suggested_agents = suggestions.unwrap_or_else(|e| {
            warn!(employee_id, "Agent suggestion failed: {}", e);
            Vec::new()
        });

        let candidates = articles
            .into_iter()
            .chain(videos)
            .chain(courses)
            .map(|item| Staged::new(item, ""))
            .collect();

        let mut staged = self.validate_and_cap(employee_id, candidates).await;

        if !staged.is_empty() {
            enter(employee_id, GenerationStage::Summarizing);
            let items: Vec<CandidateItem> = staged.iter().map(|s| s.item.clone()).collect();
            let reason = match self.suggester.summarize(&items, &profession).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!(employee_id, "Summary failed, using generic reason: {}", e);
                    format!("Recommended for {} professionals.", profession)
                }
            };
            for entry in &mut staged {
                entry.reason = reason.clone();
            }
        }

        let recommendations = self.enrich_and_persist(employee_id, staged).await?;

        Ok(GenerationOutcome {
            recommendations,
            suggested_agents,
        })
    }

    /// Generate recommendations for the employee's next career step.
    ///
    /// Returns an empty outcome, without calling any fetcher or touching
    /// the stored set, when the employee has no designation, the designation
    /// has no career path, or either role lacks an active job description.
    pub async fn generate_for_career_path(&self, employee_id: i64) -> Result<GenerationOutcome> {
        let _guard = self.locks.acquire(employee_id).await;
        enter(employee_id, GenerationStage::Start);
        let pool = self.database.pool();

        let employee = employee::get_employee(pool, employee_id).await?;
        let Some(designation_id) = employee.designation_id else {
            info!(employee_id, "No designation on record, nothing to generate");
            return Ok(GenerationOutcome::empty());
        };

        let Some(path) = organization::career_path_from(pool, designation_id).await? else {
            info!(employee_id, designation_id, "No career path configured, nothing to generate");
            return Ok(GenerationOutcome::empty());
        };

        let current = organization::latest_active_job_description(pool, path.from_designation_id).await?;
        let next = organization::latest_active_job_description(pool, path.to_designation_id).await?;
        let (Some(current), Some(next)) = (current, next) else {
            info!(
                employee_id,
                "Missing active job description for {} -> {}, nothing to generate",
                path.from_designation,
                path.to_designation
            );
            return Ok(GenerationOutcome::empty());
        };

        let context = TransitionContext {
            current_role: path.from_designation,
            current_description: current.job_description,
            next_role: path.to_designation,
            next_description: next.job_description,
        };
        enter(employee_id, GenerationStage::ContextBuilt);

        let intents = self.intents.extract(&context).await?;
        enter(employee_id, GenerationStage::Resolved);

        enter(employee_id, GenerationStage::Fetching);
        let limits = self.config.intent_limits;
        let jobs: Vec<(usize, ContentType)> = (0..intents.len())
            .flat_map(|i| ContentType::ALL.into_iter().map(move |ct| (i, ct)))
            .collect();

        let fetched: Vec<(usize, Vec<CandidateItem>)> = stream::iter(jobs)
            .map(|(i, content_type)| {
                let fetcher = self.fetchers.for_type(content_type).clone();
                let query = intents[i].search_queries.for_type(content_type).to_string();
                async move {
                    let items = fetcher.search(&query, limits.for_type(content_type)).await;
                    (i, items)
                }
            })
            .buffered(self.config.intent_workers.max(1))
            .collect()
            .await;

        let candidates = fetched
            .into_iter()
            .flat_map(|(i, items)| {
                let reason = intents[i].reason.clone();
                items.into_iter().map(move |item| Staged::new(item, reason.clone()))
            })
            .collect();

        let staged = self.validate_and_cap(employee_id, candidates).await;
        let recommendations = self.enrich_and_persist(employee_id, staged).await?;

        Ok(GenerationOutcome {
            recommendations,
            suggested_agents: Vec::new(),
        })
    }

    async fn validate_and_cap(&self, employee_id: i64, candidates: Vec<Staged>) -> Vec<Staged> {
        enter(employee_id, GenerationStage::Validating);
        let total = candidates.len();

        let staged = reconcile(
            candidates,
            self.config.quotas,
            self.validator.as_ref(),
            self.config.validation_concurrency,
        )
        .await;

        debug!(employee_id, total, kept = staged.len(), "Validated candidates");
        staged
    }

    async fn enrich_and_persist(
        &self,
        employee_id: i64,
        staged: Vec<Staged>,
    ) -> Result<Vec<Recommendation>> {
        enter(employee_id, GenerationStage::Enriching);
        // Video thumbnails are always rebuilt from the video id
        let thumbnails = join_all(staged.iter().map(|entry| async move {
            match &entry.item.thumbnail_url {
                Some(existing) if entry.item.content_type != ContentType::Video => Some(existing.clone()),
                _ => {
                    self.thumbnails
                        .resolve(&entry.item.url, entry.item.content_type)
                        .await
                }
            }
        }))
        .await;

        let batch: Vec<NewRecommendation> = staged
            .into_iter()
            .zip(thumbnails)
            .map(|(entry, thumbnail_url)| NewRecommendation {
                title: entry.item.title,
                url: entry.item.url,
                thumbnail_url,
                content_type: entry.item.content_type.as_str().to_string(),
                reason: entry.reason,
            })
            .collect();

        enter(employee_id, GenerationStage::Persisting);
        let saved = recommendation::replace_for_employee(self.database.pool(), employee_id, &batch).await?;

        enter(employee_id, GenerationStage::Done);
        info!(employee_id, count = saved.len(), "Persisted recommendation set");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(GenerationStage::Resolved.to_string(), "intents_or_profession_resolved");
        assert_eq!(GenerationStage::Done.as_str(), "done");
    }

    #[test]
    fn test_empty_outcome_serializes() {
        let json = serde_json::to_value(GenerationOutcome::empty()).unwrap();
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 0);
        assert_eq!(json["suggested_agents"].as_array().unwrap().len(), 0);
    }
}
