//! Specialized agent pipeline.
//!
//! Four independent tasks run per user: three curation agents (videos,
//! articles, courses), each a single grounded model call that saves its own
//! rows, and a designer that turns the user's question history into
//! tutoring-agent definitions.

use std::collections::HashSet;
use std::sync::Arc;

use content_sources::urls::{is_video_url, source_from_url};
use database::{agent_content, employee, question, Database, NewContentRecommendation};
use learning_core::{AgentSuggestion, Citation, CompletionRequest, ContentType, Grounding, LanguageModel};
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::config::AggregatorConfig;
use crate::error::{AggregatorError, Result};
use crate::json::parse_with_fence_fallback;
use crate::suggester::AgentSuggester;

/// Most items one curation agent may save.
const MAX_CURATED_ITEMS: usize = 10;

/// Rows written by each task of one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub video_recommendations: usize,
    pub article_recommendations: usize,
    pub course_recommendations: usize,
    pub custom_agent_recommendations: usize,
}

/// One item as returned by a curation agent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CuratedItem {
    #[serde(default, alias = "skill")]
    pub topic: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub source: String,
}

/// Replace unverified URLs with the grounding citation at the same position.
///
/// Items whose URL is already among the citations keep it. Without any
/// citations the items are returned unchanged.
pub fn patch_urls_from_citations(mut items: Vec<CuratedItem>, citations: &[Citation]) -> Vec<CuratedItem> {
    if citations.is_empty() {
        return items;
    }
    let cited: HashSet<&str> = citations.iter().map(|c| c.url.as_str()).collect();

    for (i, item) in items.iter_mut().enumerate() {
        if cited.contains(item.url.as_str()) {
            continue;
        }
        match citations.get(i) {
            Some(citation) => {
                debug!(from = %item.url, to = %citation.url, "Patching curated URL");
                item.url = citation.url.clone();
                if let Some(title) = citation.title.as_ref().filter(|t| !t.trim().is_empty()) {
                    item.source = title.clone();
                }
            }
            None => warn!(title = %item.title, "No verified URL for curated item"),
        }
    }

    items
}

fn curation_system_prompt(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Video => {
            "You are an expert learning curator selecting high-quality YouTube videos. \
             Only recommend videos hosted on YouTube."
        }
        ContentType::Article => {
            "You are a senior researcher curating high-quality articles: official \
             documentation, engineering blogs and whitepapers. No videos or courses."
        }
        ContentType::Course => {
            "You are a professional learning advisor curating structured online courses \
             from platforms such as Coursera, Udemy and edX. No articles or videos."
        }
    }
}

fn curation_prompt(content_type: ContentType, profession: &str, questions: &[String]) -> String {
    let history = if questions.is_empty() {
        "No previous questions asked.".to_string()
    } else {
        questions
            .iter()
            .map(|q| format!("- {}", q))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"Profession: {profession}

Previous questions:
{history}

Infer this person's current learning goals and skill gaps, then use web
search to find up to {max} {kind}s matched to their level.

Copy every URL exactly as it appears in the search results. Never build or
guess a URL; drop an item rather than invent its link.

Return ONLY a JSON array:
[
  {{"topic": "...", "title": "...", "description": "...", "url": "https://...", "source": "..."}}
]"#,
        profession = profession,
        history = history,
        max = MAX_CURATED_ITEMS,
        kind = content_type,
    )
}

async fn curate(
    model: Arc<dyn LanguageModel>,
    content_type: ContentType,
    profession: &str,
    questions: &[String],
) -> Result<Vec<NewContentRecommendation>> {
    let request = CompletionRequest::new(curation_prompt(content_type, profession, questions))
        .with_system(curation_system_prompt(content_type))
        .with_grounding(Grounding::web());

    let completion = model.complete(request).await?;
    let items: Vec<CuratedItem> = parse_with_fence_fallback(&completion.text)?;
    let items = patch_urls_from_citations(items, &completion.citations);

    let mut seen = HashSet::new();
    Ok(items
        .into_iter()
        .filter(|item| item.url.starts_with("http://") || item.url.starts_with("https://"))
        .filter(|item| content_type != ContentType::Video || is_video_url(&item.url))
        .filter(|item| seen.insert(item.url.clone()))
        .take(MAX_CURATED_ITEMS)
        .map(|item| {
            let source = if !item.source.trim().is_empty() {
                item.source
            } else if content_type == ContentType::Video {
                "YouTube".to_string()
            } else {
                source_from_url(&item.url)
            };
            NewContentRecommendation {
                content_type: content_type.as_str().to_string(),
                skill: item.topic,
                title: item.title,
                description: item.description,
                url: item.url,
                source,
            }
        })
        .collect())
}

/// Keep the first agent per specialization, at most `max`.
pub fn distinct_agents(agents: Vec<AgentSuggestion>, max: usize) -> Vec<AgentSuggestion> {
    let mut seen = HashSet::new();
    agents
        .into_iter()
        .filter(|agent| seen.insert(agent.specialization_key()))
        .take(max)
        .collect()
}

fn joined(result: std::result::Result<usize, JoinError>) -> Result<usize> {
    result.map_err(|e| AggregatorError::Join(e.to_string()))
}

/// Runs the curation agents and the agent designer for one user.
pub struct AgentPipeline {
    database: Database,
    model: Arc<dyn LanguageModel>,
    suggester: Arc<AgentSuggester>,
    config: AggregatorConfig,
}

impl AgentPipeline {
    pub fn new(database: Database, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            database,
            suggester: Arc::new(AgentSuggester::new(model.clone())),
            model,
            config: AggregatorConfig::default(),
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Run all four tasks concurrently and report what each saved.
    ///
    /// A task that fails internally reports zero without affecting the
    /// others. A task that panics fails the whole run.
    pub async fn run(&self, employee_id: i64, profession: &str) -> Result<PipelineReport> {
        let profession = profession.trim();
        if profession.is_empty() {
            return Err(AggregatorError::InvalidInput("Profession is required.".to_string()));
        }

        let pool = self.database.pool();
        employee::get_employee(pool, employee_id).await?;

        let questions: Vec<String> = question::recent_questions(pool, employee_id, self.config.question_history)
            .await?
            .into_iter()
            .map(|q| q.content)
            .collect();
        if questions.is_empty() {
            return Err(AggregatorError::InvalidInput(
                "No questions found for analysis.".to_string(),
            ));
        }

        info!(employee_id, questions = questions.len(), "Running agent pipeline");
        let questions = Arc::new(questions);
        let profession = Arc::new(profession.to_string());

        let video = self.spawn_curator(employee_id, ContentType::Video, &profession, &questions);
        let article = self.spawn_curator(employee_id, ContentType::Article, &profession, &questions);
        let course = self.spawn_curator(employee_id, ContentType::Course, &profession, &questions);
        let designer = self.spawn_designer(employee_id, &profession, &questions);

        let (video, article, course, designer) = tokio::join!(video, article, course, designer);

        let report = PipelineReport {
            video_recommendations: joined(video)?,
            article_recommendations: joined(article)?,
            course_recommendations: joined(course)?,
            custom_agent_recommendations: joined(designer)?,
        };
        info!(employee_id, ?report, "Agent pipeline finished");
        Ok(report)
    }

    fn spawn_curator(
        &self,
        employee_id: i64,
        content_type: ContentType,
        profession: &Arc<String>,
        questions: &Arc<Vec<String>>,
    ) -> tokio::task::JoinHandle<usize> {
        let database = self.database.clone();
        let model = self.model.clone();
        let profession = profession.clone();
        let questions = questions.clone();

        tokio::spawn(async move {
            let items = match curate(model, content_type, &profession, &questions).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(employee_id, "{} agent failed: {}", content_type, e);
                    return 0;
                }
            };

            match agent_content::insert_content(database.pool(), employee_id, &items).await {
                Ok(written) => written as usize,
                Err(e) => {
                    warn!(employee_id, "Saving {} recommendations failed: {}", content_type, e);
                    0
                }
            }
        })
    }

    fn spawn_designer(
        &self,
        employee_id: i64,
        profession: &Arc<String>,
        questions: &Arc<Vec<String>>,
    ) -> tokio::task::JoinHandle<usize> {
        let database = self.database.clone();
        let suggester = self.suggester.clone();
        let profession = profession.clone();
        let questions = questions.clone();
        let max = self.config.max_custom_agents;

        tokio::spawn(async move {
            let agents = match suggester.design_from_questions(&profession, &questions).await {
                Ok(agents) => distinct_agents(agents, max),
                Err(e) => {
                    warn!(employee_id, "Agent designer failed: {}", e);
                    return 0;
                }
            };

            let mut saved = 0;
            for agent in &agents {
                let specialization = if agent.specialization.trim().is_empty() {
                    agent.name.trim()
                } else {
                    agent.specialization.trim()
                };
                match agent_content::upsert_agent(
                    database.pool(),
                    employee_id,
                    specialization,
                    agent.name.trim(),
                    agent.system_prompt.trim(),
                )
                .await
                {
                    Ok(()) => saved += 1,
                    Err(e) => warn!(employee_id, agent = %agent.name, "Saving agent failed: {}", e),
                }
            }
            saved
        })
    }
}
