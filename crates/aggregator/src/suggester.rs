//! Tutoring-agent suggestions and batch summaries.

use std::sync::Arc;

use learning_core::{AgentSuggestion, CandidateItem, CompletionRequest, LanguageModel};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AggregatorError, Result};
use crate::json::parse_with_fence_fallback;

const SUGGEST_SYSTEM_PROMPT: &str = r#"You are an AI agent architect for a workplace learning platform.

Propose specialized learning assistants for the given profession. Each
assistant covers one skill area that does not overlap with the others.
Its system prompt must keep it strictly on that topic and make it
politely refuse anything else.

Return ONLY a JSON array:
[
  {"specialization": "...", "name": "...", "system_prompt": "..."}
]"#;

const DESIGN_SYSTEM_PROMPT: &str = r#"You are an AI agent architect for a workplace learning platform.

From the user's profession and the questions they have asked, design
between 5 and 10 mutually exclusive learning assistants. Each one is
restricted to a single specialization; its system prompt must define the
scope precisely and instruct it to refuse, briefly and politely, any
question outside that scope.

Return ONLY a JSON array:
[
  {"specialization": "...", "name": "...", "system_prompt": "..."}
]"#;

const SUMMARY_SYSTEM_PROMPT: &str = r#"You write one-sentence explanations for learning recommendations.

Given a profession and the resources selected for it, explain in a single
sentence why this set helps someone in that profession grow.

Return ONLY JSON: {"summary": "..."}"#;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SuggestionReply {
    List(Vec<AgentSuggestion>),
    Wrapped { agents: Vec<AgentSuggestion> },
}

impl SuggestionReply {
    fn into_agents(self) -> Vec<AgentSuggestion> {
        match self {
            SuggestionReply::List(agents) | SuggestionReply::Wrapped { agents } => agents,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryReply {
    summary: String,
}

/// Language-model calls that propose tutoring agents and explain batches.
///
/// Replies are parsed as JSON with one retry after removing code fences.
pub struct AgentSuggester {
    model: Arc<dyn LanguageModel>,
}

impl AgentSuggester {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Suggest tutoring agents for a profession.
    pub async fn suggest(&self, profession: &str) -> Result<Vec<AgentSuggestion>> {
        let request = CompletionRequest::new(format!("Profession: {}", profession))
            .with_system(SUGGEST_SYSTEM_PROMPT)
            .with_temperature(0.7);

        self.request_agents(request).await
    }

    /// Design tutoring agents from a user's question history.
    pub async fn design_from_questions(
        &self,
        profession: &str,
        questions: &[String],
    ) -> Result<Vec<AgentSuggestion>> {
        let history = questions
            .iter()
            .map(|q| format!("- {}", q))
            .collect::<Vec<_>>()
            .join("\n");

        let request = CompletionRequest::new(format!(
            "Profession: {}\n\nQuestions asked so far:\n{}",
            profession, history
        ))
        .with_system(DESIGN_SYSTEM_PROMPT)
        .with_temperature(0.7);

        self.request_agents(request).await
    }

    /// One sentence explaining why a batch suits the profession.
    pub async fn summarize(&self, items: &[CandidateItem], profession: &str) -> Result<String> {
        let listing = items
            .iter()
            .map(|item| format!("- [{}] {}", item.content_type, item.title))
            .collect::<Vec<_>>()
            .join("\n");

        let request = CompletionRequest::new(format!(
            "Profession: {}\n\nSelected resources:\n{}",
            profession, listing
        ))
        .with_system(SUMMARY_SYSTEM_PROMPT)
        .with_temperature(0.5);

        let completion = self.model.complete(request).await?;
        let reply: SummaryReply = parse_with_fence_fallback(&completion.text)?;

        let summary = reply.summary.trim();
        if summary.is_empty() {
            return Err(AggregatorError::parse("empty summary", completion.text));
        }
        Ok(summary.to_string())
    }

    async fn request_agents(&self, request: CompletionRequest) -> Result<Vec<AgentSuggestion>> {
        let completion = self.model.complete(request).await?;
        debug!(model = self.model.name(), "Agent suggestion reply: {}", completion.text);

        let reply: SuggestionReply = parse_with_fence_fallback(&completion.text)?;
        Ok(reply
            .into_agents()
            .into_iter()
            .filter(|agent| !agent.name.trim().is_empty() && !agent.system_prompt.trim().is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learning_core::{async_trait, Completion, ContentType, LlmError};

    struct Fixed(&'static str);

    #[async_trait]
    impl LanguageModel for Fixed {
        async fn complete(&self, _request: CompletionRequest) -> std::result::Result<Completion, LlmError> {
            Ok(Completion::text(self.0))
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    fn suggester(reply: &'static str) -> AgentSuggester {
        AgentSuggester::new(Arc::new(Fixed(reply)))
    }

    #[tokio::test]
    async fn test_suggest_bare_array() {
        let reply = r#"[{"specialization": "SQL", "name": "SQL Tutor", "system_prompt": "Only SQL."}]"#;
        let agents = suggester(reply).suggest("Data Analyst").await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].name, "SQL Tutor");
    }

    #[tokio::test]
    async fn test_suggest_fenced_and_wrapped() {
        let reply = "```json\n{\"agents\": [{\"name\": \"Excel Coach\", \"system_prompt\": \"Only Excel.\"}]}\n```";
        let agents = suggester(reply).suggest("Accountant").await.unwrap();
        assert_eq!(agents[0].specialization_key(), "excel coach");
    }

    #[tokio::test]
    async fn test_suggest_drops_incomplete_agents() {
        let reply = r#"[{"name": "", "system_prompt": "x"}, {"name": "Git Guide", "system_prompt": "Only git."}]"#;
        let agents = suggester(reply).suggest("Engineer").await.unwrap();
        assert_eq!(agents.len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_keeps_raw() {
        let err = suggester("Sorry, I can't do that.").suggest("Engineer").await.unwrap_err();
        match err {
            AggregatorError::Parse { raw, .. } => assert_eq!(raw, "Sorry, I can't do that."),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_summarize() {
        let items = vec![CandidateItem::new("SQL basics", "https://a.dev", "a.dev", ContentType::Course)];

        let summary = suggester(r#"{"summary": " Builds query fluency. "}"#)
            .summarize(&items, "Data Analyst")
            .await
            .unwrap();
        assert_eq!(summary, "Builds query fluency.");

        assert!(suggester(r#"{"summary": ""}"#)
            .summarize(&items, "Data Analyst")
            .await
            .is_err());
    }
}
