//! Learning intent extraction from role-transition context.

use std::sync::Arc;

use learning_core::{CompletionRequest, LanguageModel, LearningIntent};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::json::parse_strict;

const INTENT_SYSTEM_PROMPT: &str = r#"You are a career learning expert.

You receive the job description of an employee's current role and of the
role they are growing into. Identify the skills they must build to make
that move and, for each one, write a search query per content type.

Respond with strict JSON only, no Markdown and no commentary:

{
  "learning_intents": [
    {
      "skill": "...",
      "priority": "high | medium | low",
      "search_queries": {
        "article": "...",
        "video": "...",
        "course": "..."
      },
      "reason": "..."
    }
  ]
}"#;

const INTENT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Deserialize)]
struct IntentResponse {
    learning_intents: Vec<LearningIntent>,
}

/// Role-transition context handed to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionContext {
    pub current_role: String,
    pub current_description: String,
    pub next_role: String,
    pub next_description: String,
}

impl TransitionContext {
    /// Render the context as the user message.
    pub fn render(&self) -> String {
        format!(
            "Current Role: {}\n{}\n\nNext Role: {}\n{}",
            self.current_role, self.current_description, self.next_role, self.next_description
        )
    }
}

/// Turns role-transition context into learning intents.
///
/// The reply must be bare JSON; anything else fails the run.
pub struct IntentExtractor {
    model: Arc<dyn LanguageModel>,
}

impl IntentExtractor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Ask the model for learning intents.
    pub async fn extract(&self, context: &TransitionContext) -> Result<Vec<LearningIntent>> {
        let request = CompletionRequest::new(context.render())
            .with_system(INTENT_SYSTEM_PROMPT)
            .with_temperature(INTENT_TEMPERATURE);

        let completion = self.model.complete(request).await?;
        debug!(model = self.model.name(), "Intent reply: {}", completion.text);

        let parsed: IntentResponse = parse_strict(&completion.text)?;
        info!(
            count = parsed.learning_intents.len(),
            "Extracted learning intents for {} -> {}",
            context.current_role,
            context.next_role
        );

        Ok(parsed.learning_intents)
    }
}
