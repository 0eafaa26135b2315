//! Language model with canned replies.

use std::sync::Mutex;

use async_trait::async_trait;
use learning_core::{Completion, CompletionRequest, LanguageModel, LlmError};

#[derive(Debug, Clone)]
enum Reply {
    Complete(Completion),
    Fail(String),
}

/// A language model that answers from a script.
///
/// Each rule matches when its needle occurs in the request's prompt or
/// system message; the first match wins. Unmatched requests fail.
///
/// # Example
///
/// ```rust
/// use mock_sources::ScriptedModel;
///
/// let model = ScriptedModel::new()
///     .reply("learning_intents", r#"{"learning_intents": []}"#)
///     .fail("summary", "model overloaded");
/// ```
#[derive(Debug, Default)]
pub struct ScriptedModel {
    rules: Vec<(String, Reply)>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer matching requests with plain text.
    pub fn reply(self, needle: impl Into<String>, text: impl Into<String>) -> Self {
        self.reply_with(needle, Completion::text(text))
    }

    /// Answer matching requests with a full completion, citations included.
    pub fn reply_with(mut self, needle: impl Into<String>, completion: Completion) -> Self {
        self.rules.push((needle.into(), Reply::Complete(completion)));
        self
    }

    /// Fail matching requests with a network error.
    pub fn fail(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Reply::Fail(message.into())));
        self
    }

    /// Requests received, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of requests whose prompt or system message contains `needle`.
    pub fn calls_matching(&self, needle: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| mentions(request, needle))
            .count()
    }
}

fn mentions(request: &CompletionRequest, needle: &str) -> bool {
    request.prompt.contains(needle)
        || request
            .system
            .as_deref()
            .is_some_and(|system| system.contains(needle))
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LlmError> {
        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| mentions(&request, needle))
            .map(|(_, reply)| reply.clone());

        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        match reply {
            Some(Reply::Complete(completion)) => Ok(completion),
            Some(Reply::Fail(message)) => Err(LlmError::Network(message)),
            None => Err(LlmError::InvalidResponse("no scripted reply".to_string())),
        }
    }

    fn name(&self) -> &str {
        "ScriptedModel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learning_core::Citation;

    #[tokio::test]
    async fn test_first_matching_rule_wins() {
        let model = ScriptedModel::new()
            .reply("videos", "first")
            .reply("videos", "second");

        let completion = model
            .complete(CompletionRequest::new("find videos"))
            .await
            .unwrap();
        assert_eq!(completion.text, "first");
        assert_eq!(model.calls_matching("videos"), 1);
    }

    #[tokio::test]
    async fn test_matches_system_message_and_citations() {
        let completion = Completion::text("see sources")
            .with_citations(vec![Citation::new("https://example.com/a")]);
        let model = ScriptedModel::new().reply_with("curator", completion);

        let request = CompletionRequest::new("Data Analyst").with_system("You are a curator.");
        let completion = model.complete(request).await.unwrap();
        assert_eq!(completion.citations.len(), 1);
    }

    #[tokio::test]
    async fn test_failures_and_unmatched() {
        let model = ScriptedModel::new().fail("summary", "overloaded");

        let err = model.complete(CompletionRequest::new("write a summary")).await;
        assert!(matches!(err, Err(LlmError::Network(_))));

        let err = model.complete(CompletionRequest::new("anything else")).await;
        assert!(matches!(err, Err(LlmError::InvalidResponse(_))));
        assert_eq!(model.requests().len(), 2);
    }
}
