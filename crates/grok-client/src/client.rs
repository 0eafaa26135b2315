//! GrokClient implementation using xAI API.

use std::time::Duration;

use learning_core::{
    async_trait, Citation, Completion, CompletionRequest, LanguageModel, LlmError,
};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, SearchParameters,
};
use crate::config::GrokConfig;

/// A [`LanguageModel`] backed by xAI's chat completions API.
///
/// Grounded requests turn on Live Search and surface the returned citation
/// URLs as [`Citation`]s.
pub struct GrokClient {
    client: Client,
    config: GrokConfig,
}

impl GrokClient {
    /// Create a new GrokClient with the given configuration.
    pub fn new(config: GrokConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!("GrokClient initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a GrokClient from environment variables.
    ///
    /// See [`GrokConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(GrokConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GrokConfig {
        &self.config
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(ref system) = request.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(request.prompt.clone()));

        let search_parameters = request.grounding.as_ref().map(|grounding| {
            let max_results = grounding
                .max_results
                .unwrap_or(self.config.max_search_results);
            SearchParameters::web(&grounding.allowed_domains, max_results)
        });

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: request.temperature.or(self.config.temperature),
            search_parameters,
        }
    }

    /// Make a chat completion request to the xAI API.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url.trim_end_matches('/'));

        debug!(
            model = %request.model,
            grounded = request.search_parameters.is_some(),
            "Sending request to xAI API"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.message,
                Err(_) => error_text,
            };

            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LanguageModel for GrokClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LlmError> {
        let completion = self.chat_completion(self.build_request(&request)).await?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let text = completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))?;

        let citations = completion
            .citations
            .unwrap_or_default()
            .into_iter()
            .map(Citation::new)
            .collect();

        Ok(Completion { text, citations })
    }

    fn name(&self) -> &str {
        "GrokClient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learning_core::Grounding;

    fn client() -> GrokClient {
        GrokClient::new(GrokConfig::builder().api_key("test-key").build()).unwrap()
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            GrokClient::new(GrokConfig::default()),
            Err(LlmError::Configuration(_))
        ));
    }

    #[test]
    fn test_build_request_plain() {
        let request = client().build_request(&CompletionRequest::new("hello").with_system("be brief"));

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.temperature, Some(0.7));
        assert!(request.search_parameters.is_none());
    }

    #[test]
    fn test_build_request_grounded() {
        let request = client().build_request(
            &CompletionRequest::new("courses")
                .with_temperature(0.2)
                .with_grounding(Grounding::restricted_to(["udemy.com"])),
        );

        assert_eq!(request.temperature, Some(0.2));
        let params = request.search_parameters.unwrap();
        assert_eq!(params.max_search_results, Some(10));
        let sources = params.sources.unwrap();
        assert_eq!(sources[0].allowed_websites.as_ref().unwrap()[0], "udemy.com");
    }
}
