//! xAI API request and response types.

use serde::{Deserialize, Serialize};

/// A chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system" or "user"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Live Search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParameters {
    /// "on", "off" or "auto"
    pub mode: String,
    /// Sources to search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SearchSource>>,
    /// Return citation URLs with the response
    pub return_citations: bool,
    /// Maximum search results to consider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_search_results: Option<u32>,
}

/// A Live Search source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSource {
    /// Source type: "web"
    #[serde(rename = "type")]
    pub source_type: String,
    /// Restrict web search to these sites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_websites: Option<Vec<String>>,
}

impl SearchParameters {
    /// Always-on web search, optionally restricted to a set of sites.
    pub fn web(allowed_websites: &[String], max_search_results: u32) -> Self {
        let allowed = if allowed_websites.is_empty() {
            None
        } else {
            Some(allowed_websites.to_vec())
        };

        Self {
            mode: "on".to_string(),
            sources: Some(vec![SearchSource {
                source_type: "web".to_string(),
                allowed_websites: allowed,
            }]),
            return_citations: true,
            max_search_results: Some(max_search_results),
        }
    }
}

/// Chat completion request to xAI API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Live Search configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_parameters: Option<SearchParameters>,
}

/// Chat completion response from xAI API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Model used
    #[serde(default)]
    pub model: String,
    /// Response choices
    pub choices: Vec<Choice>,
    /// Token usage
    pub usage: Option<Usage>,
    /// Live Search citation URLs, in consultation order
    #[serde(default)]
    pub citations: Option<Vec<String>>,
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The message
    pub message: ResponseMessage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Response message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Content (may be null)
    pub content: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error details
    pub error: ApiErrorDetails,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_search_parameters_serialization() {
        let params = SearchParameters::web(&["coursera.org".to_string()], 5);
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["mode"], "on");
        assert_eq!(json["return_citations"], true);
        assert_eq!(json["max_search_results"], 5);
        assert_eq!(json["sources"][0]["type"], "web");
        assert_eq!(json["sources"][0]["allowed_websites"][0], "coursera.org");
    }

    #[test]
    fn test_unrestricted_web_omits_allowed_websites() {
        let params = SearchParameters::web(&[], 10);
        let json = serde_json::to_value(&params).unwrap();
        assert!(json["sources"][0].get("allowed_websites").is_none());
    }

    #[test]
    fn test_response_without_citations() {
        let body = r#"{"choices":[{"message":{"content":"hi"},"finish_reason":"stop"}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert!(response.citations.is_none());
        assert_eq!(response.choices[0].message.content.as_deref(), Some("hi"));
    }
}
