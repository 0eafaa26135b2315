//! Language model contract.
//!
//! Grounded completions return citation metadata next to the generated text.
//! Citations are the authoritative source of URLs; the text is only a fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Web-search grounding options for a completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grounding {
    /// Restrict search to these sites (empty means unrestricted).
    pub allowed_domains: Vec<String>,
    /// Upper bound on search results the provider should consult.
    pub max_results: Option<u32>,
}

impl Grounding {
    /// Unrestricted web grounding.
    pub fn web() -> Self {
        Self::default()
    }

    /// Grounding restricted to a set of sites.
    pub fn restricted_to<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_domains: domains.into_iter().map(Into::into).collect(),
            max_results: None,
        }
    }
}

/// A completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Optional system instruction.
    pub system: Option<String>,
    /// User prompt.
    pub prompt: String,
    /// Sampling temperature override.
    pub temperature: Option<f32>,
    /// Enable web-search grounding.
    pub grounding: Option<Grounding>,
}

impl CompletionRequest {
    /// Create a plain prompt request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Enable web-search grounding.
    pub fn with_grounding(mut self, grounding: Grounding) -> Self {
        self.grounding = Some(grounding);
        self
    }
}

/// A source the provider consulted while grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    pub title: Option<String>,
}

impl Citation {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A completion result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text.
    pub text: String,
    /// Grounding citations, in provider order.
    pub citations: Vec<Citation>,
}

impl Completion {
    /// A text-only completion.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }

    /// Attach citations.
    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }
}

/// A text completion service.
///
/// Implementations must be cheap to share (`Arc<dyn LanguageModel>`) and safe
/// to call concurrently from several pipeline tasks.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, LlmError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}
