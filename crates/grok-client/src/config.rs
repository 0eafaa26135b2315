//! Configuration for GrokClient.

use learning_core::LlmError;
use std::env;

/// Configuration for GrokClient.
#[derive(Debug, Clone)]
pub struct GrokConfig {
    /// xAI API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Default temperature (0.0 - 2.0), used when a request sets none.
    pub temperature: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Upper bound on search results for grounded requests.
    pub max_search_results: u32,
}

impl Default for GrokConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.x.ai".to_string(),
            api_key: String::new(),
            model: "grok-4-1-fast".to_string(),
            max_tokens: Some(2048),
            temperature: Some(0.7),
            timeout_secs: 60,
            max_search_results: 10,
        }
    }
}

impl GrokConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GROK_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GROK_API_URL` - API URL (default: https://api.x.ai)
    /// - `GROK_MODEL` - Model name (default: grok-4-1-fast)
    /// - `GROK_MAX_TOKENS` - Max tokens (default: 2048)
    /// - `GROK_TEMPERATURE` - Temperature (default: 0.7)
    /// - `GROK_TIMEOUT_SECS` - Request timeout (default: 60)
    /// - `GROK_MAX_SEARCH_RESULTS` - Grounding result cap (default: 10)
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env::var("GROK_API_KEY")
            .map_err(|_| LlmError::Configuration("GROK_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        let api_url = env::var("GROK_API_URL").unwrap_or(defaults.api_url);
        let model = env::var("GROK_MODEL").unwrap_or(defaults.model);

        let max_tokens = env::var("GROK_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        let temperature = env::var("GROK_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let timeout_secs = env::var("GROK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        let max_search_results = env::var("GROK_MAX_SEARCH_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_search_results);

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
            timeout_secs,
            max_search_results,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GrokConfigBuilder {
        GrokConfigBuilder::default()
    }
}

/// Builder for GrokConfig.
#[derive(Debug, Default)]
pub struct GrokConfigBuilder {
    config: GrokConfig,
}

impl GrokConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the default temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Set the grounding result cap.
    pub fn max_search_results(mut self, max: u32) -> Self {
        self.config.max_search_results = max;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GrokConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GrokConfig::default();

        assert_eq!(config.api_url, "https://api.x.ai");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "grok-4-1-fast");
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_search_results, 10);
    }

    #[test]
    fn test_builder_all_options() {
        let config = GrokConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com")
            .model("grok-4")
            .max_tokens(512)
            .temperature(0.2)
            .timeout_secs(5)
            .max_search_results(3)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.model, "grok-4");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_search_results, 3);
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_grok_vars() {
            for key in [
                "GROK_API_KEY",
                "GROK_API_URL",
                "GROK_MODEL",
                "GROK_MAX_TOKENS",
                "GROK_TEMPERATURE",
                "GROK_TIMEOUT_SECS",
                "GROK_MAX_SEARCH_RESULTS",
            ] {
                std::env::remove_var(key);
            }
        }

        // Missing API key should error
        clear_all_grok_vars();
        match GrokConfig::from_env() {
            Err(LlmError::Configuration(msg)) => assert!(msg.contains("GROK_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Only API key set, defaults used
        clear_all_grok_vars();
        std::env::set_var("GROK_API_KEY", "test-env-key");
        let config = GrokConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.model, "grok-4-1-fast");
        assert_eq!(config.timeout_secs, 60);

        // Overrides, with an unparseable value falling back to the default
        clear_all_grok_vars();
        std::env::set_var("GROK_API_KEY", "full-test-key");
        std::env::set_var("GROK_MODEL", "grok-4");
        std::env::set_var("GROK_TEMPERATURE", "0.3");
        std::env::set_var("GROK_TIMEOUT_SECS", "soon");
        std::env::set_var("GROK_MAX_SEARCH_RESULTS", "4");
        let config = GrokConfig::from_env().unwrap();
        assert_eq!(config.model, "grok-4");
        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_search_results, 4);

        clear_all_grok_vars();
    }
}
