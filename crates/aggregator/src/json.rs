//! Pulling JSON out of model replies.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{AggregatorError, Result};

/// Parse a reply that must be bare JSON.
pub fn parse_strict<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw.trim())
        .map_err(|e| AggregatorError::parse(format!("invalid JSON: {}", e), raw))
}

/// Parse a reply as JSON, retrying once with Markdown fences removed.
pub fn parse_with_fence_fallback<T: DeserializeOwned>(raw: &str) -> Result<T> {
    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Ok(value);
    }

    serde_json::from_str(&strip_code_fences(raw)).map_err(|e| {
        AggregatorError::parse(
            format!("invalid JSON, also after removing code fences: {}", e),
            raw,
        )
    })
}

static OPENING_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?:json)?\s*").expect("valid regex"));
static CLOSING_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("valid regex"));

/// Remove a leading ```` ``` ```` / ```` ```json ```` fence and a trailing one.
pub fn strip_code_fences(text: &str) -> String {
    let text = OPENING_FENCE_RE.replace(text.trim(), "");
    CLOSING_FENCE_RE.replace(&text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), r#"{"a": 1}"#);
        assert_eq!(strip_code_fences("```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("[1]"), "[1]");
        assert_eq!(strip_code_fences("```json{\"a\": 1}```"), r#"{"a": 1}"#);
    }

    #[test]
    fn test_prose_around_json_is_rejected() {
        let raw = r#"Sure! {"summary": "ok"} Hope that helps."#;
        assert!(matches!(
            parse_with_fence_fallback::<Value>(raw),
            Err(AggregatorError::Parse { .. })
        ));
    }

    #[test]
    fn test_strict_parse_rejects_fences() {
        let fenced = "```json\n{\"learning_intents\": []}\n```";

        match parse_strict::<Value>(fenced) {
            Err(AggregatorError::Parse { raw, .. }) => assert_eq!(raw, fenced),
            other => panic!("Expected Parse error, got {:?}", other),
        }
        assert!(parse_with_fence_fallback::<Value>(fenced).is_ok());
    }

    #[test]
    fn test_fallback_reports_raw_response() {
        let raw = "I cannot help with that.";
        match parse_with_fence_fallback::<Value>(raw) {
            Err(AggregatorError::Parse { raw: captured, message }) => {
                assert_eq!(captured, raw);
                assert!(message.contains("code fences"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }
}
