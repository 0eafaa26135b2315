//! Learning intents extracted from role-transition context.

use serde::{Deserialize, Serialize};

use crate::content::ContentType;

/// Priority of a learning intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One tailored search query per content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQueries {
    pub article: String,
    pub video: String,
    pub course: String,
}

impl SearchQueries {
    /// Query for a single content type.
    pub fn for_type(&self, content_type: ContentType) -> &str {
        match content_type {
            ContentType::Article => &self.article,
            ContentType::Video => &self.video,
            ContentType::Course => &self.course,
        }
    }
}

/// A model-derived skill gap with tailored search queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningIntent {
    /// Skill to acquire.
    pub skill: String,
    /// How urgent the gap is.
    pub priority: Priority,
    /// Queries used to fan out to the fetchers.
    pub search_queries: SearchQueries,
    /// Explanation attached to every recommendation found for this intent.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intent() {
        let json = r#"{
            "skill": "System design",
            "priority": "high",
            "search_queries": {
                "article": "system design primer",
                "video": "system design interview walkthrough",
                "course": "distributed systems course"
            },
            "reason": "Senior engineers own architecture decisions."
        }"#;

        let intent: LearningIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.priority, Priority::High);
        assert_eq!(
            intent.search_queries.for_type(ContentType::Video),
            "system design interview walkthrough"
        );
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let json = r#"{"skill":"x","priority":"urgent","search_queries":{"article":"a","video":"v","course":"c"},"reason":"r"}"#;
        assert!(serde_json::from_str::<LearningIntent>(json).is_err());
    }
}
