//! Specialized tutoring-agent descriptors.

use serde::{Deserialize, Serialize};

/// A scope-limited assistant definition proposed by a language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSuggestion {
    /// Topic the agent is restricted to.
    #[serde(default, alias = "skill")]
    pub specialization: String,
    /// Display name.
    pub name: String,
    /// Full system prompt for the agent.
    pub system_prompt: String,
}

impl AgentSuggestion {
    /// Key used to de-duplicate suggestions per user.
    ///
    /// Falls back to the agent name when no specialization was given.
    pub fn specialization_key(&self) -> String {
        let key = if self.specialization.trim().is_empty() {
            &self.name
        } else {
            &self.specialization
        };
        key.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_alias() {
        let json = r#"{"skill":"SQL","name":"SQL Tutor","system_prompt":"Only SQL."}"#;
        let agent: AgentSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(agent.specialization, "SQL");
    }

    #[test]
    fn test_specialization_key_falls_back_to_name() {
        let agent = AgentSuggestion {
            specialization: " ".to_string(),
            name: "Kubernetes Coach".to_string(),
            system_prompt: String::new(),
        };
        assert_eq!(agent.specialization_key(), "kubernetes coach");
    }
}
