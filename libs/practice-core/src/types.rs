//! Core types shared by the practice engine and its callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prompt carried by the placeholder question returned for an empty pool.
pub const SENTINEL_PROMPT: &str = "No questions available for this topic/level.";

/// A single practice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub canonical_answer: String,
    #[serde(default)]
    pub accepted_answers: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    /// Hint shown after answering. Empty when the question has none.
    #[serde(default)]
    pub remediation: String,
}

impl Question {
    /// Create a question with no variants, explanation or remediation.
    pub fn new(prompt: impl Into<String>, canonical_answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            canonical_answer: canonical_answer.into(),
            accepted_answers: Vec::new(),
            explanation: String::new(),
            remediation: String::new(),
        }
    }

    pub fn with_accepted<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_answers = answers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = remediation.into();
        self
    }

    /// Placeholder returned when a (topic, level) pool has no questions.
    pub fn sentinel() -> Self {
        Self::new(SENTINEL_PROMPT, "")
    }

    /// Whether this is the placeholder question. It can never be answered correctly.
    pub fn is_sentinel(&self) -> bool {
        self.canonical_answer.is_empty()
    }
}

/// Outcome of judging one submission, for display by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub was_correct: bool,
    pub expected: String,
    pub explanation: String,
    pub remediation: String,
}

/// Payload handed to the persistence collaborator after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Absent for anonymous learners; such records are never persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learner_id: Option<String>,
    pub topic: String,
    pub prior_level: u32,
    pub question_prompt: String,
    pub submitted_answer: String,
    pub was_correct: bool,
    pub next_level: u32,
    pub next_streak: u32,
    pub attempted_at: DateTime<Utc>,
}

impl AttemptRecord {
    pub fn is_anonymous(&self) -> bool {
        self.learner_id.is_none()
    }
}

/// Result reported by the persistence collaborator.
///
/// The engine never interprets it; callers may log it or ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum PersistOutcome {
    Recorded,
    /// The attempt belonged to an anonymous learner.
    Skipped,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_has_empty_canonical_answer() {
        let q = Question::sentinel();
        assert!(q.is_sentinel());
        assert_eq!(q.prompt, SENTINEL_PROMPT);
        assert!(q.accepted_answers.is_empty());
    }

    #[test]
    fn question_deserializes_with_missing_optional_fields() {
        let q: Question =
            serde_json::from_str(r#"{"prompt":"Name HNO3 (aq).","canonical_answer":"nitric acid"}"#)
                .unwrap();
        assert_eq!(q.canonical_answer, "nitric acid");
        assert!(q.accepted_answers.is_empty());
        assert!(q.remediation.is_empty());
        assert!(!q.is_sentinel());
    }

    #[test]
    fn persist_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(PersistOutcome::Failed("timeout".into())).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "timeout");

        let json = serde_json::to_value(PersistOutcome::Skipped).unwrap();
        assert_eq!(json["status"], "skipped");
    }
}
