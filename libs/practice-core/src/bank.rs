//! Immutable question bank keyed by topic and difficulty level.
//!
//! The bank is fully materialized before any selection happens and is never
//! mutated afterwards. The built-in bank is embedded in the binary as JSON:
//!
//! ```json
//! {
//!   "acid": {
//!     "6": [
//!       {
//!         "prompt": "Name HCl (aqueous).",
//!         "canonical_answer": "hydrochloric acid",
//!         "accepted_answers": ["hydrogen chloride (aqueous)"],
//!         "explanation": "...",
//!         "remediation": "..."
//!       }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{PracticeError, Result};
use crate::matching::normalize;
use crate::types::Question;

/// Difficulty level (grade-like integer).
pub type Level = u32;

type TopicTable = BTreeMap<String, BTreeMap<Level, Vec<Question>>>;

const BUILTIN_QUESTIONS: &str = include_str!("../data/questions.json");

/// Read-only table of questions: topic -> level -> ordered questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    topics: TopicTable,
}

impl QuestionBank {
    /// Load the bank shipped with the crate (topics `acid` and `skeleton`).
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_QUESTIONS)
    }

    /// Parse a bank from JSON in the layout shown in the module docs.
    pub fn from_json(json: &str) -> Result<Self> {
        let topics: TopicTable = serde_json::from_str(json)?;
        Self::from_topics(topics)
    }

    /// Build a bank from an already assembled table, validating every question.
    pub fn from_topics(topics: TopicTable) -> Result<Self> {
        for (topic, levels) in &topics {
            for (&level, questions) in levels {
                if let Some(index) = questions.iter().position(has_blank_answer) {
                    return Err(PracticeError::BlankAnswer {
                        topic: topic.clone(),
                        level,
                        index,
                    });
                }
            }
        }
        Ok(Self { topics })
    }

    pub fn builder() -> QuestionBankBuilder {
        QuestionBankBuilder::default()
    }

    /// Questions at `(topic, level)`; empty when either key is absent.
    pub fn pool(&self, topic: &str, level: Level) -> &[Question] {
        self.topics
            .get(topic)
            .and_then(|levels| levels.get(&level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, topic: &str, level: Level, index: usize) -> Option<&Question> {
        self.pool(topic, level).get(index)
    }

    /// Topic identifiers in sorted order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    /// Levels with at least one question for `topic`, ascending.
    pub fn levels(&self, topic: &str) -> Vec<Level> {
        self.topics
            .get(topic)
            .map(|levels| {
                levels
                    .iter()
                    .filter(|(_, questions)| !questions.is_empty())
                    .map(|(&level, _)| level)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains_topic(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    /// Total number of questions across all topics and levels.
    pub fn len(&self) -> usize {
        self.topics
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A real question must have a canonical answer and variants that survive
/// normalization, otherwise an empty submission could be judged correct.
fn has_blank_answer(question: &Question) -> bool {
    normalize(&question.canonical_answer).is_empty()
        || question
            .accepted_answers
            .iter()
            .any(|variant| normalize(variant).is_empty())
}

/// Assembles a bank question by question, mostly for fixtures.
#[derive(Debug, Default)]
pub struct QuestionBankBuilder {
    topics: TopicTable,
}

impl QuestionBankBuilder {
    pub fn question(mut self, topic: impl Into<String>, level: Level, question: Question) -> Self {
        self.topics
            .entry(topic.into())
            .or_default()
            .entry(level)
            .or_default()
            .push(question);
        self
    }

    pub fn build(self) -> Result<QuestionBank> {
        QuestionBank::from_topics(self.topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_bank_loads() {
        let bank = QuestionBank::builtin().unwrap();
        assert_eq!(bank.topics().collect::<Vec<_>>(), vec!["acid", "skeleton"]);
        assert_eq!(bank.levels("acid"), (6..=12).collect::<Vec<_>>());
        assert_eq!(bank.levels("skeleton"), (6..=12).collect::<Vec<_>>());
        assert_eq!(bank.len(), 42);
        assert_eq!(bank.pool("acid", 6).len(), 3);
        assert_eq!(bank.pool("acid", 6)[0].canonical_answer, "hydrochloric acid");
    }

    #[test]
    fn builtin_questions_accept_their_own_canonical_answer() {
        let bank = QuestionBank::builtin().unwrap();
        for topic in bank.topics() {
            for level in bank.levels(topic) {
                for q in bank.pool(topic, level) {
                    assert!(
                        crate::matching::is_correct(&q.canonical_answer, q),
                        "{topic}/{level}: {}",
                        q.prompt
                    );
                }
            }
        }
    }

    #[test]
    fn builtin_hypochlorous_rejects_chlorous() {
        let bank = QuestionBank::builtin().unwrap();
        let q = bank.get("acid", 8, 1).unwrap();
        assert_eq!(q.canonical_answer, "hypochlorous acid");
        assert!(crate::matching::is_correct("hypochlorous", q));
        assert!(!crate::matching::is_correct("chlorous acid", q));
        assert!(!crate::matching::is_correct("chlorous acid (no)", q));
    }

    #[test]
    fn missing_keys_give_empty_pool() {
        let bank = QuestionBank::builtin().unwrap();
        assert!(bank.pool("acid", 5).is_empty());
        assert!(bank.pool("acid", 13).is_empty());
        assert!(bank.pool("organic", 6).is_empty());
        assert!(bank.get("acid", 6, 3).is_none());
        assert!(bank.levels("organic").is_empty());
    }

    #[test]
    fn builder_groups_by_topic_and_level() {
        let bank = QuestionBank::builder()
            .question("acid", 6, Question::new("Name HCl (aq).", "hydrochloric acid"))
            .question("acid", 6, Question::new("Name HBr (aq).", "hydrobromic acid"))
            .question("acid", 7, Question::new("Name HNO3 (aq).", "nitric acid"))
            .build()
            .unwrap();

        assert_eq!(bank.len(), 3);
        assert_eq!(bank.levels("acid"), vec![6, 7]);
        assert_eq!(bank.get("acid", 6, 1).unwrap().prompt, "Name HBr (aq).");
        assert!(bank.contains_topic("acid"));
        assert!(!bank.contains_topic("skeleton"));
    }

    #[test]
    fn blank_canonical_answer_is_rejected() {
        let err = QuestionBank::builder()
            .question("acid", 6, Question::new("Name HCl (aq).", "hydrochloric acid"))
            .question("acid", 6, Question::new("Broken", " ?! "))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            PracticeError::BlankAnswer { ref topic, level: 6, index: 1 } if topic == "acid"
        ));
    }

    #[test]
    fn blank_accepted_variant_is_rejected() {
        let err = QuestionBank::builder()
            .question(
                "acid",
                7,
                Question::new("Name HNO3 (aq).", "nitric acid").with_accepted(["nitric acid", ""]),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, PracticeError::BlankAnswer { level: 7, index: 0, .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = QuestionBank::from_json(r#"{"acid": {"six": []}}"#).unwrap_err();
        assert!(matches!(err, PracticeError::MalformedBank(_)));
    }

    #[test]
    fn empty_bank() {
        let bank = QuestionBank::from_json("{}").unwrap();
        assert!(bank.is_empty());
        assert_eq!(bank.topics().count(), 0);
    }
}
