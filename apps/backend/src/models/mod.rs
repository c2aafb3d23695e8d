//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from practice-core
pub use practice_core::{
    AttemptRecord, AttemptResult, DifficultyPolicy, LearnerState, PersistOutcome, Question,
};

// === Database Entity Types ===

/// Attempt row stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttempt {
    pub id: Uuid,
    pub learner_id: String,
    pub topic: String,
    pub prior_level: i32,
    pub question_prompt: String,
    pub submitted_answer: String,
    pub was_correct: bool,
    pub next_level: i32,
    pub next_streak: i32,
    pub attempted_at: DateTime<Utc>,
}

impl DbAttempt {
    /// Create from a practice-core record of a signed-in learner
    pub fn from_record(learner_id: &str, record: &AttemptRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            learner_id: learner_id.to_string(),
            topic: record.topic.clone(),
            prior_level: record.prior_level as i32,
            question_prompt: record.question_prompt.clone(),
            submitted_answer: record.submitted_answer.clone(),
            was_correct: record.was_correct,
            next_level: record.next_level as i32,
            next_streak: record.next_streak as i32,
            attempted_at: record.attempted_at,
        }
    }

    /// Convert back to the practice-core record
    pub fn to_record(&self) -> AttemptRecord {
        AttemptRecord {
            learner_id: Some(self.learner_id.clone()),
            topic: self.topic.clone(),
            prior_level: self.prior_level.max(0) as u32,
            question_prompt: self.question_prompt.clone(),
            submitted_answer: self.submitted_answer.clone(),
            was_correct: self.was_correct,
            next_level: self.next_level.max(0) as u32,
            next_streak: self.next_streak.max(0) as u32,
            attempted_at: self.attempted_at,
        }
    }
}

/// Latest level and streak per learner and topic
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProgress {
    pub learner_id: String,
    pub topic: String,
    pub level: i32,
    pub streak: i32,
    pub updated_at: DateTime<Utc>,
}

impl DbProgress {
    pub fn to_progress(&self) -> Progress {
        Progress {
            level: self.level.max(0) as u32,
            streak: self.streak.max(0) as u32,
        }
    }
}

/// Stored progress, not yet checked against the difficulty policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub streak: u32,
}

impl From<&AttemptRecord> for Progress {
    fn from(record: &AttemptRecord) -> Self {
        Self {
            level: record.next_level,
            streak: record.next_streak,
        }
    }
}

// === API Request/Response Types ===

/// Query for GET /api/practice/question
#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub topic: String,
    /// Defaults to the policy's lowest level
    pub level: Option<u32>,
}

/// A question as shown to the learner. Answers stay on the server.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub topic: String,
    pub level: u32,
    /// Position in the (topic, level) pool; null for the placeholder question
    pub index: Option<usize>,
    pub prompt: String,
}

/// Body of POST /api/practice/answer
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    /// Absent for anonymous learners
    #[serde(default)]
    pub learner_id: Option<Uuid>,
    pub topic: String,
    pub level: u32,
    #[serde(default)]
    pub streak: u32,
    pub index: usize,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub result: AttemptResult,
    pub state: LearnerState,
    pub persisted: PersistOutcome,
}

/// Query for GET /api/progress
#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub learner_id: Uuid,
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub learner_id: Uuid,
    pub topic: String,
    pub state: LearnerState,
    /// False when nothing usable was stored and the initial state is returned
    pub stored: bool,
}

/// Query for GET /api/attempts
#[derive(Debug, Deserialize)]
pub struct RecentAttemptsQuery {
    pub learner_id: Uuid,
    /// Defaults to the session history size
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecentAttemptsResponse {
    pub attempts: Vec<AttemptRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicInfo {
    pub id: String,
    pub levels: Vec<u32>,
    pub question_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicsResponse {
    pub topics: Vec<TopicInfo>,
    pub min_level: u32,
    pub max_level: u32,
    pub promote_threshold: u32,
}
