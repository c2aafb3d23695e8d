//! Error types for practice-core.

use thiserror::Error;

/// Result type alias using PracticeError.
pub type Result<T> = std::result::Result<T, PracticeError>;

/// Errors raised while building banks, policies or learner states.
///
/// Answer text never produces an error: any string is a valid submission.
#[derive(Debug, Error)]
pub enum PracticeError {
    #[error("difficulty level {level} is outside {min}..={max}")]
    LevelOutOfRange { level: u32, min: u32, max: u32 },

    #[error("invalid difficulty policy: {0}")]
    InvalidPolicy(String),

    #[error("malformed question bank: {0}")]
    MalformedBank(#[from] serde_json::Error),

    #[error("question {index} in {topic}/{level} has a blank answer")]
    BlankAnswer {
        topic: String,
        level: u32,
        index: usize,
    },
}
