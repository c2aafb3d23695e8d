//! Adaptive practice engine for short free-text quiz questions.
//!
//! Provides:
//! - Answer normalization and matching against accepted variants
//! - An immutable question bank keyed by topic and difficulty level
//! - Random question selection with an injectable random source
//! - The difficulty state machine (promotion on streaks, demotion on misses)
//! - A caller-side practice session tying the pieces together

pub mod bank;
pub mod difficulty;
pub mod error;
pub mod matching;
pub mod selector;
pub mod session;
pub mod types;

pub use bank::{Level, QuestionBank, QuestionBankBuilder};
pub use difficulty::{DifficultyPolicy, LearnerState};
pub use error::{PracticeError, Result};
pub use matching::{evaluate, is_correct, normalize, ANSWER_PUNCTUATION};
pub use selector::{pick, pick_index, RandomSource, RngSource};
pub use session::{attempt, HistoryEntry, PracticeSession, Submission, HISTORY_LIMIT};
pub use types::{AttemptRecord, AttemptResult, PersistOutcome, Question, SENTINEL_PROMPT};
