//! Caller-side practice session.
//!
//! Drives the loop pick -> answer -> judge -> transition for one learner on
//! one topic. The session owns its [`LearnerState`] and performs no I/O; the
//! [`AttemptRecord`] it produces is handed to persistence by the caller, after
//! the transition has already been applied.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::difficulty::{DifficultyPolicy, LearnerState};
use crate::matching::evaluate;
use crate::selector::{pick, RandomSource};
use crate::types::{AttemptRecord, AttemptResult, Question};

/// Number of recent attempts kept in [`PracticeSession::history`].
pub const HISTORY_LIMIT: usize = 50;

/// One past attempt, newest first in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub prompt: String,
    pub answer: String,
    pub was_correct: bool,
    pub expected: String,
}

/// Everything produced by one submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub result: AttemptResult,
    pub prior: LearnerState,
    pub next: LearnerState,
    pub record: AttemptRecord,
}

/// Judge one answer to `question` from a learner in state `prior`.
///
/// Evaluates, applies the transition and only then builds the record, so the
/// record always carries the post-transition state.
pub fn attempt(
    policy: &DifficultyPolicy,
    prior: LearnerState,
    question: &Question,
    answer: &str,
    learner_id: Option<&str>,
    topic: &str,
) -> Submission {
    let result = evaluate(answer, question);
    let next = policy.transition(prior, result.was_correct);

    let record = AttemptRecord {
        learner_id: learner_id.map(str::to_string),
        topic: topic.to_string(),
        prior_level: prior.level(),
        question_prompt: question.prompt.clone(),
        submitted_answer: answer.to_string(),
        was_correct: result.was_correct,
        next_level: next.level(),
        next_streak: next.streak(),
        attempted_at: Utc::now(),
    };

    Submission {
        result,
        prior,
        next,
        record,
    }
}

#[derive(Debug, Clone)]
pub struct PracticeSession {
    policy: DifficultyPolicy,
    topic: String,
    learner_id: Option<String>,
    state: LearnerState,
    current: Option<Question>,
    history: VecDeque<HistoryEntry>,
}

impl PracticeSession {
    /// Start an anonymous session at the policy's initial state.
    pub fn new(topic: impl Into<String>, policy: DifficultyPolicy) -> Self {
        Self {
            policy,
            topic: topic.into(),
            learner_id: None,
            state: policy.initial_state(),
            current: None,
            history: VecDeque::new(),
        }
    }

    /// Resume from a previously saved state.
    pub fn with_state(mut self, state: LearnerState) -> Self {
        self.state = state;
        self
    }

    pub fn with_learner(mut self, learner_id: impl Into<String>) -> Self {
        self.learner_id = Some(learner_id.into());
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn state(&self) -> LearnerState {
        self.state
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Draw the next question for the current topic and level.
    pub fn next_question<S: RandomSource>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut S,
    ) -> &Question {
        let question = pick(bank, &self.topic, self.state.level(), rng);
        self.current.insert(question)
    }

    /// Judge `answer` against the current question and advance the state.
    ///
    /// Returns `None` when there is no current question or it is the sentinel:
    /// a placeholder prompt is not an attempt and must not demote the learner.
    /// The current question is consumed; call [`Self::next_question`] again.
    pub fn submit(&mut self, answer: &str) -> Option<Submission> {
        if self.current.as_ref().map_or(true, Question::is_sentinel) {
            return None;
        }
        let question = self.current.take()?;

        let submission = attempt(
            &self.policy,
            self.state,
            &question,
            answer,
            self.learner_id.as_deref(),
            &self.topic,
        );
        self.state = submission.next;

        self.history.push_front(HistoryEntry {
            prompt: question.prompt,
            answer: answer.to_string(),
            was_correct: submission.result.was_correct,
            expected: submission.result.expected.clone(),
        });
        self.history.truncate(HISTORY_LIMIT);

        Some(submission)
    }

    /// Move to another topic, starting over at the initial state.
    pub fn switch_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
        self.reset();
    }

    /// Back to the lowest level with no streak. History is kept.
    pub fn reset(&mut self) {
        self.state = self.policy.initial_state();
        self.current = None;
    }
}
