//! Difficulty state machine.
//!
//! States are `(level, streak)` pairs with `min_level <= level <= max_level`.
//! A correct answer extends the streak; reaching the promotion threshold moves
//! the learner up one level (capped at `max_level`) and restarts the streak.
//! A miss restarts the streak and drops the level by `demote_step`, never below
//! `min_level`.

use serde::Serialize;

use crate::bank::Level;
use crate::error::{PracticeError, Result};

/// Promotion/demotion constants.
///
/// The defaults are the reference policy: levels 6 through 12, promotion after
/// three consecutive correct answers, single-step demotion on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyPolicy {
    min_level: Level,
    max_level: Level,
    promote_threshold: u32,
    demote_step: u32,
}

impl Default for DifficultyPolicy {
    fn default() -> Self {
        Self {
            min_level: 6,
            max_level: 12,
            promote_threshold: 3,
            demote_step: 1,
        }
    }
}

impl DifficultyPolicy {
    pub fn new(
        min_level: Level,
        max_level: Level,
        promote_threshold: u32,
        demote_step: u32,
    ) -> Result<Self> {
        if min_level > max_level {
            return Err(PracticeError::InvalidPolicy(format!(
                "min_level {min_level} is above max_level {max_level}"
            )));
        }
        if promote_threshold == 0 {
            return Err(PracticeError::InvalidPolicy(
                "promote_threshold must be at least 1".to_string(),
            ));
        }
        if demote_step == 0 {
            return Err(PracticeError::InvalidPolicy(
                "demote_step must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            min_level,
            max_level,
            promote_threshold,
            demote_step,
        })
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn max_level(&self) -> Level {
        self.max_level
    }

    pub fn promote_threshold(&self) -> u32 {
        self.promote_threshold
    }

    pub fn demote_step(&self) -> u32 {
        self.demote_step
    }

    pub fn contains(&self, level: Level) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }

    /// State at session start or after a reset: lowest level, no streak.
    pub fn initial_state(&self) -> LearnerState {
        LearnerState {
            level: self.min_level,
            streak: 0,
        }
    }

    /// Build a state, rejecting levels outside this policy's range.
    pub fn state(&self, level: Level, streak: u32) -> Result<LearnerState> {
        if !self.contains(level) {
            return Err(PracticeError::LevelOutOfRange {
                level,
                min: self.min_level,
                max: self.max_level,
            });
        }
        Ok(LearnerState { level, streak })
    }

    /// Compute the state after one answer.
    ///
    /// `state` must come from this policy; the range check happens when the
    /// state is built, not here.
    pub fn transition(&self, state: LearnerState, was_correct: bool) -> LearnerState {
        if !was_correct {
            return LearnerState {
                level: state
                    .level
                    .saturating_sub(self.demote_step)
                    .max(self.min_level),
                streak: 0,
            };
        }

        let streak = state.streak.saturating_add(1);
        if streak >= self.promote_threshold {
            // At max_level the streak still restarts so it cannot grow without bound.
            LearnerState {
                level: state.level.saturating_add(1).min(self.max_level),
                streak: 0,
            }
        } else {
            LearnerState {
                level: state.level,
                streak,
            }
        }
    }
}

/// Difficulty level and streak of consecutive correct answers.
///
/// Only built through [`DifficultyPolicy`], so the level is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LearnerState {
    level: Level,
    streak: u32,
}

impl LearnerState {
    pub fn new(level: Level, streak: u32, policy: &DifficultyPolicy) -> Result<Self> {
        policy.state(level, streak)
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }
}
