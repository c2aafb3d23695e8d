//! Attempt persistence.
//!
//! Persistence always runs after the learner's state transition has been
//! computed, and its failures never reach the learner: they become a
//! [`PersistOutcome::Failed`] that the caller may log or report.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use practice_core::HISTORY_LIMIT;

use crate::error::{ApiError, Result};
use crate::models::{AttemptRecord, PersistOutcome, Progress};

/// Backing store for attempts and per-topic progress.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Store identifier for logs.
    fn name(&self) -> &'static str;

    /// Append the attempt and overwrite the learner's progress for its topic.
    async fn save(&self, learner_id: &str, record: &AttemptRecord) -> Result<()>;

    /// Last stored progress for a learner on a topic.
    async fn progress(&self, learner_id: &str, topic: &str) -> Result<Option<Progress>>;

    /// Most recent attempts for a learner across topics, newest first.
    async fn recent(&self, learner_id: &str, limit: usize) -> Result<Vec<AttemptRecord>>;
}

/// Persist one attempt. Anonymous attempts are skipped without error.
pub async fn record_attempt(store: &dyn AttemptStore, record: &AttemptRecord) -> PersistOutcome {
    let Some(learner_id) = record.learner_id.as_deref() else {
        tracing::debug!("Skipping persistence for anonymous attempt on {}", record.topic);
        return PersistOutcome::Skipped;
    };

    match store.save(learner_id, record).await {
        Ok(()) => PersistOutcome::Recorded,
        Err(err) => {
            tracing::error!(
                "Failed to record attempt for {} in {} store: {}",
                learner_id,
                store.name(),
                err
            );
            PersistOutcome::Failed(err.to_string())
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    /// Newest first, at most [`HISTORY_LIMIT`] per learner.
    attempts: HashMap<String, VecDeque<AttemptRecord>>,
    progress: HashMap<(String, String), Progress>,
}

/// In-process store used without a database and in tests.
///
/// Only the last [`HISTORY_LIMIT`] attempts of each learner are kept.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            inner: Mutex::default(),
            failure: Some(reason.into()),
        }
    }

    /// Attempts kept for a learner, newest first.
    pub fn attempts(&self, learner_id: &str) -> Vec<AttemptRecord> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .attempts
            .get(learner_id)
            .map(|attempts| attempts.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of attempts kept across all learners.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.attempts.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, learner_id: &str, record: &AttemptRecord) -> Result<()> {
        if let Some(reason) = &self.failure {
            return Err(ApiError::Internal(reason.clone()));
        }

        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let attempts = inner.attempts.entry(learner_id.to_string()).or_default();
        attempts.push_front(record.clone());
        attempts.truncate(HISTORY_LIMIT);
        inner.progress.insert(
            (learner_id.to_string(), record.topic.clone()),
            Progress::from(record),
        );
        Ok(())
    }

    async fn progress(&self, learner_id: &str, topic: &str) -> Result<Option<Progress>> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(inner
            .progress
            .get(&(learner_id.to_string(), topic.to_string()))
            .copied())
    }

    async fn recent(&self, learner_id: &str, limit: usize) -> Result<Vec<AttemptRecord>> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(inner
            .attempts
            .get(learner_id)
            .map(|attempts| attempts.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
