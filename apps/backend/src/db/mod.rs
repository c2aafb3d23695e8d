//! PostgreSQL database operations

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::attempts::AttemptStore;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    // === Attempt Repository ===

    /// Insert an attempt and upsert the learner's progress in one transaction
    pub async fn insert_attempt(&self, attempt: &DbAttempt) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO attempts (id, learner_id, topic, prior_level, question_prompt,
                                  submitted_answer, was_correct, next_level, next_streak,
                                  attempted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(attempt.id)
        .bind(&attempt.learner_id)
        .bind(&attempt.topic)
        .bind(attempt.prior_level)
        .bind(&attempt.question_prompt)
        .bind(&attempt.submitted_answer)
        .bind(attempt.was_correct)
        .bind(attempt.next_level)
        .bind(attempt.next_streak)
        .bind(attempt.attempted_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO progress (learner_id, topic, level, streak, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (learner_id, topic) DO UPDATE SET
                level = EXCLUDED.level,
                streak = EXCLUDED.streak,
                updated_at = NOW()
            "#,
        )
        .bind(&attempt.learner_id)
        .bind(&attempt.topic)
        .bind(attempt.next_level)
        .bind(attempt.next_streak)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    // === Progress Repository ===

    /// Get stored progress for a learner on a topic
    pub async fn get_progress(&self, learner_id: &str, topic: &str) -> Result<Option<DbProgress>> {
        let progress = sqlx::query_as::<_, DbProgress>(
            r#"
            SELECT learner_id, topic, level, streak, updated_at
            FROM progress
            WHERE learner_id = $1 AND topic = $2
            "#,
        )
        .bind(learner_id)
        .bind(topic)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress)
    }

    /// Most recent attempts for a learner, newest first
    pub async fn recent_attempts(&self, learner_id: &str, limit: i64) -> Result<Vec<DbAttempt>> {
        let attempts = sqlx::query_as::<_, DbAttempt>(
            r#"
            SELECT id, learner_id, topic, prior_level, question_prompt, submitted_answer,
                   was_correct, next_level, next_streak, attempted_at
            FROM attempts
            WHERE learner_id = $1
            ORDER BY attempted_at DESC
            LIMIT $2
            "#,
        )
        .bind(learner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }
}

#[async_trait]
impl AttemptStore for Database {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn save(&self, learner_id: &str, record: &AttemptRecord) -> Result<()> {
        self.insert_attempt(&DbAttempt::from_record(learner_id, record))
            .await
    }

    async fn progress(&self, learner_id: &str, topic: &str) -> Result<Option<Progress>> {
        Ok(self
            .get_progress(learner_id, topic)
            .await?
            .map(|p| p.to_progress()))
    }

    async fn recent(&self, learner_id: &str, limit: usize) -> Result<Vec<AttemptRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(self
            .recent_attempts(learner_id, limit)
            .await?
            .iter()
            .map(DbAttempt::to_record)
            .collect())
    }
}
