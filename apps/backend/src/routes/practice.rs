//! Practice endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::attempts::record_attempt;
use crate::AppState;
use practice_core::{attempt, Submission, SENTINEL_PROMPT};

/// GET /api/practice/question
pub async fn question(
    State(state): State<AppState>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<QuestionResponse>> {
    let level = query.level.unwrap_or(state.policy.min_level());
    // Reject levels the policy could never produce before touching the bank.
    state.policy.state(level, 0)?;

    let index = state.pick_index(&query.topic, level);
    let prompt = match index.and_then(|i| state.bank.get(&query.topic, level, i)) {
        Some(question) => question.prompt.clone(),
        None => {
            tracing::debug!("No questions for {}/{}", query.topic, level);
            SENTINEL_PROMPT.to_string()
        }
    };

    Ok(Json(QuestionResponse {
        topic: query.topic,
        level,
        index,
        prompt,
    }))
}

/// POST /api/practice/answer
pub async fn answer(
    State(state): State<AppState>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>> {
    let prior = state.policy.state(payload.level, payload.streak)?;

    let question = state
        .bank
        .get(&payload.topic, payload.level, payload.index)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "question {} in {}/{}",
                payload.index, payload.topic, payload.level
            ))
        })?;

    // The transition is final before persistence is attempted.
    let learner_id = payload.learner_id.map(|id| id.to_string());
    let Submission {
        result,
        next,
        record,
        ..
    } = attempt(
        &state.policy,
        prior,
        question,
        &payload.answer,
        learner_id.as_deref(),
        &payload.topic,
    );

    if next.level() != prior.level() {
        tracing::info!(
            "Level change on {}: {} -> {}",
            record.topic,
            prior.level(),
            next.level()
        );
    }

    let persisted = record_attempt(state.store.as_ref(), &record).await;

    Ok(Json(SubmitAnswerResponse {
        result,
        state: next,
        persisted,
    }))
}
