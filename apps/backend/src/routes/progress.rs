//! Progress endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/progress
///
/// Stored data is not trusted: a level outside the current policy falls back
/// to the initial state.
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressResponse>> {
    let learner_id = query.learner_id.to_string();
    let stored = state
        .store
        .progress(&learner_id, &query.topic)
        .await?
        .and_then(|p| match state.policy.state(p.level, p.streak) {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::warn!("Ignoring stored progress for {}: {}", learner_id, err);
                None
            }
        });

    Ok(Json(ProgressResponse {
        learner_id: query.learner_id,
        topic: query.topic,
        state: stored.unwrap_or_else(|| state.policy.initial_state()),
        stored: stored.is_some(),
    }))
}
