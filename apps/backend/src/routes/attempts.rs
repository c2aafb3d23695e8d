//! Attempt history endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use practice_core::HISTORY_LIMIT;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/attempts
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<RecentAttemptsQuery>,
) -> Result<Json<RecentAttemptsResponse>> {
    let limit = query.limit.unwrap_or(HISTORY_LIMIT).min(HISTORY_LIMIT);
    let attempts = state
        .store
        .recent(&query.learner_id.to_string(), limit)
        .await?;
    Ok(Json(RecentAttemptsResponse { attempts }))
}
