//! Topic endpoints

use axum::{extract::State, Json};

use crate::models::*;
use crate::AppState;

/// GET /api/topics
pub async fn list(State(state): State<AppState>) -> Json<TopicsResponse> {
    let topics = state
        .bank
        .topics()
        .map(|topic| {
            let levels = state.bank.levels(topic);
            let question_count = levels
                .iter()
                .map(|&level| state.bank.pool(topic, level).len())
                .sum();
            TopicInfo {
                id: topic.to_string(),
                levels,
                question_count,
            }
        })
        .collect();

    Json(TopicsResponse {
        topics,
        min_level: state.policy.min_level(),
        max_level: state.policy.max_level(),
        promote_threshold: state.policy.promote_threshold(),
    })
}
