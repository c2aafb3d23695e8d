//! Test fixtures and factory functions for request bodies.

use serde_json::json;
use uuid::Uuid;

/// Create a submit answer request body for an anonymous learner.
pub fn answer_request(
    topic: &str,
    level: u32,
    streak: u32,
    index: usize,
    answer: &str,
) -> serde_json::Value {
    json!({
        "topic": topic,
        "level": level,
        "streak": streak,
        "index": index,
        "answer": answer
    })
}

/// Create a submit answer request body for a signed-in learner.
pub fn learner_answer_request(
    learner_id: Uuid,
    topic: &str,
    level: u32,
    streak: u32,
    index: usize,
    answer: &str,
) -> serde_json::Value {
    let mut body = answer_request(topic, level, streak, index, answer);
    body["learner_id"] = json!(learner_id);
    body
}

pub fn question_url(topic: &str, level: u32) -> String {
    format!("/api/practice/question?topic={}&level={}", topic, level)
}

pub fn progress_url(learner_id: Uuid, topic: &str) -> String {
    format!("/api/progress?learner_id={}&topic={}", learner_id, topic)
}

pub fn attempts_url(learner_id: Uuid) -> String {
    format!("/api/attempts?learner_id={}", learner_id)
}
