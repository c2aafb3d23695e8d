//! Answer matching for free-text submissions.
//!
//! Matching is exact string equality after normalization. Normalization
//! lower-cases, collapses whitespace and drops punctuation that carries no
//! meaning in chemistry answers. The characters in [`ANSWER_PUNCTUATION`]
//! survive, so `"hydrogen chloride (aqueous)"` and `"hydrogen chloride aqueous"`
//! are different answers, while `"Nitric acid."` equals `"nitric acid"`.

use crate::types::{AttemptResult, Question};

/// Punctuation kept by [`normalize`]. Letters, digits and spaces are always kept.
///
/// Parentheses and brackets mark states and complexes (`Ca(OH)2`, `[Cu(NH3)4]2+`),
/// `+`, `-`, `>` and `^` spell charges and reaction arrows, `'` marks primed
/// groups (`R'OH`) and `/` separates alternatives.
pub const ANSWER_PUNCTUATION: &[char] = &['(', ')', '[', ']', '+', '-', '>', '^', '\'', '/'];

/// Single-character arrows rewritten to `->`.
const ARROWS: &[char] = &['→', '⟶', '➔', '➝'];

/// Normalize an answer for comparison.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)` for every `s`.
pub fn normalize(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() || ANSWER_PUNCTUATION.contains(&ch) {
            kept.push(ch);
        } else if ch.is_whitespace() {
            kept.push(' ');
        } else if ARROWS.contains(&ch) {
            kept.push_str("->");
        }
    }

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `submitted` matches the canonical answer or an accepted variant.
///
/// The sentinel question never matches, whatever was typed.
pub fn is_correct(submitted: &str, question: &Question) -> bool {
    if question.is_sentinel() {
        return false;
    }

    let submitted = normalize(submitted);
    submitted == normalize(&question.canonical_answer)
        || question
            .accepted_answers
            .iter()
            .any(|variant| normalize(variant) == submitted)
}

/// Judge a submission and package the feedback shown to the learner.
pub fn evaluate(submitted: &str, question: &Question) -> AttemptResult {
    AttemptResult {
        was_correct: is_correct(submitted, question),
        expected: question.canonical_answer.clone(),
        explanation: question.explanation.clone(),
        remediation: question.remediation.clone(),
    }
}
