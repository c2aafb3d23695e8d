//! Random question selection.
//!
//! Each pick is independent: the same question may come up twice in a row.
//! Callers that want an anti-repeat window layer it on top of [`pick_index`].

use rand::Rng;

use crate::bank::{Level, QuestionBank};
use crate::types::Question;

/// Source of uniform random indices.
pub trait RandomSource {
    /// Return an index in `0..len`. Never called with `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Adapts any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Index of a random question in the `(topic, level)` pool, or `None` when
/// the pool is empty.
pub fn pick_index<S: RandomSource>(
    bank: &QuestionBank,
    topic: &str,
    level: Level,
    rng: &mut S,
) -> Option<usize> {
    let len = bank.pool(topic, level).len();
    if len == 0 {
        return None;
    }
    Some(rng.next_index(len) % len)
}

/// A random question from the `(topic, level)` pool, or the sentinel question
/// when the pool is empty.
pub fn pick<S: RandomSource>(
    bank: &QuestionBank,
    topic: &str,
    level: Level,
    rng: &mut S,
) -> Question {
    pick_index(bank, topic, level, rng)
        .and_then(|index| bank.get(topic, level, index))
        .cloned()
        .unwrap_or_else(Question::sentinel)
}
