//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to an in-memory attempt store
//! - Helper functions for building request bodies
//!
//! Only the database tests need PostgreSQL (set DATABASE_URL); they are
//! ignored by default.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use adaptive_practice_backend::services::attempts::MemoryStore;
use adaptive_practice_backend::AppState;
use practice_core::{Question, QuestionBank};

/// Seed used for question selection in tests.
pub const SEED: u64 = 7;

/// Test context holding the in-memory store and the router.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub bank: QuestionBank,
    app: Router,
}

impl TestContext {
    /// Create a context backed by the built-in bank and an empty store.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Create a context whose attempt writes always fail.
    pub fn with_failing_store(reason: &str) -> Self {
        Self::with_store(MemoryStore::failing(reason))
    }

    fn with_store(store: MemoryStore) -> Self {
        let bank = QuestionBank::builtin().expect("built-in bank must load");
        let store = Arc::new(store);
        let state = AppState::new(bank.clone(), store.clone(), Some(SEED));

        Self {
            store,
            bank,
            app: adaptive_practice_backend::router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Look up the question the server referred to.
    pub fn question(&self, topic: &str, level: u32, index: usize) -> &Question {
        self.bank
            .get(topic, level, index)
            .expect("server returned an index outside the pool")
    }
}
