pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    routing::{get, post},
    Router,
};
use practice_core::{pick_index, DifficultyPolicy, QuestionBank, RngSource};
use rand::{rngs::StdRng, SeedableRng};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::attempts::{AttemptStore, MemoryStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
    pub policy: DifficultyPolicy,
    pub store: Arc<dyn AttemptStore>,
    rng: Arc<Mutex<RngSource<StdRng>>>,
}

impl AppState {
    /// Build state with the default policy. A seed makes selection reproducible.
    pub fn new(bank: QuestionBank, store: Arc<dyn AttemptStore>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            bank: Arc::new(bank),
            policy: DifficultyPolicy::default(),
            store,
            rng: Arc::new(Mutex::new(RngSource::new(rng))),
        }
    }

    /// Pick a question index for `(topic, level)`; `None` for an empty pool.
    pub fn pick_index(&self, topic: &str, level: u32) -> Option<usize> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick_index(&self.bank, topic, level, &mut *rng)
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/topics", get(routes::topics::list))
        .route("/api/practice/question", get(routes::practice::question))
        .route("/api/practice/answer", post(routes::practice::answer))
        .route("/api/progress", get(routes::progress::get))
        .route("/api/attempts", get(routes::attempts::recent))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let bank = QuestionBank::builtin()?;
    tracing::info!(
        "Loaded question bank: {} questions across {} topics",
        bank.len(),
        bank.topics().count()
    );

    let store: Arc<dyn AttemptStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;

            Arc::new(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, attempts will be kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(bank, store, config.seed);

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
