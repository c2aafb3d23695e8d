//! Process configuration read from the environment.

use anyhow::Context;

/// Server settings. Practice policy constants are fixed at build time and
/// do not appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// PostgreSQL URL. Without one, attempts are kept in memory only.
    pub database_url: Option<String>,
    /// Seed for question selection, for reproducible runs.
    pub seed: Option<u64>,
}

impl Config {
    /// Read `HOST`, `PORT`, `DATABASE_URL` and `PRACTICE_SEED`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = value("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match value("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?,
            None => 3000,
        };
        let seed = value("PRACTICE_SEED")
            .map(|seed| {
                seed.trim()
                    .parse()
                    .with_context(|| format!("PRACTICE_SEED must be an unsigned integer, got {seed:?}"))
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            database_url: value("DATABASE_URL"),
            seed,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
