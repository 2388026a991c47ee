use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only `DATABASE_URL` is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub model_url: String,
    pub model_timeout: Duration,
    pub port: u16,
    pub db_max_connections: u32,
    pub run_migrations: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            model_url: std::env::var("MODEL_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            model_timeout: Duration::from_secs(
                parse_env("MODEL_TIMEOUT_SECS", 5)
                    .context("MODEL_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            port: parse_env("PORT", 4000).context("PORT must be a valid port number")?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            run_migrations: parse_env("RUN_MIGRATIONS", true)
                .context("RUN_MIGRATIONS must be true or false")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}
