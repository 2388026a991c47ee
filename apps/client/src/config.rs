use std::num::NonZeroU32;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub history_limit: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: std::env::var("API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:4000".to_string()),
            history_limit: parse_history_limit(std::env::var("HISTORY_LIMIT").ok().as_deref())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

fn parse_history_limit(raw: Option<&str>) -> Result<u32> {
    let limit = raw
        .unwrap_or("25")
        .trim()
        .parse::<NonZeroU32>()
        .context("HISTORY_LIMIT must be a positive integer")?;
    Ok(limit.get())
}
