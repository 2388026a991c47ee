//! HTTP client for the MatchUp API.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("History fetch failed: {0}")]
    History(u16),

    #[error("Load failed: {0}")]
    Load(u16),

    #[error("API error {status}: {body}")]
    Submit { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerJson {
    pub pick: String,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub counter: Vec<String>,
    pub context_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupResult {
    pub answer_json: AnswerJson,
}

/// A stored matchup as listed or fetched by id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupRow {
    pub id: String,
    pub question: String,
    pub created_at: DateTime<Utc>,
    pub result: Option<MatchupResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRequest {
    pub id: String,
}

/// Only the new id is read; the full record is fetched afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedMatchup {
    pub request: CreatedRequest,
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    question: &'a str,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list(&self, limit: u32) -> Result<Vec<MatchupRow>, ApiError> {
        let response = self
            .client
            .get(format!("{}/matchups", self.base_url))
            .query(&[("limit", limit)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::History(response.status().as_u16()));
        }
        let rows: Vec<MatchupRow> = response.json().await?;
        debug!("Fetched {} history rows", rows.len());
        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> Result<MatchupRow, ApiError> {
        let response = self
            .client
            .get(format!("{}/matchups/{}", self.base_url, id))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Load(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    pub async fn create(&self, question: &str) -> Result<CreatedMatchup, ApiError> {
        let response = self
            .client
            .post(format!("{}/matchups", self.base_url))
            .json(&CreateBody { question })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Submit {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
