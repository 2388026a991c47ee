/// Model client — the single point of entry for calls to the inference service.
///
/// One attempt per question, bounded by the configured timeout. Callers decide
/// what to do on failure; the client never substitutes an answer itself.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::matchup::AnswerJson;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed model response: {0}")]
    Malformed(String),
}

/// Maps a question to a structured answer.
///
/// Carried in `AppState` as `Arc<dyn InferenceGateway>`.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    async fn infer(&self, question: &str) -> Result<AnswerJson, GatewayError>;
}

#[derive(Debug, Serialize)]
struct InferRequest<'a> {
    question: &'a str,
}

/// HTTP client for `POST {base_url}/infer`.
#[derive(Clone)]
pub struct ModelClient {
    client: Client,
    infer_url: String,
}

impl ModelClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            infer_url: format!("{}/infer", base_url.trim_end_matches('/')),
        })
    }

    pub fn infer_url(&self) -> &str {
        &self.infer_url
    }
}

#[async_trait]
impl InferenceGateway for ModelClient {
    async fn infer(&self, question: &str) -> Result<AnswerJson, GatewayError> {
        let response = self
            .client
            .post(&self.infer_url)
            .json(&InferRequest { question })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let answer: AnswerJson = serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        answer.check().map_err(GatewayError::Malformed)?;

        debug!(
            "Model answered: pick={}, confidence={:.2}",
            answer.pick, answer.confidence
        );

        Ok(answer)
    }
}
