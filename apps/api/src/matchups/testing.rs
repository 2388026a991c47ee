//! In-memory store and canned gateways for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matchups::store::MatchupStore;
use crate::model_client::{GatewayError, InferenceGateway};
use crate::models::matchup::{AnswerJson, MatchupRecord, MatchupRequest, MatchupResult};

#[derive(Default)]
pub struct MemoryStore {
    requests: Mutex<Vec<MatchupRequest>>,
    results: Mutex<HashMap<Uuid, MatchupResult>>,
    unavailable: bool,
}

impl MemoryStore {
    /// A store whose every operation fails like a lost database connection.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn insert_request_at(&self, question: &str, created_at: DateTime<Utc>) -> MatchupRequest {
        let request = MatchupRequest {
            id: Uuid::new_v4(),
            question: question.to_string(),
            created_at,
        };
        self.requests.lock().unwrap().push(request.clone());
        request
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn result_count(&self) -> usize {
        self.results.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn record(&self, request: &MatchupRequest) -> MatchupRecord {
        MatchupRecord {
            request: request.clone(),
            result: self.results.lock().unwrap().get(&request.id).cloned(),
        }
    }
}

#[async_trait]
impl MatchupStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }

    async fn create_request(&self, question: &str) -> Result<MatchupRequest, AppError> {
        self.check()?;
        Ok(self.insert_request_at(question, Utc::now()))
    }

    async fn create_result(
        &self,
        request_id: Uuid,
        answer: &AnswerJson,
    ) -> Result<MatchupResult, AppError> {
        self.check()?;
        let mut results = self.results.lock().unwrap();
        if results.contains_key(&request_id) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "request {request_id} already has a result"
            )));
        }
        let result = MatchupResult {
            id: Uuid::new_v4(),
            request_id,
            answer_json: answer.clone(),
            created_at: Utc::now(),
        };
        results.insert(request_id, result.clone());
        Ok(result)
    }

    async fn find_matchup(&self, id: Uuid) -> Result<Option<MatchupRecord>, AppError> {
        self.check()?;
        let requests = self.requests.lock().unwrap();
        Ok(requests.iter().find(|r| r.id == id).map(|r| self.record(r)))
    }

    async fn list_matchups(&self, limit: i64) -> Result<Vec<MatchupRecord>, AppError> {
        self.check()?;
        let mut requests = self.requests.lock().unwrap().clone();
        requests.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(requests
            .iter()
            .take(limit.max(0) as usize)
            .map(|r| self.record(r))
            .collect())
    }
}

/// Gateway returning a fixed answer, or failing on every call.
pub struct StubGateway {
    answer: Option<AnswerJson>,
    calls: AtomicUsize,
}

impl StubGateway {
    pub fn answering(answer: AnswerJson) -> Self {
        Self {
            answer: Some(answer),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn down() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceGateway for StubGateway {
    async fn infer(&self, _question: &str) -> Result<AnswerJson, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().ok_or(GatewayError::Status {
            status: 503,
            body: "model offline".to_string(),
        })
    }
}

pub fn sample_answer() -> AnswerJson {
    AnswerJson {
        pick: "SGA".to_string(),
        confidence: 0.64,
        reasons: vec!["Higher true shooting".to_string()],
        counter: vec!["Luka's playmaking load".to_string()],
        context_notes: vec!["Regular season only".to_string()],
        sources: Vec::new(),
    }
}
