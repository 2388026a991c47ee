//! Persistence for matchup requests and their results.
//!
//! Append-only: there is no update or delete path. Request and result are two
//! independent writes, so a request may legitimately exist without a result.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::matchup::{AnswerJson, MatchupRecord, MatchupRequest, MatchupResult};

/// Storage backend for matchups.
///
/// Carried in `AppState` as `Arc<dyn MatchupStore>`.
#[async_trait]
pub trait MatchupStore: Send + Sync {
    /// Trivial round-trip used by the health check.
    async fn ping(&self) -> Result<(), AppError>;

    async fn create_request(&self, question: &str) -> Result<MatchupRequest, AppError>;

    async fn create_result(
        &self,
        request_id: Uuid,
        answer: &AnswerJson,
    ) -> Result<MatchupResult, AppError>;

    async fn find_matchup(&self, id: Uuid) -> Result<Option<MatchupRecord>, AppError>;

    /// Newest first by `created_at`, at most `limit` rows.
    async fn list_matchups(&self, limit: i64) -> Result<Vec<MatchupRecord>, AppError>;
}

#[derive(Debug, FromRow)]
struct RequestRow {
    id: Uuid,
    question: String,
    created_at: DateTime<Utc>,
}

impl From<RequestRow> for MatchupRequest {
    fn from(row: RequestRow) -> Self {
        MatchupRequest {
            id: row.id,
            question: row.question,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ResultRow {
    id: Uuid,
    request_id: Uuid,
    answer_json: Json<AnswerJson>,
    created_at: DateTime<Utc>,
}

impl From<ResultRow> for MatchupResult {
    fn from(row: ResultRow) -> Self {
        MatchupResult {
            id: row.id,
            request_id: row.request_id,
            answer_json: row.answer_json.0,
            created_at: row.created_at,
        }
    }
}

/// One request joined with its (optional) result.
#[derive(Debug, FromRow)]
struct RecordRow {
    id: Uuid,
    question: String,
    created_at: DateTime<Utc>,
    result_id: Option<Uuid>,
    result_answer_json: Option<Json<AnswerJson>>,
    result_created_at: Option<DateTime<Utc>>,
}

impl From<RecordRow> for MatchupRecord {
    fn from(row: RecordRow) -> Self {
        let result = match (row.result_id, row.result_answer_json, row.result_created_at) {
            (Some(id), Some(answer), Some(created_at)) => Some(MatchupResult {
                id,
                request_id: row.id,
                answer_json: answer.0,
                created_at,
            }),
            _ => None,
        };
        MatchupRecord {
            request: MatchupRequest {
                id: row.id,
                question: row.question,
                created_at: row.created_at,
            },
            result,
        }
    }
}

const RECORD_SELECT: &str = r#"
    SELECT r.id, r.question, r.created_at,
           res.id          AS result_id,
           res.answer_json AS result_answer_json,
           res.created_at  AS result_created_at
    FROM matchup_requests r
    LEFT JOIN matchup_results res ON res.request_id = r.id
"#;

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgMatchupStore {
    pool: PgPool,
}

impl PgMatchupStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchupStore for PgMatchupStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_request(&self, question: &str) -> Result<MatchupRequest, AppError> {
        let row = sqlx::query_as::<_, RequestRow>(
            r#"
            INSERT INTO matchup_requests (id, question)
            VALUES ($1, $2)
            RETURNING id, question, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(question)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn create_result(
        &self,
        request_id: Uuid,
        answer: &AnswerJson,
    ) -> Result<MatchupResult, AppError> {
        let row = sqlx::query_as::<_, ResultRow>(
            r#"
            INSERT INTO matchup_results (id, request_id, answer_json)
            VALUES ($1, $2, $3)
            RETURNING id, request_id, answer_json, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request_id)
        .bind(Json(answer))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_matchup(&self, id: Uuid) -> Result<Option<MatchupRecord>, AppError> {
        let sql = format!("{RECORD_SELECT} WHERE r.id = $1");
        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(MatchupRecord::from))
    }

    async fn list_matchups(&self, limit: i64) -> Result<Vec<MatchupRecord>, AppError> {
        let sql = format!("{RECORD_SELECT} ORDER BY r.created_at DESC, r.id DESC LIMIT $1");
        let rows = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MatchupRecord::from).collect())
    }
}
