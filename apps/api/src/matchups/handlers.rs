use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{AppError, ValidationDetail};
use crate::matchups::service::{
    clamp_limit, create_matchup, get_matchup, list_matchups, question_from_body,
};
use crate::models::matchup::{CreatedMatchup, MatchupRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    // Kept as text so a non-numeric value falls back to the default instead of a 400.
    pub limit: Option<String>,
}

/// POST /matchups
pub async fn handle_create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedMatchup>), AppError> {
    let Json(body) = body.map_err(|rejection| {
        AppError::Validation(ValidationDetail::form(rejection.body_text()))
    })?;
    let question = question_from_body(&body)?;

    let created = create_matchup(state.store.as_ref(), state.gateway.as_ref(), &question).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /matchups?limit=N
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<MatchupRecord>>, AppError> {
    let limit = clamp_limit(params.limit.as_deref());
    let rows = list_matchups(state.store.as_ref(), limit).await?;
    Ok(Json(rows))
}

/// GET /matchups/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MatchupRecord>, AppError> {
    let record = get_matchup(state.store.as_ref(), &id).await?;
    Ok(Json(record))
}
