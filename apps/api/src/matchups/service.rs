//! Matchup request pipeline: validate → persist request → infer → persist result.

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{AppError, ValidationDetail};
use crate::matchups::store::MatchupStore;
use crate::model_client::InferenceGateway;
use crate::models::matchup::{AnswerJson, CreatedMatchup, MatchupRecord};

pub const MIN_QUESTION_CHARS: usize = 3;
pub const DEFAULT_LIST_LIMIT: i64 = 20;
pub const MAX_LIST_LIMIT: i64 = 100;

/// Extracts `question` from a submission body, rejecting anything that is
/// not a string field.
pub fn question_from_body(body: &Value) -> Result<String, AppError> {
    let Some(object) = body.as_object() else {
        return Err(AppError::Validation(ValidationDetail::form(format!(
            "Expected object, received {}",
            json_type_name(body)
        ))));
    };
    match object.get("question") {
        None | Some(Value::Null) => Err(AppError::Validation(ValidationDetail::field(
            "question", "Required",
        ))),
        Some(Value::String(question)) => Ok(question.clone()),
        Some(other) => Err(AppError::Validation(ValidationDetail::field(
            "question",
            format!("Expected string, received {}", json_type_name(other)),
        ))),
    }
}

pub fn validate_question(question: &str) -> Result<(), AppError> {
    if question.chars().count() < MIN_QUESTION_CHARS {
        return Err(AppError::Validation(ValidationDetail::field(
            "question",
            format!("String must contain at least {MIN_QUESTION_CHARS} character(s)"),
        )));
    }
    Ok(())
}

/// Parses the `limit` query parameter. Missing or non-numeric values fall back
/// to the default; numeric values are clamped to `[1, MAX_LIST_LIMIT]`.
pub fn clamp_limit(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_LIST_LIMIT;
    };
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => (n.trunc() as i64).clamp(1, MAX_LIST_LIMIT),
        _ => DEFAULT_LIST_LIMIT,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Runs the full submission pipeline.
///
/// Gateway failures are absorbed into [`AnswerJson::fallback`]; only store
/// failures propagate once the request row exists.
pub async fn create_matchup(
    store: &dyn MatchupStore,
    gateway: &dyn InferenceGateway,
    question: &str,
) -> Result<CreatedMatchup, AppError> {
    validate_question(question)?;

    let request = store.create_request(question).await?;
    info!("Stored matchup request {}", request.id);

    let answer = match gateway.infer(question).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!(
                "Inference failed for request {}, using fallback answer: {e}",
                request.id
            );
            AnswerJson::fallback()
        }
    };

    let result = store.create_result(request.id, &answer).await?;
    info!(
        "Stored matchup result {} for request {} (pick: {})",
        result.id, request.id, result.answer_json.pick
    );

    Ok(CreatedMatchup { request, result })
}

pub async fn list_matchups(
    store: &dyn MatchupStore,
    limit: i64,
) -> Result<Vec<MatchupRecord>, AppError> {
    store.list_matchups(limit.clamp(1, MAX_LIST_LIMIT)).await
}

/// Looks up a matchup by its textual id. Ids that are not UUIDs cannot exist,
/// so they are reported as not found rather than as bad input.
pub async fn get_matchup(store: &dyn MatchupStore, id: &str) -> Result<MatchupRecord, AppError> {
    let not_found = || AppError::NotFound(format!("Matchup {id}"));
    let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;
    store.find_matchup(uuid).await?.ok_or_else(not_found)
}
