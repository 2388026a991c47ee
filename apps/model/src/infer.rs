//! Placeholder inference: echoes the question back inside a well-formed answer.
//!
//! The answer shape matches what the API's model client expects. No trained
//! model is loaded yet.

use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const MIN_QUESTION_CHARS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct InferRequest {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferResponse {
    pub pick: String,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub counter: Vec<String>,
    pub context_notes: Vec<String>,
    pub sources: Vec<String>,
}

pub fn infer(question: &str) -> Result<InferResponse, ModelError> {
    if question.chars().count() < MIN_QUESTION_CHARS {
        return Err(ModelError::UnprocessableEntity(format!(
            "question must contain at least {MIN_QUESTION_CHARS} characters"
        )));
    }

    Ok(InferResponse {
        pick: "TBD".to_string(),
        confidence: 0.55,
        reasons: vec![
            "Model service wired up successfully".to_string(),
            format!("Received question: {question}"),
        ],
        counter: Vec::new(),
        context_notes: vec!["Placeholder answer; swap in a trained model".to_string()],
        sources: Vec::new(),
    })
}

/// POST /infer
pub async fn handle_infer(
    body: Result<Json<InferRequest>, JsonRejection>,
) -> Result<Json<InferResponse>, ModelError> {
    let Json(request) =
        body.map_err(|rejection| ModelError::UnprocessableEntity(rejection.body_text()))?;
    Ok(Json(infer(&request.question)?))
}
