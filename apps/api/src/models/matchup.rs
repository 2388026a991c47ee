use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reason reported when the inference service could not produce an answer.
pub const FALLBACK_REASON: &str = "Model service unavailable, using fallback";

/// Structured answer produced per matchup, either by the inference service
/// or by the fallback path. Field names are part of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerJson {
    pub pick: String,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub counter: Vec<String>,
    pub context_notes: Vec<String>,
    pub sources: Vec<String>,
}

impl AnswerJson {
    /// The fixed low-confidence answer substituted when inference fails.
    pub fn fallback() -> Self {
        Self {
            pick: "TBD".to_string(),
            confidence: 0.5,
            reasons: vec![FALLBACK_REASON.to_string()],
            counter: Vec::new(),
            context_notes: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Checks the invariants serde cannot express.
    pub fn check(&self) -> Result<(), String> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "confidence {} is outside [0, 1]",
                self.confidence
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupRequest {
    pub id: Uuid,
    pub question: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupResult {
    pub id: Uuid,
    pub request_id: Uuid,
    pub answer_json: AnswerJson,
    pub created_at: DateTime<Utc>,
}

/// A request together with its result, if one was ever stored.
/// Serialises flat: `{id, question, createdAt, result}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    #[serde(flatten)]
    pub request: MatchupRequest,
    pub result: Option<MatchupResult>,
}

/// Response body of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedMatchup {
    pub request: MatchupRequest,
    pub result: MatchupResult,
}
