use std::sync::Arc;

use crate::matchups::store::MatchupStore;
use crate::model_client::InferenceGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL in production, in-memory in unit tests.
    pub store: Arc<dyn MatchupStore>,
    pub gateway: Arc<dyn InferenceGateway>,
}
