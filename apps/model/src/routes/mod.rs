pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::infer::handle_infer;

pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/infer", post(handle_infer))
}
