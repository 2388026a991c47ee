pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matchups::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/matchups",
            post(handlers::handle_create).get(handlers::handle_list),
        )
        .route("/matchups/:id", get(handlers::handle_get))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::matchups::testing::{sample_answer, MemoryStore, StubGateway};
    use crate::model_client::InferenceGateway;

    fn app_with(store: Arc<MemoryStore>, gateway: impl InferenceGateway + 'static) -> Router {
        build_router(AppState {
            store,
            gateway: Arc::new(gateway),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let app = app_with(Arc::new(MemoryStore::default()), StubGateway::down());
        let (status, body) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_health_fails_when_store_is_down() {
        let app = app_with(Arc::new(MemoryStore::unavailable()), StubGateway::down());
        let (status, _) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_submit_with_gateway_down_returns_fallback() {
        let store = Arc::new(MemoryStore::default());
        let app = app_with(store.clone(), StubGateway::down());

        let (status, body) =
            send(app, post_json("/matchups", r#"{"question":"SGA vs Luka"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["request"]["question"], "SGA vs Luka");
        assert_eq!(body["result"]["answerJson"]["pick"], "TBD");
        assert_eq!(body["result"]["answerJson"]["confidence"], 0.5);
        assert_eq!(
            body["result"]["requestId"],
            body["request"]["id"],
        );
        assert_eq!(store.result_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_rejects_short_missing_and_invalid_bodies() {
        let store = Arc::new(MemoryStore::default());
        for raw in [r#"{"question":"ab"}"#, r#"{}"#, r#"{"question":7}"#, "not json"] {
            let app = app_with(store.clone(), StubGateway::answering(sample_answer()));
            let (status, body) = send(app, post_json("/matchups", raw)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {raw}");
            assert!(body["error"].is_object());
        }
        assert_eq!(store.request_count(), 0);
    }

    #[tokio::test]
    async fn test_list_limit_is_capped_at_one_hundred() {
        let store = Arc::new(MemoryStore::default());
        let base = Utc::now();
        for i in 0..130 {
            store.insert_request_at(&format!("matchup {i}"), base + Duration::seconds(i));
        }
        let app = app_with(store, StubGateway::down());

        let (status, body) = send(app, get("/matchups?limit=150")).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 100);
        assert_eq!(rows[0]["question"], "matchup 129");
        assert_eq!(rows[0]["result"], Value::Null);
    }

    #[tokio::test]
    async fn test_list_defaults_to_twenty() {
        let store = Arc::new(MemoryStore::default());
        for i in 0..25 {
            store.insert_request_at(&format!("matchup {i}"), Utc::now());
        }
        let app = app_with(store, StubGateway::down());

        let (_, body) = send(app, get("/matchups")).await;
        assert_eq!(body.as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let app = app_with(Arc::new(MemoryStore::default()), StubGateway::down());
        let (status, body) = send(app, get("/matchups/unknown-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_created_matchup_is_retrievable() {
        let store = Arc::new(MemoryStore::default());

        let app = app_with(store.clone(), StubGateway::answering(sample_answer()));
        let (_, created) =
            send(app, post_json("/matchups", r#"{"question":"Jokic vs Embiid"}"#)).await;
        let id = created["request"]["id"].as_str().unwrap().to_string();

        let app = app_with(store, StubGateway::down());
        let (status, fetched) = send(app, get(&format!("/matchups/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], id.as_str());
        assert_eq!(fetched["question"], "Jokic vs Embiid");
        assert_eq!(
            fetched["result"]["answerJson"],
            created["result"]["answerJson"]
        );
    }
}
