pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::recommendations::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such endpoint".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_get_recommendations),
        )
        .route(
            "/api/v1/analytics/events",
            get(handlers::handle_analytics_events),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::analytics::AnalyticsLog;
    use crate::config::Config;
    use crate::llm_client::testing::{completion, ScriptedTransport};
    use crate::llm_client::{LlmClient, DEFAULT_API_URL};
    use crate::recommendations::parser::fixtures::job_response;
    use crate::recommendations::store::testing::{job_row, MemoryRecordStore};
    use crate::recommendations::{RecommendationEngine, RecommendationService};

    fn app(store: MemoryRecordStore) -> (Router, Arc<MemoryRecordStore>, Arc<AnalyticsLog>) {
        let store = Arc::new(store);
        let transport = Arc::new(ScriptedTransport::new(vec![completion(&job_response(6))]));
        let engine = RecommendationEngine::new(LlmClient::with_transport(
            transport,
            Some("sk-test".to_string()),
        ));
        let analytics = Arc::new(AnalyticsLog::default());
        let state = AppState {
            recommendations: Arc::new(RecommendationService::new(store.clone(), engine)),
            store: store.clone(),
            analytics: analytics.clone(),
            config: Config {
                database_url: "postgres://localhost/career".to_string(),
                deepseek_api_key: Some("sk-test".to_string()),
                completion_api_url: DEFAULT_API_URL.to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
        };
        (build_router(state), store, analytics)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _, _) = app(MemoryRecordStore::default());
        let (status, body) =
            send(router, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "career-api");
    }

    #[tokio::test]
    async fn test_recommendations_are_served_tracked_and_stored() {
        let (router, store, analytics) = app(MemoryRecordStore::default());
        let user = Uuid::new_v4();

        let (status, body) = send(
            router,
            post_json(
                "/api/v1/recommendations",
                json!({"type": "job", "skills": ["Rust"], "location": "Nairobi", "user_id": user}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let items = body["recommendations"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0]["title"], "Backend Engineer 1");
        assert_eq!(items[0]["company"], "Safaricom PLC");
        assert!(items[0].get("kind").is_none());

        assert_eq!(store.written().len(), 1);
        assert_eq!(store.written()[0].kind, "job");
        let events = analytics.user_events(user);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "recommendations_requested");
        assert_eq!(events[0].metadata["count"], 6);
    }

    #[tokio::test]
    async fn test_catalog_records_take_priority() {
        let store = MemoryRecordStore {
            jobs: vec![
                job_row(1, "Cashier", "Nairobi", &["Excel"]),
                job_row(2, "Clerk", "Nairobi", &["Excel"]),
                job_row(3, "Teller", "Nairobi", &["Excel"]),
            ],
            ..Default::default()
        };
        let (router, _, _) = app(store);

        let (status, body) = send(
            router,
            post_json(
                "/api/v1/recommendations",
                json!({"kind": "job", "skills": ["excel"], "location": "Nairobi", "user_id": Uuid::new_v4()}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendations"]["items"][0]["title"], "Cashier");
    }

    #[tokio::test]
    async fn test_empty_skills_are_rejected() {
        let (router, store, _) = app(MemoryRecordStore::default());
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/recommendations",
                json!({"type": "course", "skills": ["  "], "location": "Nairobi", "user_id": Uuid::new_v4()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(store.read_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_location_is_rejected() {
        let (router, _, _) = app(MemoryRecordStore::default());
        let (status, _) = send(
            router,
            post_json(
                "/api/v1/recommendations",
                json!({"type": "job", "skills": ["Rust"], "location": " ", "user_id": Uuid::new_v4()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_padded_values_are_passed_through_untrimmed() {
        let (router, _, analytics) = app(MemoryRecordStore::default());
        let user = Uuid::new_v4();

        let (_, first) = send(
            router.clone(),
            post_json(
                "/api/v1/recommendations",
                json!({"type": "job", "skills": ["Rust"], "location": "Nairobi", "user_id": user}),
            ),
        )
        .await;
        let (status, second) = send(
            router,
            post_json(
                "/api/v1/recommendations",
                json!({"type": "job", "skills": [" Rust"], "location": "Nairobi ", "user_id": user}),
            ),
        )
        .await;

        // The padded request misses both caches and reaches the (now empty) upstream script.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["recommendations"]["items"][0]["title"], "Backend Engineer 1");
        assert_eq!(second["recommendations"]["items"][0]["title"], "Software Developer");

        let events = analytics.user_events(user);
        assert_eq!(events[1].metadata["skills"], json!([" Rust"]));
        assert_eq!(events[1].metadata["location"], "Nairobi ");
    }

    #[tokio::test]
    async fn test_unknown_kind_is_rejected() {
        let (router, _, _) = app(MemoryRecordStore::default());
        let (status, _) = send(
            router,
            post_json(
                "/api/v1/recommendations",
                json!({"type": "internship", "skills": ["Rust"], "location": "Nairobi", "user_id": Uuid::new_v4()}),
            ),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_history_write_failure_is_internal_error() {
        let store = MemoryRecordStore {
            fail_writes: true,
            ..Default::default()
        };
        let (router, _, _) = app(store);
        let (status, body) = send(
            router,
            post_json(
                "/api/v1/recommendations",
                json!({"type": "job", "skills": ["Rust"], "location": "Nairobi", "user_id": Uuid::new_v4()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_analytics_events_by_type_and_user() {
        let (router, _, analytics) = app(MemoryRecordStore::default());
        let user = Uuid::new_v4();
        analytics.track(user, "recommendations_requested", json!({}));
        analytics.track(Uuid::new_v4(), "recommendations_requested", json!({}));
        analytics.track(user, "profile_updated", json!({}));

        let (status, body) = send(
            router.clone(),
            Request::get("/api/v1/analytics/events?event=recommendations_requested")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, body) = send(
            router,
            Request::get(format!("/api/v1/analytics/events?user_id={user}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        let events = body.as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["event"], "profile_updated");
    }

    #[tokio::test]
    async fn test_analytics_requires_a_filter() {
        let (router, _, _) = app(MemoryRecordStore::default());
        let (status, _) = send(
            router,
            Request::get("/api/v1/analytics/events").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (router, _, _) = app(MemoryRecordStore::default());
        let (status, body) =
            send(router, Request::get("/api/v1/jobs").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
