use std::net::SocketAddr;
use std::path::Path;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{estimate, health, meals, users};

pub fn build_app(state: AppState) -> Router {
    let mut router = Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(users::router())
                .merge(meals::router())
                .merge(estimate::router()),
        )
        .route("/health", get(health::health));

    if let Some(dir) = state.config.static_dir.as_deref() {
        router = router
            .route_service("/", ServeFile::new(Path::new(dir).join("login.html")))
            .fallback_service(ServeDir::new(dir));
    }

    router
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn estimate_returns_calories_and_echoes_meal_type() {
        let (status, body) = post_json(
            "/api/estimate-calories",
            json!({ "meal": "2 eggs and toast", "mealType": "breakfast" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["calories"], 420);
        assert_eq!(body["mealType"], "breakfast");
        assert_eq!(body["breakdown"][0], "breakfast: 2 eggs and toast: 420 kcal");
    }

    #[tokio::test]
    async fn estimate_without_meal_type_uses_generic_hint() {
        let (status, body) = post_json("/api/estimate-calories", json!({ "meal": "ramen" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mealType"], "unknown");
        assert_eq!(body["breakdown"][0], "meal: ramen: 420 kcal");
    }

    #[tokio::test]
    async fn estimate_requires_a_meal() {
        let (status, body) = post_json("/api/estimate-calories", json!({ "meal": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Meal description is required");
    }

    #[tokio::test]
    async fn register_and_login_reject_short_ids() {
        for uri in ["/api/register", "/api/login"] {
            let (status, body) = post_json(uri, json!({ "userId": " ab " })).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body["error"],
                "Valid User ID is required (minimum 3 characters)"
            );
        }
    }

    #[tokio::test]
    async fn save_meal_reports_missing_fields() {
        let (status, body) = post_json(
            "/api/save-meal",
            json!({ "userId": "alice", "meal": "salad", "mealType": "lunch" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Missing required fields: userId, meal, mealType, calories"
        );
    }

    #[tokio::test]
    async fn save_meal_rejects_negative_calories() {
        let (status, body) = post_json(
            "/api/save-meal",
            json!({ "userId": "alice", "meal": "salad", "mealType": "lunch", "calories": -5 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn totals_and_history_require_user_id() {
        for uri in ["/api/get-meals", "/api/get-daily-totals"] {
            let (status, body) = post_json(uri, json!({})).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "userId is required");
        }
    }

    #[tokio::test]
    async fn bad_reference_date_is_rejected_before_querying() {
        let (status, body) = post_json(
            "/api/get-daily-totals",
            json!({ "userId": "alice", "referenceDate": "yesterday" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid date: yesterday");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
