use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::{db, state::AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub openai: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db::ping(&state.db).await {
        Ok(()) => "connected",
        Err(e) => {
            let detail = format!("{e:#}");
            warn!(error = %detail, "health check could not reach database");
            "disconnected"
        }
    };
    let openai = if state.estimator.is_configured() {
        "configured"
    } else {
        "not configured"
    };

    Json(HealthResponse {
        status: "ok",
        database,
        openai,
    })
}
