use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{EstimateRequest, EstimateResponse};
use crate::{error::ApiError, state::AppState};

pub fn estimate_routes() -> Router<AppState> {
    Router::new().route("/estimate-calories", post(estimate_calories))
}

#[instrument(skip(state, payload))]
pub async fn estimate_calories(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let Json(body) = payload?;

    let meal = body
        .meal
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::bad_request("Meal description is required"))?;
    let meal_type = body.meal_type.filter(|t| !t.trim().is_empty());

    let estimate = state
        .estimator
        .estimate(meal, meal_type.as_deref().unwrap_or("meal"))
        .await?;

    info!(calories = estimate.calories, meal_type = ?meal_type, "meal estimated");
    Ok(Json(EstimateResponse {
        success: true,
        calories: estimate.calories,
        breakdown: estimate.breakdown,
        meal_type: meal_type.unwrap_or_else(|| "unknown".into()),
    }))
}
