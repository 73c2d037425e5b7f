use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::dto::{
    DailyTotalsRequest, DailyTotalsResponse, ListMealsRequest, ListMealsResponse, MealItem,
    SaveMealRequest, SaveMealResponse,
};
use super::repo;
use super::repo_types::NewMeal;
use super::services::{daily_summary, parse_bound, parse_date, RangeEnd};
use crate::{error::ApiError, state::AppState};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/save-meal", post(save_meal))
        .route("/get-meals", post(get_meals))
        .route("/get-daily-totals", post(get_daily_totals))
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require_user_id(value: &Option<String>) -> Result<&str, ApiError> {
    required(value).ok_or_else(|| ApiError::bad_request("userId is required"))
}

#[instrument(skip(state, payload))]
pub async fn save_meal(
    State(state): State<AppState>,
    payload: Result<Json<SaveMealRequest>, JsonRejection>,
) -> Result<Json<SaveMealResponse>, ApiError> {
    let Json(body) = payload?;

    let (Some(user_id), Some(meal), Some(meal_type), Some(calories)) = (
        required(&body.user_id),
        required(&body.meal),
        required(&body.meal_type),
        body.calories,
    ) else {
        return Err(ApiError::bad_request(
            "Missing required fields: userId, meal, mealType, calories",
        ));
    };
    let calories = i32::try_from(calories)
        .ok()
        .filter(|c| *c >= 0)
        .ok_or_else(|| ApiError::bad_request("calories must be a non-negative integer"))?;

    let new = NewMeal {
        user_id,
        meal,
        meal_type,
        calories,
    };
    let record = repo::insert(&state.db, &new)
        .await
        .map_err(|e| ApiError::database("Failed to save meal to database", e))?;

    info!(%user_id, %meal_type, calories, "meal saved");
    Ok(Json(SaveMealResponse {
        success: true,
        message: "Meal saved successfully",
        data: vec![MealItem::from(record)],
    }))
}

#[instrument(skip(state, payload))]
pub async fn get_meals(
    State(state): State<AppState>,
    payload: Result<Json<ListMealsRequest>, JsonRejection>,
) -> Result<Json<ListMealsResponse>, ApiError> {
    let Json(body) = payload?;
    let user_id = require_user_id(&body.user_id)?;

    let start = required(&body.start_date)
        .map(|s| parse_bound(s, RangeEnd::Start))
        .transpose()?;
    let end = required(&body.end_date)
        .map(|s| parse_bound(s, RangeEnd::End))
        .transpose()?;

    let meals = repo::list_by_user(&state.db, user_id, start, end)
        .await
        .map_err(|e| ApiError::database("Failed to fetch meals from database", e))?;

    Ok(Json(ListMealsResponse {
        success: true,
        meals: meals.into_iter().map(MealItem::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn get_daily_totals(
    State(state): State<AppState>,
    payload: Result<Json<DailyTotalsRequest>, JsonRejection>,
) -> Result<Json<DailyTotalsResponse>, ApiError> {
    let Json(body) = payload?;
    let user_id = require_user_id(&body.user_id)?;
    let reference = match required(&body.reference_date) {
        Some(raw) => parse_date(raw)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let summary = daily_summary(&state.db, user_id, reference)
        .await
        .map_err(|e| ApiError::database("Failed to fetch daily totals", e))?;

    Ok(Json(DailyTotalsResponse::from(summary)))
}
