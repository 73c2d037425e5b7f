use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{UserIdRequest, UserResponse},
        repo_types::User,
        services::normalize_user_id,
    },
};

const TAKEN: &str =
    "This User ID is already taken. Please choose a different one or login instead.";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<UserIdRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(body) = payload?;
    let user_id = normalize_user_id(body.user_id.as_deref())?;

    let existing = User::find(&state.db, user_id)
        .await
        .map_err(|e| ApiError::database("Database error while checking user", e))?;
    if existing.is_some() {
        warn!(%user_id, "user id already registered");
        return Err(ApiError::bad_request(TAKEN));
    }

    let user = match User::create(&state.db, user_id).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(%user_id, "user id registered concurrently");
            return Err(ApiError::bad_request(TAKEN));
        }
        Err(e) => return Err(ApiError::database("Failed to create user in database", e)),
    };

    info!(user_id = %user.user_id, "user registered");
    Ok(Json(UserResponse {
        success: true,
        user_id: user.user_id,
        created_at: user.created_at,
        message: "User registered successfully",
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<UserIdRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(body) = payload?;
    let user_id = normalize_user_id(body.user_id.as_deref())?;

    let user = User::find(&state.db, user_id)
        .await
        .map_err(|e| ApiError::database("Database error while checking user", e))?
        .ok_or_else(|| {
            warn!(%user_id, "login for unknown user id");
            ApiError::NotFound("User ID not found. Please register first.".into())
        })?;

    info!(user_id = %user.user_id, "user logged in");
    Ok(Json(UserResponse {
        success: true,
        user_id: user.user_id,
        created_at: user.created_at,
        message: "Login successful",
    }))
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.is_unique_violation()
    )
}
