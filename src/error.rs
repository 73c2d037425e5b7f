use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::estimate::EstimateError;

/// Errors surfaced by HTTP handlers as `{ success: false, error, details? }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Database {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{0}")]
    Estimate(#[from] EstimateError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn database(message: &'static str, source: anyhow::Error) -> Self {
        ApiError::Database { message, source }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Estimate(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            ApiError::Database { message, source } => {
                let detail = format!("{source:#}");
                error!(error = %detail, "{}", message);
                Some(detail)
            }
            ApiError::Estimate(e) => {
                error!(error = %e, "calorie estimation failed");
                None
            }
            _ => None,
        };

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::database("db", anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(EstimateError::EmptyCompletion).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn database_error_keeps_message_and_details() {
        let err = ApiError::database(
            "Failed to save meal to database",
            anyhow::anyhow!("connection refused").context("insert meal"),
        );
        assert_eq!(err.to_string(), "Failed to save meal to database");
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
