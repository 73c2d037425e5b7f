use axum::{async_trait, Router};
use serde::Serialize;
use thiserror::Error;

use crate::state::AppState;

mod dto;
pub mod handlers;
mod openai;
mod parse;

pub use openai::OpenAiEstimator;
pub use parse::parse_completion;

/// Calorie estimate for one meal description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub calories: u32,
    pub breakdown: Vec<String>,
}

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("estimation service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("estimation service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("estimation service returned an empty completion")]
    EmptyCompletion,

    #[error("estimation service returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Turns a free-text meal description into a calorie estimate.
#[async_trait]
pub trait CalorieEstimator: Send + Sync {
    async fn estimate(&self, meal: &str, meal_type: &str) -> Result<Estimate, EstimateError>;

    fn is_configured(&self) -> bool {
        true
    }
}

pub fn router() -> Router<AppState> {
    handlers::estimate_routes()
}
