use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{parse_completion, CalorieEstimator, Estimate, EstimateError};
use crate::config::OpenAiConfig;

const SYSTEM_PROMPT: &str = "You are a nutrition expert who gives accurate calorie estimates. \
Reply with valid JSON only.";

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 300;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Estimator backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiEstimator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEstimator {
    pub fn new(config: &OpenAiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Provider error message from an error body, or the trimmed raw text.
fn upstream_message(text: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(text) {
        Ok(e) => e.error.message,
        Err(_) => text.trim().to_string(),
    }
}

pub(crate) fn user_prompt(meal: &str, meal_type: &str) -> String {
    format!(
        r#"Estimate the calories in the meal below.

Meal Type: {meal_type}
Meal Description: "{meal}"

Respond with JSON in exactly this shape:
{{
    "totalCalories": <number>,
    "breakdown": ["item 1: X kcal", "item 2: Y kcal"]
}}

Assume typical serving sizes and honour any quantities mentioned (for example "2 eggs")."#
    )
}

#[async_trait]
impl CalorieEstimator for OpenAiEstimator {
    #[instrument(skip(self, meal), fields(model = %self.model, meal_len = meal.len()))]
    async fn estimate(&self, meal: &str, meal_type: &str) -> Result<Estimate, EstimateError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(meal, meal_type),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let res = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = upstream_message(&res.text().await.unwrap_or_default());
            warn!(status = status.as_u16(), %message, "completion request rejected");
            return Err(EstimateError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = res.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(EstimateError::EmptyCompletion)?;

        debug!(content_len = content.len(), "completion received");
        parse_completion(&content)
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
