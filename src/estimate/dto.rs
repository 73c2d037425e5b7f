use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    #[serde(default)]
    pub meal: Option<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub success: bool,
    pub calories: u32,
    pub breakdown: Vec<String>,
    pub meal_type: String,
}
