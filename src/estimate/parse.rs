use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{Estimate, EstimateError};

lazy_static! {
    static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
    static ref FIRST_NUMBER: Regex = Regex::new(r"\d+").unwrap();
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEstimate {
    #[serde(default)]
    total_calories: Value,
    #[serde(default)]
    breakdown: Value,
}

/// Extracts an [`Estimate`] from a model completion.
///
/// The outermost `{...}` span is parsed as JSON. Without one, the first run
/// of digits is taken as the calorie count.
pub fn parse_completion(text: &str) -> Result<Estimate, EstimateError> {
    let text = text.trim();

    if let Some(m) = JSON_OBJECT.find(text) {
        let raw: RawEstimate = serde_json::from_str(m.as_str())?;
        return Ok(Estimate {
            calories: calories_from(&raw.total_calories),
            breakdown: breakdown_from(raw.breakdown),
        });
    }

    let calories = FIRST_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map_or(0, clamp_u32);
    Ok(Estimate {
        calories,
        breakdown: vec![format!("Estimated: {calories} kcal")],
    })
}

fn calories_from(value: &Value) -> u32 {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() && n > 0.0 => {
            let rounded = n.round();
            if rounded >= u32::MAX as f64 {
                u32::MAX
            } else {
                rounded as u32
            }
        }
        _ => 0,
    }
}

/// Arrays map item by item, a lone string becomes one item, anything else is empty.
fn breakdown_from(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    }
}

fn clamp_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
