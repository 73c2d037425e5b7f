use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::repo_types::MealRecord;
use crate::meals::services::DailySummary;
use crate::totals::{MealBreakdown, TodayCounters};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMealRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub meal: Option<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub calories: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMealsRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotalsRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    /// `YYYY-MM-DD`; defaults to the current UTC date.
    #[serde(default)]
    pub reference_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    pub id: Uuid,
    pub user_id: String,
    pub meal: String,
    pub meal_type: Option<String>,
    pub calories: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<MealRecord> for MealItem {
    fn from(r: MealRecord) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            meal: r.meal,
            meal_type: r.meal_type,
            calories: r.calories,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveMealResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: Vec<MealItem>,
}

#[derive(Debug, Serialize)]
pub struct ListMealsResponse {
    pub success: bool,
    pub meals: Vec<MealItem>,
}

#[derive(Debug, Serialize)]
pub struct RollingDayItem {
    pub label: String,
    pub date: String,
    pub total: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotalsResponse {
    pub success: bool,
    pub reference_date: String,
    pub daily_totals: BTreeMap<String, u64>,
    pub meal_type_totals: BTreeMap<String, MealBreakdown>,
    pub rolling_window: Vec<RollingDayItem>,
    pub today: TodayCounters,
}

impl From<DailySummary> for DailyTotalsResponse {
    fn from(s: DailySummary) -> Self {
        Self {
            success: true,
            reference_date: s.reference.to_string(),
            daily_totals: s
                .daily
                .into_iter()
                .map(|(date, total)| (date.to_string(), total))
                .collect(),
            meal_type_totals: s
                .by_type
                .into_iter()
                .map(|(date, day)| (date.to_string(), day))
                .collect(),
            rolling_window: s
                .window
                .into_iter()
                .map(|d| RollingDayItem {
                    label: d.label,
                    date: d.date.to_string(),
                    total: d.total,
                })
                .collect(),
            today: s.today,
        }
    }
}
