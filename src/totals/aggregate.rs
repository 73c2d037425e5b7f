use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, UtcOffset};

use super::meal_type::MealType;
use crate::meals::repo_types::MealRecord;

/// Calendar date -> calories logged that day.
pub type DailyTotals = BTreeMap<Date, u64>;

/// Calendar date -> per-meal-type subtotals.
pub type MealTypeTotals = BTreeMap<Date, MealBreakdown>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MealBreakdown {
    pub breakfast: u64,
    pub lunch: u64,
    pub dinner: u64,
}

impl MealBreakdown {
    fn add(&mut self, meal_type: MealType, calories: u64) {
        match meal_type {
            MealType::Breakfast => self.breakfast += calories,
            MealType::Lunch => self.lunch += calories,
            MealType::Dinner => self.dinner += calories,
            MealType::Unknown => {}
        }
    }

    pub fn total(&self) -> u64 {
        self.breakfast + self.lunch + self.dinner
    }
}

/// UTC calendar date a record is bucketed under.
fn bucket_date(record: &MealRecord) -> Date {
    record.created_at.to_offset(UtcOffset::UTC).date()
}

/// Sums records into per-day totals and per-day meal-type subtotals.
///
/// Only dates that occur in `records` are present in either map. Missing or
/// negative calorie values contribute zero. The caller restricts `records` to
/// the window ending at the reference date; nothing is filtered here, so
/// over-fetched days are kept.
pub fn aggregate(records: &[MealRecord], _reference: Date) -> (DailyTotals, MealTypeTotals) {
    let mut daily = DailyTotals::new();
    let mut by_type = MealTypeTotals::new();

    for record in records {
        let date = bucket_date(record);
        let calories = record.calories.map_or(0, |c| u64::try_from(c).unwrap_or(0));

        *daily.entry(date).or_insert(0) += calories;
        by_type
            .entry(date)
            .or_default()
            .add(MealType::from(record.meal_type.as_deref()), calories);
    }

    (daily, by_type)
}
