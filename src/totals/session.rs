use serde::Serialize;
use time::Date;

use super::aggregate::{MealBreakdown, MealTypeTotals};

/// Running per-meal counters for the reference day.
///
/// Rebuilt from a fresh aggregation after every mutation instead of being
/// incremented in place, so it always matches the stored records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodayCounters {
    pub breakfast: u64,
    pub lunch: u64,
    pub dinner: u64,
    pub total: u64,
}

impl TodayCounters {
    pub fn from_totals(by_type: &MealTypeTotals, reference: Date) -> Self {
        let day = by_type.get(&reference).copied().unwrap_or_default();
        Self::from(day)
    }
}

impl From<MealBreakdown> for TodayCounters {
    fn from(day: MealBreakdown) -> Self {
        Self {
            breakfast: day.breakfast,
            lunch: day.lunch,
            dinner: day.dinner,
            total: day.total(),
        }
    }
}
