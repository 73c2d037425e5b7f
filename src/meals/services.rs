use sqlx::PgPool;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, macros::time, Date,
    OffsetDateTime,
};

use crate::error::ApiError;
use crate::meals::{repo, repo_types::MealRecord};
use crate::totals::{
    aggregate, build_rolling_window, window_start, DailyTotals, MealTypeTotals, RollingDay,
    TodayCounters,
};

/// Which end of a date range a bare `YYYY-MM-DD` should snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Start,
    End,
}

/// Accepts an RFC 3339 timestamp or a plain calendar date (UTC).
pub fn parse_bound(raw: &str, end: RangeEnd) -> Result<OffsetDateTime, ApiError> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }
    let date = parse_date(raw)?;
    let at = match end {
        RangeEnd::Start => date.midnight(),
        RangeEnd::End => date.with_time(time!(23:59:59.999999999)),
    };
    Ok(at.assume_utc())
}

pub fn parse_date(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::bad_request(format!("Invalid date: {raw}")))
}

/// Everything the dashboard needs for one reference day.
#[derive(Debug, Clone)]
pub struct DailySummary {
    pub reference: Date,
    pub daily: DailyTotals,
    pub by_type: MealTypeTotals,
    pub window: Vec<RollingDay>,
    pub today: TodayCounters,
}

pub fn summarize(records: &[MealRecord], reference: Date) -> DailySummary {
    let (daily, by_type) = aggregate(records, reference);
    let window = build_rolling_window(&daily, reference);
    let today = TodayCounters::from_totals(&by_type, reference);
    DailySummary {
        reference,
        daily,
        by_type,
        window,
        today,
    }
}

/// Start of the first day shown in the rolling window, in UTC.
pub fn fetch_start(reference: Date) -> OffsetDateTime {
    window_start(reference).midnight().assume_utc()
}

pub async fn daily_summary(
    db: &PgPool,
    user_id: &str,
    reference: Date,
) -> anyhow::Result<DailySummary> {
    let records = repo::list_since(db, user_id, fetch_start(reference)).await?;
    Ok(summarize(&records, reference))
}
