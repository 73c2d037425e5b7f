//! Daily and weekly calorie aggregation.
//!
//! Everything here is a pure function of an already-fetched record snapshot.

mod aggregate;
mod meal_type;
mod session;
mod window;

pub use aggregate::{aggregate, DailyTotals, MealBreakdown, MealTypeTotals};
pub use session::TodayCounters;
pub use window::{build_rolling_window, window_start, RollingDay};

#[cfg(test)]
pub(crate) use aggregate::tests::record;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn two_day_scenario_matches_expected_totals() {
        let records = [
            record(datetime!(2024-01-10 08:00 UTC), "breakfast", Some(300)),
            record(datetime!(2024-01-10 12:30 UTC), "lunch", Some(500)),
            record(datetime!(2024-01-11 19:00 UTC), "dinner", Some(700)),
        ];
        let reference = date!(2024 - 01 - 11);

        let (daily, by_type) = aggregate(&records, reference);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[&date!(2024 - 01 - 10)], 800);
        assert_eq!(daily[&date!(2024 - 01 - 11)], 700);
        assert_eq!(
            by_type[&date!(2024 - 01 - 10)],
            MealBreakdown { breakfast: 300, lunch: 500, dinner: 0 }
        );

        let window = build_rolling_window(&daily, reference);
        assert_eq!(window.len(), 7);
        assert_eq!(window[6].label, "Today");
        assert_eq!(window[6].total, 700);
        assert_eq!(window[5].date, date!(2024 - 01 - 10));
        assert_eq!(window[5].total, 800);
        assert!(window[..5].iter().all(|d| d.total == 0));

        let today = TodayCounters::from_totals(&by_type, reference);
        assert_eq!(today.dinner, 700);
        assert_eq!(today.total, 700);
    }

    #[test]
    fn single_day_records_leave_other_window_days_empty() {
        let records = [
            record(datetime!(2024-01-08 08:00 UTC), "breakfast", Some(250)),
            record(datetime!(2024-01-08 20:00 UTC), "dinner", Some(900)),
        ];
        let reference = date!(2024 - 01 - 11);
        let (daily, _) = aggregate(&records, reference);
        assert_eq!(daily.len(), 1);

        let window = build_rolling_window(&daily, reference);
        let non_zero: Vec<_> = window.iter().filter(|d| d.total > 0).collect();
        assert_eq!(non_zero.len(), 1);
        assert_eq!(non_zero[0].date, date!(2024 - 01 - 08));
        assert_eq!(non_zero[0].total, 1150);
    }
}
