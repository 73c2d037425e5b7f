use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description, Date, Duration};

use super::aggregate::DailyTotals;

/// Number of days covered by the chart series, reference day included.
const WINDOW_DAYS: i64 = 7;

const DAY_LABEL: &[FormatItem<'static>] =
    format_description!("[weekday repr:short] [day padding:none]");

/// One bar of the weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollingDay {
    pub label: String,
    pub date: Date,
    pub total: u64,
}

/// First day of the window ending at `reference`.
pub fn window_start(reference: Date) -> Date {
    reference.saturating_sub(Duration::days(WINDOW_DAYS - 1))
}

/// Always seven entries, oldest first, ending at `reference`.
/// Days without records are present with a zero total.
pub fn build_rolling_window(daily: &DailyTotals, reference: Date) -> Vec<RollingDay> {
    (0..WINDOW_DAYS)
        .rev()
        .map(|back| {
            let date = reference.saturating_sub(Duration::days(back));
            RollingDay {
                label: day_label(date, reference),
                date,
                total: daily.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

fn day_label(date: Date, reference: Date) -> String {
    if date == reference {
        return "Today".to_string();
    }
    date.format(DAY_LABEL)
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn empty_totals_still_yield_seven_zero_days() {
        let window = build_rolling_window(&DailyTotals::new(), date!(2024 - 01 - 11));
        assert_eq!(window.len(), 7);
        assert!(window.iter().all(|d| d.total == 0));
        assert_eq!(window[0].date, date!(2024 - 01 - 05));
        assert_eq!(window[6].date, date!(2024 - 01 - 11));
    }

    #[test]
    fn dates_are_ascending_and_consecutive() {
        let window = build_rolling_window(&DailyTotals::new(), date!(2024 - 03 - 01));
        for pair in window.windows(2) {
            assert_eq!(pair[0].date.next_day(), Some(pair[1].date));
        }
        // crosses the leap day
        assert_eq!(window[5].date, date!(2024 - 02 - 29));
    }

    #[test]
    fn labels_use_weekday_and_unpadded_day() {
        let window = build_rolling_window(&DailyTotals::new(), date!(2024 - 01 - 11));
        let labels: Vec<_> = window.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Fri 5", "Sat 6", "Sun 7", "Mon 8", "Tue 9", "Wed 10", "Today"]
        );
    }

    #[test]
    fn out_of_window_dates_are_ignored() {
        let mut daily = DailyTotals::new();
        daily.insert(date!(2024 - 01 - 01), 999);
        daily.insert(date!(2024 - 01 - 12), 888);
        daily.insert(date!(2024 - 01 - 09), 300);

        let window = build_rolling_window(&daily, date!(2024 - 01 - 11));
        assert_eq!(window.iter().map(|d| d.total).sum::<u64>(), 300);
        assert!(window.iter().all(|d| d.date != date!(2024 - 01 - 01)));
        assert!(window.iter().all(|d| d.date != date!(2024 - 01 - 12)));
    }

    #[test]
    fn window_length_is_independent_of_input_size() {
        let mut daily = DailyTotals::new();
        let mut day = date!(2021 - 01 - 01);
        for _ in 0..1000 {
            daily.insert(day, 10);
            day = day.next_day().unwrap();
        }
        let reference = date!(2022 - 06 - 15);
        let window = build_rolling_window(&daily, reference);
        assert_eq!(window.len(), 7);
        assert_eq!(window.last().map(|d| d.date), Some(reference));
    }

    #[test]
    fn window_start_is_six_days_back() {
        assert_eq!(window_start(date!(2024 - 01 - 11)), date!(2024 - 01 - 05));
    }
}
