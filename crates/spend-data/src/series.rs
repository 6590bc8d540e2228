//! Dense daily totals and trailing rolling averages per category.

use std::collections::HashMap;

use chrono::NaiveDate;
use spend_core::calendar::DateRange;
use spend_core::error::Result;
use spend_core::models::{ExpenseRecord, SeriesPoint};
use spend_core::stats::round_to;
use tracing::debug;

/// Decimal places kept on every rolling average.
pub const ROLLING_DECIMALS: u32 = 3;

// ── DailyTotals ───────────────────────────────────────────────────────────────

/// Spending summed per `(category, day)` within a date range.
#[derive(Debug, Default)]
pub struct DailyTotals<'a> {
    sums: HashMap<(&'a str, NaiveDate), f64>,
}

impl<'a> DailyTotals<'a> {
    /// Sum every record in `range`; records sharing a category and day add up.
    pub fn collect(records: &'a [ExpenseRecord], range: &DateRange) -> Self {
        let mut sums: HashMap<(&'a str, NaiveDate), f64> = HashMap::new();
        for record in records.iter().filter(|r| range.contains(r.date)) {
            *sums
                .entry((record.category.as_str(), record.date))
                .or_insert(0.0) += record.amount;
        }
        Self { sums }
    }

    /// Total for one category on one day, `0.0` when nothing was spent.
    pub fn get(&self, category: &str, date: NaiveDate) -> f64 {
        self.sums.get(&(category, date)).copied().unwrap_or(0.0)
    }

    /// One total per day of `range`, ascending, zeros filling the gaps.
    pub fn dense(&self, category: &str, range: &DateRange) -> Vec<f64> {
        range.days().map(|day| self.get(category, day)).collect()
    }
}

// ── Rolling mean ──────────────────────────────────────────────────────────────

/// Window actually used for a requested size; `0` behaves as `1`.
pub fn effective_window(window_days: u32) -> usize {
    window_days.max(1) as usize
}

/// Trailing mean over at most `window` values ending at each position.
///
/// The first `window - 1` positions average over the values available so
/// far, so the output has the same length as the input and never looks ahead.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let lo = (i + 1).saturating_sub(window);
            let slice = &values[lo..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

// ── Series builder ────────────────────────────────────────────────────────────

/// Build the rolling-average line for each requested category.
///
/// Blocks follow the order of `categories` (repeated labels are emitted
/// once), each holding one point per day of `[start, end]` in ascending
/// order. Fails with `InvalidRange` when `start > end`; an empty category
/// list yields an empty series.
pub fn build_rolling_series(
    records: &[ExpenseRecord],
    categories: &[String],
    start: NaiveDate,
    end: NaiveDate,
    window_days: u32,
) -> Result<Vec<SeriesPoint>> {
    let range = DateRange::new(start, end)?;
    let window = effective_window(window_days);
    let totals = DailyTotals::collect(records, &range);

    let mut points = Vec::with_capacity(categories.len() * range.num_days());
    for category in unique_in_order(categories) {
        let daily = totals.dense(category, &range);
        let averages = trailing_mean(&daily, window);
        points.extend(range.days().zip(averages).map(|(date, avg)| SeriesPoint {
            date,
            category: category.to_string(),
            rolling_average: round_to(avg, ROLLING_DECIMALS),
        }));
    }

    debug!(
        "Rolling series: {} categories x {} days, window {}",
        points.len() / range.num_days(),
        range.num_days(),
        window
    );

    Ok(points)
}

/// Labels in first-seen order without repeats.
pub(crate) fn unique_in_order(labels: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(labels.len());
    for label in labels {
        if !seen.contains(&label.as_str()) {
            seen.push(label.as_str());
        }
    }
    seen
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use spend_core::error::SpendError;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(date: NaiveDate, category: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            date,
            note: String::new(),
            category: category.to_string(),
            amount,
        }
    }

    fn cats(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn averages(points: &[SeriesPoint], category: &str) -> Vec<f64> {
        points
            .iter()
            .filter(|p| p.category == category)
            .map(|p| p.rolling_average)
            .collect()
    }

    // ── trailing_mean ─────────────────────────────────────────────────────────

    #[test]
    fn test_trailing_mean_partial_windows() {
        let out = trailing_mean(&[15.0, 0.0, 9.0, 3.0], 3);
        assert_eq!(out, vec![15.0, 7.5, 8.0, 4.0]);
    }

    #[test]
    fn test_trailing_mean_window_one_is_identity() {
        let values = [1.0, 2.0, 4.0];
        assert_eq!(trailing_mean(&values, 1), values.to_vec());
    }

    #[test]
    fn test_trailing_mean_window_larger_than_input() {
        let out = trailing_mean(&[2.0, 4.0, 6.0], 60);
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_trailing_mean_empty() {
        assert!(trailing_mean(&[], 5).is_empty());
    }

    #[test]
    fn test_effective_window_zero_is_one() {
        assert_eq!(effective_window(0), 1);
        assert_eq!(effective_window(1), 1);
        assert_eq!(effective_window(21), 21);
    }

    // ── build_rolling_series ──────────────────────────────────────────────────

    #[test]
    fn test_example_sums_same_day_and_fills_gaps() {
        let records = vec![
            rec(ymd(2021, 1, 1), "groceries", 10.0),
            rec(ymd(2021, 1, 1), "groceries", 5.0),
            rec(ymd(2021, 1, 3), "groceries", 9.0),
        ];
        let points = build_rolling_series(
            &records,
            &cats(&["groceries"]),
            ymd(2021, 1, 1),
            ymd(2021, 1, 3),
            3,
        )
        .unwrap();

        assert_eq!(averages(&points, "groceries"), vec![15.0, 7.5, 8.0]);
        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![ymd(2021, 1, 1), ymd(2021, 1, 2), ymd(2021, 1, 3)]);
    }

    #[test]
    fn test_one_entry_per_day_strictly_increasing() {
        let records = vec![rec(ymd(2021, 2, 10), "restaurant", 30.0)];
        let start = ymd(2021, 1, 15);
        let end = ymd(2021, 3, 14);
        let points =
            build_rolling_series(&records, &cats(&["restaurant"]), start, end, 14).unwrap();

        assert_eq!(points.len() as i64, (end - start).num_days() + 1);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(points.first().unwrap().date, start);
        assert_eq!(points.last().unwrap().date, end);
    }

    #[test]
    fn test_first_day_equals_its_amount_and_prefix_means() {
        let records = vec![
            rec(ymd(2021, 1, 1), "fuel", 6.0),
            rec(ymd(2021, 1, 2), "fuel", 3.0),
            rec(ymd(2021, 1, 3), "fuel", 0.75),
            rec(ymd(2021, 1, 4), "fuel", 2.25),
        ];
        let points =
            build_rolling_series(&records, &cats(&["fuel"]), ymd(2021, 1, 1), ymd(2021, 1, 4), 10)
                .unwrap();
        // k < window: mean of the first k+1 days.
        assert_eq!(averages(&points, "fuel"), vec![6.0, 4.5, 3.25, 3.0]);
    }

    #[test]
    fn test_full_window_drops_old_days() {
        let records: Vec<ExpenseRecord> = (1..=5)
            .map(|d| rec(ymd(2021, 1, d), "a", d as f64))
            .collect();
        let points =
            build_rolling_series(&records, &cats(&["a"]), ymd(2021, 1, 1), ymd(2021, 1, 5), 2)
                .unwrap();
        assert_eq!(averages(&points, "a"), vec![1.0, 1.5, 2.5, 3.5, 4.5]);
    }

    #[test]
    fn test_window_zero_means_no_smoothing() {
        let records = vec![
            rec(ymd(2021, 1, 1), "a", 4.0),
            rec(ymd(2021, 1, 3), "a", 8.0),
        ];
        let points =
            build_rolling_series(&records, &cats(&["a"]), ymd(2021, 1, 1), ymd(2021, 1, 3), 0)
                .unwrap();
        assert_eq!(averages(&points, "a"), vec![4.0, 0.0, 8.0]);
    }

    #[test]
    fn test_rounded_to_three_decimals() {
        let records = vec![rec(ymd(2021, 1, 1), "a", 10.0)];
        let points =
            build_rolling_series(&records, &cats(&["a"]), ymd(2021, 1, 1), ymd(2021, 1, 3), 3)
                .unwrap();
        assert_eq!(averages(&points, "a"), vec![10.0, 5.0, 3.333]);
    }

    #[test]
    fn test_rounding_ties_go_to_even() {
        // $1 over a 16-day window averages to exactly 0.0625.
        let records = vec![rec(ymd(2021, 1, 1), "a", 1.0)];
        let points =
            build_rolling_series(&records, &cats(&["a"]), ymd(2021, 1, 1), ymd(2021, 1, 16), 16)
                .unwrap();
        assert_eq!(points[15].rolling_average, 0.062);
    }

    #[test]
    fn test_records_outside_range_ignored() {
        let records = vec![
            rec(ymd(2020, 12, 31), "a", 100.0),
            rec(ymd(2021, 1, 2), "a", 4.0),
            rec(ymd(2021, 1, 3), "a", 100.0),
        ];
        let points =
            build_rolling_series(&records, &cats(&["a"]), ymd(2021, 1, 1), ymd(2021, 1, 2), 7)
                .unwrap();
        assert_eq!(averages(&points, "a"), vec![0.0, 2.0]);
    }

    #[test]
    fn test_category_blocks_follow_supplied_order() {
        let records = vec![
            rec(ymd(2021, 1, 1), "groceries", 1.0),
            rec(ymd(2021, 1, 1), "restaurant", 2.0),
        ];
        let points = build_rolling_series(
            &records,
            &cats(&["restaurant", "groceries", "restaurant"]),
            ymd(2021, 1, 1),
            ymd(2021, 1, 2),
            1,
        )
        .unwrap();

        let order: Vec<&str> = points.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(order, vec!["restaurant", "restaurant", "groceries", "groceries"]);
    }

    #[test]
    fn test_matching_is_exact() {
        let records = vec![rec(ymd(2021, 1, 1), "groceries", 5.0)];
        let points = build_rolling_series(
            &records,
            &cats(&["Groceries"]),
            ymd(2021, 1, 1),
            ymd(2021, 1, 1),
            1,
        )
        .unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].rolling_average, 0.0);
    }

    #[test]
    fn test_unknown_category_yields_zero_line() {
        let points =
            build_rolling_series(&[], &cats(&["travel"]), ymd(2021, 1, 1), ymd(2021, 1, 5), 3)
                .unwrap();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.rolling_average == 0.0));
    }

    #[test]
    fn test_empty_categories_empty_output() {
        let records = vec![rec(ymd(2021, 1, 1), "a", 1.0)];
        let points =
            build_rolling_series(&records, &[], ymd(2021, 1, 1), ymd(2021, 1, 9), 3).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_invalid_range() {
        let err = build_rolling_series(&[], &cats(&["a"]), ymd(2021, 1, 2), ymd(2021, 1, 1), 3)
            .unwrap_err();
        assert!(matches!(err, SpendError::InvalidRange { .. }));
    }

    #[test]
    fn test_single_day_range() {
        let records = vec![rec(ymd(2021, 5, 5), "a", 12.5)];
        let points =
            build_rolling_series(&records, &cats(&["a"]), ymd(2021, 5, 5), ymd(2021, 5, 5), 14)
                .unwrap();
        assert_eq!(averages(&points, "a"), vec![12.5]);
    }

    // ── DailyTotals ───────────────────────────────────────────────────────────

    #[test]
    fn test_daily_totals_dense_fills_zeros() {
        let records = vec![
            rec(ymd(2021, 1, 2), "a", 1.5),
            rec(ymd(2021, 1, 2), "a", 2.5),
            rec(ymd(2021, 1, 2), "b", 7.0),
        ];
        let range = DateRange::new(ymd(2021, 1, 1), ymd(2021, 1, 3)).unwrap();
        let totals = DailyTotals::collect(&records, &range);
        assert_eq!(totals.dense("a", &range), vec![0.0, 4.0, 0.0]);
        assert_eq!(totals.get("b", ymd(2021, 1, 2)), 7.0);
        assert_eq!(totals.get("c", ymd(2021, 1, 2)), 0.0);
    }
}
