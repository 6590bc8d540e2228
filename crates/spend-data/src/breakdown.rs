//! Spending per weekday and category.

use chrono::NaiveDate;
use spend_core::calendar::{DateRange, WEEKDAY_NAMES};
use spend_core::error::Result;
use spend_core::models::{ExpenseRecord, WeekdayTotal};

use crate::series::unique_in_order;

/// Totals for each category (supplied order) and weekday (Sunday first).
///
/// Every category gets all seven weekdays, zero where nothing was spent.
pub fn weekday_totals(
    records: &[ExpenseRecord],
    categories: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<WeekdayTotal>> {
    let range = DateRange::new(start, end)?;
    let labels = unique_in_order(categories);

    let mut sums = vec![[0.0_f64; 7]; labels.len()];
    for record in records.iter().filter(|r| range.contains(r.date)) {
        if let Some(idx) = labels.iter().position(|l| *l == record.category) {
            let weekday = record.calendar().weekday_num as usize;
            sums[idx][weekday] += record.amount;
        }
    }

    Ok(labels
        .iter()
        .zip(sums)
        .flat_map(|(category, days)| {
            days.into_iter()
                .enumerate()
                .map(move |(weekday, total)| WeekdayTotal {
                    category: category.to_string(),
                    weekday_num: weekday as u32,
                    weekday_name: WEEKDAY_NAMES[weekday].to_string(),
                    total,
                })
        })
        .collect())
}
