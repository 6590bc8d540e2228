//! Per-transaction rows behind the category distribution (box) plot.

use chrono::NaiveDate;
use spend_core::calendar::DateRange;
use spend_core::error::Result;
use spend_core::models::{CategorySpread, DistributionRow, ExpenseRecord};
use spend_core::stats::five_number_summary;

use crate::series::unique_in_order;

/// Records inside `[start, end]` whose category is one of `categories`.
///
/// No aggregation: one row per matching record, in input order.
pub fn extract_distribution(
    records: &[ExpenseRecord],
    categories: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DistributionRow>> {
    let range = DateRange::new(start, end)?;

    Ok(records
        .iter()
        .filter(|r| range.contains(r.date) && categories.contains(&r.category))
        .map(|r| DistributionRow {
            note: r.note.clone(),
            category: r.category.clone(),
            amount: r.amount,
            weekday_name: r.weekday_name(),
        })
        .collect())
}

/// Box-plot statistics per category, in the order of `categories`.
///
/// Categories without any rows are left out.
pub fn summarize_distribution(
    rows: &[DistributionRow],
    categories: &[String],
) -> Vec<CategorySpread> {
    unique_in_order(categories)
        .into_iter()
        .filter_map(|category| {
            let amounts: Vec<f64> = rows
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.amount)
                .collect();
            let summary = five_number_summary(&amounts)?;
            Some(CategorySpread {
                category: category.to_string(),
                count: amounts.len(),
                min: summary.min,
                q1: summary.q1,
                median: summary.median,
                q3: summary.q3,
                max: summary.max,
            })
        })
        .collect()
}
