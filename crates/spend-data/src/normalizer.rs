//! Raw export rows → canonical expense records.
//!
//! Rules run as whole-set passes in a fixed order: positional renaming,
//! budget-row removal, date parsing, category cleanup, amount parsing,
//! expense filtering and sign flip. Any malformed field aborts the load.

use chrono::NaiveDate;
use spend_core::calendar::parse_date;
use spend_core::error::{Result, SpendError};
use spend_core::models::{ExpenseRecord, RawRecord, RawTable, COLUMN_NAMES, DAILY_BUDGET_NOTE};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Turn a raw table into the canonical expense set.
///
/// Fails with [`SpendError::Schema`] unless the header and every row have
/// exactly four cells, with [`SpendError::DateParse`] or
/// [`SpendError::AmountParse`] on the first malformed field. An input with
/// no expenses left after filtering yields an empty set.
pub fn normalize(table: &RawTable) -> Result<Vec<ExpenseRecord>> {
    let records = rename_columns(table)?;
    let total = records.len();

    // Row numbers travel with each record so errors point into the file.
    let kept: Vec<(usize, RawRecord)> = records
        .into_iter()
        .enumerate()
        .map(|(i, r)| (i + 1, r))
        .filter(|(_, r)| r.note != DAILY_BUDGET_NOTE)
        .collect();
    let budget_rows = total - kept.len();

    let dates: Vec<NaiveDate> = kept
        .iter()
        .map(|(row, r)| {
            parse_date(&r.date).ok_or_else(|| SpendError::DateParse {
                row: *row,
                value: r.date.clone(),
            })
        })
        .collect::<Result<_>>()?;

    let categories: Vec<String> = kept
        .iter()
        .map(|(_, r)| normalize_category(&r.category))
        .collect();

    let amounts: Vec<f64> = kept
        .iter()
        .map(|(row, r)| {
            parse_amount(&r.amount).ok_or_else(|| SpendError::AmountParse {
                row: *row,
                value: r.amount.clone(),
            })
        })
        .collect::<Result<_>>()?;

    let expenses: Vec<ExpenseRecord> = kept
        .into_iter()
        .zip(dates)
        .zip(categories)
        .zip(amounts)
        .filter(|(_, amount)| *amount < 0.0)
        .map(|((((_, raw), date), category), amount)| ExpenseRecord {
            date,
            note: raw.note,
            category,
            amount: -amount,
        })
        .collect();

    debug!(
        "Normalized {} rows: {} budget entries dropped, {} non-expenses dropped, {} kept",
        total,
        budget_rows,
        total - budget_rows - expenses.len(),
        expenses.len()
    );

    Ok(expenses)
}

/// Map table rows positionally onto `date, note, category, amount`.
pub fn rename_columns(table: &RawTable) -> Result<Vec<RawRecord>> {
    if table.headers.len() != COLUMN_NAMES.len() {
        return Err(SpendError::Schema(format!(
            "expected {} columns ({}), found {}",
            COLUMN_NAMES.len(),
            COLUMN_NAMES.join(", "),
            table.headers.len()
        )));
    }

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| match row.as_slice() {
            [date, note, category, amount] => Ok(RawRecord {
                date: date.clone(),
                note: note.clone(),
                category: category.clone(),
                amount: amount.clone(),
            }),
            _ => Err(SpendError::Schema(format!(
                "row {} has {} fields, expected {}",
                i + 1,
                row.len(),
                COLUMN_NAMES.len()
            ))),
        })
        .collect()
}

/// Canonical category label.
///
/// Lowercases, turns spaces into underscores, removes hyphens, then
/// collapses repeated underscores. Idempotent.
///
/// ```
/// use spend_data::normalizer::normalize_category;
///
/// assert_eq!(normalize_category("For Others - Food"), "for_others_food");
/// assert_eq!(normalize_category("for_others_food"), "for_others_food");
/// ```
pub fn normalize_category(raw: &str) -> String {
    let mut label = raw.to_lowercase().replace(' ', "_").replace('-', "");
    while label.contains("__") {
        label = label.replace("__", "_");
    }
    label
}

/// Parse a signed decimal, ignoring thousands-separator commas.
///
/// Surrounding whitespace is allowed. Empty, non-numeric and non-finite
/// values return `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
