use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarFields;

/// Column names assigned positionally to every input table.
pub const COLUMN_NAMES: [&str; 4] = ["date", "note", "category", "amount"];

/// Note marking a budget-allowance entry rather than an expense.
pub const DAILY_BUDGET_NOTE: &str = "Daily Budget";

/// An untyped table as read from the export file.
///
/// No invariants are guaranteed; the normalizer checks the shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Header cells as they appear in the file.
    pub headers: Vec<String>,
    /// Data rows, each a list of cell strings.
    pub rows: Vec<Vec<String>>,
}

/// A single four-field row after positional renaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub note: String,
    pub category: String,
    /// Signed decimal, possibly with thousands separators.
    pub amount: String,
}

/// A cleaned, sign-normalised expense.
///
/// Built only by the normalizer: `amount` is strictly positive and
/// `category` is lowercase with no spaces or hyphens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub note: String,
    pub category: String,
    /// Magnitude of the expense.
    pub amount: f64,
}

impl ExpenseRecord {
    /// Calendar components of `date`, recomputed on every call.
    pub fn calendar(&self) -> CalendarFields {
        CalendarFields::from_date(self.date)
    }

    /// Full English weekday name of `date`.
    pub fn weekday_name(&self) -> String {
        self.calendar().weekday_name
    }
}

/// One point of a category's rolling-average line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub category: String,
    /// Trailing mean of daily totals, rounded to 3 decimals.
    pub rolling_average: f64,
}

/// One transaction feeding the distribution (box) plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRow {
    pub note: String,
    pub category: String,
    pub amount: f64,
    pub weekday_name: String,
}

/// Five-number summary of one category's transaction amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpread {
    pub category: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Total spent in one category on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayTotal {
    pub category: String,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday_num: u32,
    pub weekday_name: String,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_record_calendar_is_derived_from_date() {
        let mut record = ExpenseRecord {
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            note: "milk".to_string(),
            category: "groceries".to_string(),
            amount: 4.5,
        };
        assert_eq!(record.weekday_name(), "Friday");

        record.date = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
        let fields = record.calendar();
        assert_eq!(fields.weekday_name, "Saturday");
        assert_eq!(fields.day, "02");
    }

    #[test]
    fn test_expense_record_serializes_date_as_iso() {
        let record = ExpenseRecord {
            date: NaiveDate::from_ymd_opt(2021, 3, 9).unwrap(),
            note: "lunch".to_string(),
            category: "restaurant".to_string(),
            amount: 12.0,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2021-03-09");
        assert_eq!(json["category"], "restaurant");
    }
}
