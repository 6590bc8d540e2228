//! Dashboard assembly: every chart-ready data product for one query.
//!
//! [`build_dashboard`] is a pure function of the canonical records and a
//! [`DashboardQuery`]. [`Dashboard`] owns the records for the lifetime of a
//! session and memoizes the result of the most recent query.

use chrono::NaiveDate;
use serde::Serialize;
use spend_core::error::Result;
use spend_core::models::{
    CategorySpread, DistributionRow, ExpenseRecord, SeriesPoint, WeekdayTotal,
};
use tracing::debug;

use crate::breakdown::weekday_totals;
use crate::distribution::{extract_distribution, summarize_distribution};
use crate::series::build_rolling_series;

// ── Query and data products ───────────────────────────────────────────────────

/// Parameters chosen by the user for one render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DashboardQuery {
    pub categories: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub window_days: u32,
}

/// Rolling-average lines, one block per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingChart {
    pub title: String,
    pub window_days: u32,
    pub points: Vec<SeriesPoint>,
}

/// Transactions for the distribution plot plus their box statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionChart {
    pub title: String,
    pub rows: Vec<DistributionRow>,
    pub spreads: Vec<CategorySpread>,
}

/// Weekday totals for a stacked bar view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayChart {
    pub title: String,
    pub totals: Vec<WeekdayTotal>,
}

/// Everything the presentation layer draws for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub query: DashboardQuery,
    pub rolling: RollingChart,
    pub distribution: DistributionChart,
    pub weekday: WeekdayChart,
}

// ── Titles ────────────────────────────────────────────────────────────────────

pub fn rolling_title(window_days: u32, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "Rolling {}-Day Average spending by Category ({} - {})",
        window_days,
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

pub fn distribution_title(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "Transactions by Category ({} - {})",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

pub fn weekday_title(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "Spending by Weekday and Category ({} - {})",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

// ── Builders ──────────────────────────────────────────────────────────────────

/// Distinct category labels in order of first appearance.
pub fn category_labels(records: &[ExpenseRecord]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for record in records {
        if !labels.contains(&record.category) {
            labels.push(record.category.clone());
        }
    }
    labels
}

/// Compute all data products for `query`.
///
/// Fails with `InvalidRange` when `query.start > query.end`.
pub fn build_dashboard(records: &[ExpenseRecord], query: &DashboardQuery) -> Result<DashboardData> {
    let points = build_rolling_series(
        records,
        &query.categories,
        query.start,
        query.end,
        query.window_days,
    )?;
    let rows = extract_distribution(records, &query.categories, query.start, query.end)?;
    let spreads = summarize_distribution(&rows, &query.categories);
    let totals = weekday_totals(records, &query.categories, query.start, query.end)?;

    Ok(DashboardData {
        query: query.clone(),
        rolling: RollingChart {
            title: rolling_title(query.window_days, query.start, query.end),
            window_days: query.window_days,
            points,
        },
        distribution: DistributionChart {
            title: distribution_title(query.start, query.end),
            rows,
            spreads,
        },
        weekday: WeekdayChart {
            title: weekday_title(query.start, query.end),
            totals,
        },
    })
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

/// Canonical records for one loaded export plus a single-entry result memo.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use spend_data::dashboard::{Dashboard, DashboardQuery};
///
/// let mut dashboard = Dashboard::new(Vec::new());
/// let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// let query = DashboardQuery {
///     categories: vec!["groceries".to_string()],
///     start: day,
///     end: day,
///     window_days: 14,
/// };
/// let data = dashboard.query(&query).unwrap();
/// assert_eq!(data.rolling.points.len(), 1);
/// ```
#[derive(Debug)]
pub struct Dashboard {
    records: Vec<ExpenseRecord>,
    labels: Vec<String>,
    /// Last query and its result; replaced whenever the query changes.
    cache: Option<(DashboardQuery, DashboardData)>,
    cache_hits: u64,
}

impl Dashboard {
    pub fn new(records: Vec<ExpenseRecord>) -> Self {
        let labels = category_labels(&records);
        Self {
            records,
            labels,
            cache: None,
            cache_hits: 0,
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Distinct labels present in the data, in first-appearance order.
    pub fn categories(&self) -> &[String] {
        &self.labels
    }

    /// Number of queries answered from the memo.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Data products for `query`, recomputed unless it equals the last one.
    pub fn query(&mut self, query: &DashboardQuery) -> Result<&DashboardData> {
        let data = match self.cache.take() {
            Some((cached, data)) if cached == *query => {
                self.cache_hits += 1;
                debug!("dashboard query served from cache");
                data
            }
            _ => {
                debug!(
                    categories = query.categories.len(),
                    window_days = query.window_days,
                    "recomputing dashboard"
                );
                build_dashboard(&self.records, query)?
            }
        };
        Ok(&self.cache.insert((query.clone(), data)).1)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
