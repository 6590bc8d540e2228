use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::calendar::DateRange;
use crate::error::Result;

/// Categories preselected when none are given on the command line.
pub const DEFAULT_CATEGORIES: [&str; 2] = ["groceries", "for_others_food"];

/// Default look-back for the rolling average.
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// Largest window the selection control offers.
pub const MAX_WINDOW_DAYS: u32 = 60;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Spending dashboard: rolling averages and distributions by category
#[derive(Parser, Debug, Clone)]
#[command(
    name = "spend-dashboard",
    about = "Spending dashboard: rolling averages and distributions by category",
    version
)]
pub struct Settings {
    /// Transaction export (date, note, category, amount)
    #[arg(
        long,
        env = "SPEND_DASHBOARD_FILE",
        default_value = "data/daily_budget_ex.csv"
    )]
    pub file: PathBuf,

    /// First day of the range (YYYY-MM-DD, inclusive)
    #[arg(long, default_value = "2021-01-01")]
    pub start: NaiveDate,

    /// Last day of the range (YYYY-MM-DD, inclusive)
    #[arg(long, default_value = "2021-06-01")]
    pub end: NaiveDate,

    /// Category to display (repeatable); defaults to groceries and for_others_food
    #[arg(long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,

    /// Days to average spending over (0-60)
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS, value_parser = clap::value_parser!(u32).range(0..=MAX_WINDOW_DAYS as i64))]
    pub window: u32,

    /// Output mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "json"])]
    pub view: String,

    /// Write the JSON view to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply `--debug`.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The configured range, or `InvalidRange` when `--start` is after `--end`.
    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::new(self.start, self.end)
    }

    /// Whether categories were chosen explicitly with `--category`.
    pub fn has_explicit_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Resolve the initial category selection against the labels in the data.
    ///
    /// Explicit `--category` values are kept verbatim and in order, even when
    /// absent from the data. Defaults are kept only if present.
    pub fn initial_categories(&self, available: &[String]) -> Vec<String> {
        if self.has_explicit_categories() {
            let mut out: Vec<String> = Vec::with_capacity(self.categories.len());
            for c in &self.categories {
                if !out.contains(c) {
                    out.push(c.clone());
                }
            }
            return out;
        }

        DEFAULT_CATEGORIES
            .iter()
            .filter(|c| {
                let present = available.iter().any(|a| a == *c);
                if !present {
                    tracing::warn!("Default category \"{}\" not present in data", c);
                }
                present
            })
            .map(|c| c.to_string())
            .collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
