use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpendError};

// ── Date parsing ──────────────────────────────────────────────────────────────

/// Plain calendar-date layouts accepted in the `date` column.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Date-time layouts; only the calendar day is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a date string from a transaction export into a calendar day.
///
/// Tries plain dates first, then RFC 3339 timestamps, then naive date-times.
/// Timestamps keep the day as written; UTC offsets are never applied.
/// Returns `None` for empty or unrecognised strings.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    let normalised = match s.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => s.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

// ── Calendar fields ───────────────────────────────────────────────────────────

/// Weekday names indexed by `weekday_num` (0 = Sunday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Calendar components derived from a single date.
///
/// Names are English and locale-independent. `week_of_year` follows the
/// Sunday-first convention: days before the year's first Sunday are week
/// `"00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFields {
    /// Four-digit year, e.g. `"2021"`.
    pub year: String,
    /// Zero-padded month, `"01"`..`"12"`.
    pub month: String,
    /// Zero-padded day of month, `"01"`..`"31"`.
    pub day: String,
    /// Zero-padded Sunday-first week of year, `"00"`..`"53"`.
    pub week_of_year: String,
    /// Day of week, 0 = Sunday .. 6 = Saturday.
    pub weekday_num: u32,
    /// Full month name, e.g. `"January"`.
    pub month_name: String,
    /// Full weekday name, e.g. `"Friday"`.
    pub weekday_name: String,
}

impl CalendarFields {
    pub fn from_date(date: NaiveDate) -> Self {
        let weekday_num = date.weekday().num_days_from_sunday();
        Self {
            year: date.format("%Y").to_string(),
            month: date.format("%m").to_string(),
            day: date.format("%d").to_string(),
            week_of_year: date.format("%U").to_string(),
            weekday_num,
            month_name: date.format("%B").to_string(),
            weekday_name: WEEKDAY_NAMES[weekday_num as usize].to_string(),
        }
    }
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// An inclusive `[start, end]` span of calendar days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end` with [`SpendError::InvalidRange`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SpendError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies inside the range (both bounds inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, `(end - start).days + 1`.
    pub fn num_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Every day in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.num_days() as i64).map(move |offset| start + Duration::days(offset))
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
