//! Shared building blocks for the spending dashboard.
//!
//! Record models, calendar derivation and date ranges, the error taxonomy,
//! command-line settings, number formatting and summary statistics.

pub mod calendar;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod stats;

pub use error::{Result, SpendError};
