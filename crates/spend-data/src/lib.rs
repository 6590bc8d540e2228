//! Data pipeline for the spending dashboard.
//!
//! Loads a transaction export, normalizes it into canonical expense records
//! and derives the chart-ready series: rolling averages per category,
//! per-transaction distributions and weekday totals.

pub mod breakdown;
pub mod dashboard;
pub mod distribution;
pub mod normalizer;
pub mod reader;
pub mod series;

pub use spend_core as core;
