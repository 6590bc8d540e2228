//! Terminal UI for the spending dashboard.
//!
//! Renders the header, category selector, rolling-average chart, box plots,
//! transaction table and weekday bars with [`ratatui`], and drives them from
//! a synchronous key-event loop in [`app`].

pub mod app;
pub mod components;
pub mod distribution_view;
pub mod rolling_view;
pub mod themes;
pub mod weekday_view;

pub use spend_data::core;
