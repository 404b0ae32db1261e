//! Tabular data processing for the sheet dashboard.
//!
//! Parses CSV exports into rows, applies month/date/user filters and
//! computes the summary metrics, per-user breakdown and trend series that
//! make up a dashboard view.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use dashboard_core as core;
