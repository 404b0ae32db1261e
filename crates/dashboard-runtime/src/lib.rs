//! Runtime layer for the sheet dashboard.
//!
//! Fetches the CSV export once, tracks loading state, and owns the
//! interactive dashboard state that recomputes its view on every filter
//! change.

pub mod dashboard;
pub mod data_manager;
pub mod fetcher;

pub use dashboard_core as core;
