//! Shared types for the sheet dashboard.
//!
//! Holds the row model, filter selection, derived metric records, numeric
//! coercion, display formatting, CLI settings and the common error type.

pub mod error;
pub mod formatting;
pub mod models;
pub mod numeric;
pub mod settings;
