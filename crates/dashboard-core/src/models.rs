use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::formatting::format_fixed;
use crate::numeric::coerce_optional;

/// Header names used by the productivity sheet.
pub mod columns {
    pub const MONTH: &str = "Month";
    pub const DATE: &str = "Date";
    pub const USER_NAME: &str = "User Name";
    pub const PROJECT_NAME: &str = "Project Name";
    pub const HOURS: &str = "# of Hours";
    pub const TARGET: &str = "Target";
    pub const ACHIEVED: &str = "Achieved";
    pub const PRODUCTIVITY: &str = "Productivity (%)";
    pub const AUDITED: &str = "Audited";
    pub const QUALITY: &str = "Quality %";
}

/// Filter value that disables a predicate, alongside the empty string.
pub const ALL_SENTINEL: &str = "All";

/// One parsed data record, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(header, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set the value for `column`, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Raw value of `column`, or `None` when the column is absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Raw value of `column`, or `""` when absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Numeric value of `column`; a missing column counts as zero.
    pub fn number(&self, column: &str) -> f64 {
        coerce_optional(self.get(column))
    }

    /// Number of columns held by this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the column names (unordered).
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// The month/date/user constraints currently applied.
///
/// `None` disables a predicate. Raw selector values go through
/// [`FilterSelection::from_raw`], which maps `""` and `"All"` to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub month: Option<String>,
    pub date: Option<String>,
    pub user: Option<String>,
}

impl FilterSelection {
    /// A selection with every predicate disabled.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a selection from raw selector values.
    pub fn from_raw(month: &str, date: &str, user: &str) -> Self {
        Self {
            month: normalize(month),
            date: normalize(date),
            user: normalize(user),
        }
    }

    /// Change the month. The date selection is cleared, since the previous
    /// date may not exist in the new month.
    pub fn set_month(&mut self, month: &str) {
        self.month = normalize(month);
        self.date = None;
    }

    pub fn set_date(&mut self, date: &str) {
        self.date = normalize(date);
    }

    pub fn set_user(&mut self, user: &str) {
        self.user = normalize(user);
    }

    /// `true` when no predicate is active.
    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.date.is_none() && self.user.is_none()
    }

    /// Copy of this selection with the user predicate removed.
    pub fn without_user(&self) -> Self {
        Self {
            user: None,
            ..self.clone()
        }
    }

    /// Copy of this selection with the date predicate removed.
    pub fn without_date(&self) -> Self {
        Self {
            date: None,
            ..self.clone()
        }
    }
}

/// `true` for values that disable a filter predicate.
pub fn is_sentinel(value: &str) -> bool {
    value.is_empty() || value == ALL_SENTINEL
}

fn normalize(value: &str) -> Option<String> {
    if is_sentinel(value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Aggregate metrics over the currently filtered rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Sum of `# of Hours`.
    pub hours: f64,
    /// Sum of `Target`.
    pub target: f64,
    /// Sum of `Achieved`.
    pub achieved: f64,
    /// Sum of `Audited`.
    pub audited: f64,
    /// Mean of `Productivity (%)`.
    pub productivity: f64,
    /// Mean of `Quality %`.
    pub quality: f64,
    /// Number of rows aggregated.
    pub count: usize,
}

impl MetricsSummary {
    /// Render the metrics with the precision the dashboard cards use.
    pub fn display(&self) -> MetricsDisplay {
        MetricsDisplay {
            hours: format_fixed(self.hours, 1),
            target: format_fixed(self.target, 0),
            achieved: format_fixed(self.achieved, 0),
            productivity: format_fixed(self.productivity, 1),
            audited: format_fixed(self.audited, 0),
            quality: format_fixed(self.quality, 1),
            count: self.count,
        }
    }
}

/// String form of [`MetricsSummary`] as shown on the metric cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsDisplay {
    pub hours: String,
    pub target: String,
    pub achieved: String,
    pub productivity: String,
    pub audited: String,
    pub quality: String,
    pub count: usize,
}

/// Per-user breakdown within the current month/date filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPerformance {
    /// Value of the `User Name` column (may be empty).
    pub name: String,
    /// Mean `Productivity (%)` over the user's rows.
    pub avg_productivity: f64,
    /// Mean `Quality %` over the user's rows.
    pub avg_quality: f64,
    /// Sum of `# of Hours` over the user's rows.
    pub hours: f64,
    /// Number of rows contributing to this record.
    pub rows: usize,
}

/// One point of the productivity / target trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub productivity: f64,
    pub quality: f64,
    pub target: f64,
    pub achieved: f64,
}

/// One line of the detailed-records table, values kept as raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedRecord {
    pub date: String,
    pub user: String,
    pub project: String,
    pub hours: String,
    pub target: String,
    pub achieved: String,
    pub productivity: String,
    pub quality: String,
}

impl DetailedRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            date: row.value(columns::DATE).to_string(),
            user: row.value(columns::USER_NAME).to_string(),
            project: row.value(columns::PROJECT_NAME).to_string(),
            hours: row.value(columns::HOURS).to_string(),
            target: row.value(columns::TARGET).to_string(),
            achieved: row.value(columns::ACHIEVED).to_string(),
            productivity: row.value(columns::PRODUCTIVITY).to_string(),
            quality: row.value(columns::QUALITY).to_string(),
        }
    }
}
