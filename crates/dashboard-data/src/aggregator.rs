//! Summary metrics and per-user breakdowns over filtered rows.

use std::collections::HashMap;

use dashboard_core::models::{columns, FilterSelection, MetricsSummary, Row, UserPerformance};

use crate::filter::apply_filters;

// ── MetricsAccumulator ────────────────────────────────────────────────────────

/// Running sums accumulated across rows.
#[derive(Debug, Clone, Default)]
pub struct MetricsAccumulator {
    pub hours: f64,
    pub target: f64,
    pub achieved: f64,
    pub audited: f64,
    pub productivity_sum: f64,
    pub quality_sum: f64,
    pub count: usize,
}

impl MetricsAccumulator {
    /// Add a single row's values to the running totals.
    ///
    /// Missing or non-numeric cells count as zero, and still count towards
    /// the row total used for averages.
    pub fn add_row(&mut self, row: &Row) {
        self.hours += row.number(columns::HOURS);
        self.target += row.number(columns::TARGET);
        self.achieved += row.number(columns::ACHIEVED);
        self.audited += row.number(columns::AUDITED);
        self.productivity_sum += row.number(columns::PRODUCTIVITY);
        self.quality_sum += row.number(columns::QUALITY);
        self.count += 1;
    }

    /// Convert the running sums into a [`MetricsSummary`].
    pub fn finish(&self) -> MetricsSummary {
        MetricsSummary {
            hours: self.hours,
            target: self.target,
            achieved: self.achieved,
            audited: self.audited,
            productivity: mean(self.productivity_sum, self.count),
            quality: mean(self.quality_sum, self.count),
            count: self.count,
        }
    }
}

/// `sum / count`, or `0.0` for an empty set.
fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// ── MetricsAggregator ─────────────────────────────────────────────────────────

/// Stateless helper computing dashboard metrics.
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Sums and means over `rows`. An empty input yields all zeros.
    pub fn summarize<'a>(rows: impl IntoIterator<Item = &'a Row>) -> MetricsSummary {
        let mut acc = MetricsAccumulator::default();
        for row in rows {
            acc.add_row(row);
        }
        acc.finish()
    }

    /// Group `rows` by `User Name`, in first-appearance order.
    pub fn group_by_user<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<UserPerformance> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, MetricsAccumulator> = HashMap::new();

        for row in rows {
            let user = row.value(columns::USER_NAME);
            if !groups.contains_key(user) {
                order.push(user.to_string());
            }
            groups.entry(user.to_string()).or_default().add_row(row);
        }

        order
            .into_iter()
            .filter_map(|name| {
                let acc = groups.remove(&name)?;
                let summary = acc.finish();
                Some(UserPerformance {
                    name,
                    avg_productivity: summary.productivity,
                    avg_quality: summary.quality,
                    hours: summary.hours,
                    rows: summary.count,
                })
            })
            .collect()
    }

    /// Per-user breakdown within the month/date filter of `selection`.
    ///
    /// The user predicate is ignored so every user stays comparable.
    pub fn user_performance(rows: &[Row], selection: &FilterSelection) -> Vec<UserPerformance> {
        let scope = selection.without_user();
        Self::group_by_user(apply_filters(rows, &scope))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
