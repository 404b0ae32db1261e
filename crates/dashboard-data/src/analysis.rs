//! Dashboard view assembly.
//!
//! Combines filtering and aggregation into a [`DashboardView`]: metric
//! cards, per-user breakdown, trend series, detailed records and the option
//! lists offered by the month/date/user selectors.

use std::collections::{BTreeSet, HashSet};

use dashboard_core::models::{
    columns, DetailedRecord, FilterSelection, MetricsSummary, Row, TrendPoint, UserPerformance,
    ALL_SENTINEL,
};
use serde::Serialize;

use crate::aggregator::MetricsAggregator;
use crate::filter::apply_filters;

/// Default number of rows in the detailed-records table.
pub const DEFAULT_RECORD_LIMIT: usize = 20;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Selection the view was computed for.
    pub selection: FilterSelection,
    /// Metric cards over the fully filtered rows.
    pub metrics: MetricsSummary,
    /// Per-user breakdown within the month/date filter.
    pub users: Vec<UserPerformance>,
    /// Productivity/quality and target/achieved series (date ignored).
    pub trend: Vec<TrendPoint>,
    /// First rows of the trend set, as raw strings.
    pub records: Vec<DetailedRecord>,
    /// Month selector options, `"All"` first.
    pub month_options: Vec<String>,
    /// Date selector options for the current month and user.
    pub date_options: Vec<String>,
    /// User selector options, `"All"` first.
    pub user_options: Vec<String>,
}

impl DashboardView {
    /// Compute every part of the view from scratch.
    pub fn compute(rows: &[Row], selection: &FilterSelection, record_limit: usize) -> Self {
        let filtered = apply_filters(rows, selection);
        let trend_set = trend_rows(rows, selection);

        Self {
            selection: selection.clone(),
            metrics: MetricsAggregator::summarize(filtered),
            users: MetricsAggregator::user_performance(rows, selection),
            trend: trend_set.iter().map(|r| trend_point(r)).collect(),
            records: project_records(&trend_set, record_limit),
            month_options: available_months(rows),
            date_options: dates_for_selection(rows, selection),
            user_options: available_users(rows),
        }
    }
}

// ── Option lists ──────────────────────────────────────────────────────────────

/// `"All"` followed by the distinct non-empty months, first-appearance order.
pub fn available_months(rows: &[Row]) -> Vec<String> {
    options_for(rows, columns::MONTH)
}

/// `"All"` followed by the distinct non-empty user names.
pub fn available_users(rows: &[Row]) -> Vec<String> {
    options_for(rows, columns::USER_NAME)
}

fn options_for(rows: &[Row], column: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut options = vec![ALL_SENTINEL.to_string()];
    for row in rows {
        let value = row.value(column);
        if !value.is_empty() && seen.insert(value) {
            options.push(value.to_string());
        }
    }
    options
}

/// Distinct non-empty dates among rows matching the month and user
/// predicates, sorted lexicographically. The date predicate is ignored.
pub fn dates_for_selection(rows: &[Row], selection: &FilterSelection) -> Vec<String> {
    let scope = selection.without_date();
    apply_filters(rows, &scope)
        .into_iter()
        .map(|r| r.value(columns::DATE))
        .filter(|d| !d.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Date of the last row, used as the initial date selection after a load.
pub fn initial_date(rows: &[Row]) -> Option<&str> {
    rows.last()
        .map(|r| r.value(columns::DATE))
        .filter(|d| !d.is_empty())
}

// ── Trend ─────────────────────────────────────────────────────────────────────

/// Rows matching the month and user predicates, ignoring the date.
pub fn trend_rows<'a>(rows: &'a [Row], selection: &FilterSelection) -> Vec<&'a Row> {
    apply_filters(rows, &selection.without_date())
}

fn trend_point(row: &Row) -> TrendPoint {
    TrendPoint {
        date: row.value(columns::DATE).to_string(),
        productivity: row.number(columns::PRODUCTIVITY),
        quality: row.number(columns::QUALITY),
        target: row.number(columns::TARGET),
        achieved: row.number(columns::ACHIEVED),
    }
}

/// The first `limit` trend rows projected to table columns.
pub fn detailed_records(
    rows: &[Row],
    selection: &FilterSelection,
    limit: usize,
) -> Vec<DetailedRecord> {
    project_records(&trend_rows(rows, selection), limit)
}

fn project_records(trend_set: &[&Row], limit: usize) -> Vec<DetailedRecord> {
    trend_set
        .iter()
        .take(limit)
        .map(|r| DetailedRecord::from_row(r))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_csv;

    const SHEET: &str = "\
Month,Date,User Name,Project Name,# of Hours,Target,Achieved,Productivity (%),Audited,Quality %
March,2024-03-05,Asha,Atlas,8,100,90,90,5,98
March,2024-03-04,Ravi,Borealis,7.5,80,60,75,4,94
March,2024-03-04,Asha,Atlas,6,60,54,90,3,96
April,2024-04-01,Ravi,Borealis,8,100,100,100,6,99
,,,,,,,,,
";

    fn rows() -> Vec<Row> {
        parse_csv(SHEET).rows
    }

    #[test]
    fn test_month_and_user_options() {
        let rows = rows();
        assert_eq!(available_months(&rows), vec!["All", "March", "April"]);
        assert_eq!(available_users(&rows), vec!["All", "Asha", "Ravi"]);
    }

    #[test]
    fn test_options_on_empty_rows() {
        assert_eq!(available_months(&[]), vec!["All"]);
        assert_eq!(available_users(&[]), vec!["All"]);
    }

    #[test]
    fn test_dates_sorted_and_scoped_by_month_and_user() {
        let rows = rows();
        let sel = FilterSelection::from_raw("March", "2024-03-05", "All");
        assert_eq!(
            dates_for_selection(&rows, &sel),
            vec!["2024-03-04", "2024-03-05"]
        );

        let sel = FilterSelection::from_raw("All", "", "Ravi");
        assert_eq!(
            dates_for_selection(&rows, &sel),
            vec!["2024-03-04", "2024-04-01"]
        );
    }

    #[test]
    fn test_initial_date_is_last_row() {
        let rows = rows();
        // The trailing all-empty record has no date.
        assert_eq!(initial_date(&rows), None);
        assert_eq!(initial_date(&rows[..4]), Some("2024-04-01"));
        assert_eq!(initial_date(&[]), None);
    }

    #[test]
    fn test_trend_ignores_date_predicate() {
        let rows = rows();
        let sel = FilterSelection::from_raw("March", "2024-03-04", "Asha");
        let trend = trend_rows(&rows, &sel);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].value(columns::DATE), "2024-03-05");
        assert_eq!(trend[1].value(columns::DATE), "2024-03-04");
    }

    #[test]
    fn test_detailed_records_limit() {
        let rows = rows();
        let records = detailed_records(&rows, &FilterSelection::all(), 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].project, "Atlas");
        assert_eq!(records[1].user, "Ravi");
        assert_eq!(records[1].hours, "7.5");
    }

    #[test]
    fn test_default_record_limit_truncates() {
        let mut sheet = String::from("Month,Date,User Name,Project Name\n");
        for day in 1..=25 {
            sheet.push_str(&format!("March,2024-03-{:02},Asha,Atlas\n", day));
        }
        let rows = parse_csv(&sheet).rows;
        assert_eq!(rows.len(), 25);

        let view = DashboardView::compute(&rows, &FilterSelection::all(), DEFAULT_RECORD_LIMIT);
        assert_eq!(view.trend.len(), 25);
        assert_eq!(view.records.len(), DEFAULT_RECORD_LIMIT);
        assert_eq!(view.records.len(), 20);
        assert_eq!(view.records[0].date, "2024-03-01");
        assert_eq!(view.records[19].date, "2024-03-20");
        assert_eq!(
            view.records,
            detailed_records(&rows, &FilterSelection::all(), DEFAULT_RECORD_LIMIT)
        );
    }

    #[test]
    fn test_view_compute() {
        let rows = rows();
        let sel = FilterSelection::from_raw("March", "2024-03-04", "All");
        let view = DashboardView::compute(&rows, &sel, DEFAULT_RECORD_LIMIT);

        assert_eq!(view.metrics.count, 2);
        assert!((view.metrics.hours - 13.5).abs() < 1e-9);
        assert!((view.metrics.target - 140.0).abs() < 1e-9);
        assert!((view.metrics.productivity - 82.5).abs() < 1e-9);
        assert!((view.metrics.quality - 95.0).abs() < 1e-9);

        let names: Vec<&str> = view.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ravi", "Asha"]);

        assert_eq!(view.trend.len(), 3);
        assert_eq!(view.trend[0].productivity, 90.0);
        assert_eq!(view.records.len(), 3);
        assert_eq!(view.month_options, vec!["All", "March", "April"]);
        assert_eq!(view.date_options, vec!["2024-03-04", "2024-03-05"]);
    }

    #[test]
    fn test_view_for_unknown_user_is_empty_but_users_remain() {
        let rows = rows();
        let sel = FilterSelection::from_raw("All", "", "Nobody");
        let view = DashboardView::compute(&rows, &sel, DEFAULT_RECORD_LIMIT);

        assert_eq!(view.metrics, MetricsSummary::default());
        assert!(view.trend.is_empty());
        assert!(view.records.is_empty());
        assert!(view.date_options.is_empty());
        // The user breakdown ignores the user predicate.
        assert_eq!(view.users.len(), 3);
    }
}
