//! Interactive dashboard state.
//!
//! [`Dashboard`] holds the loaded rows and the current [`FilterSelection`].
//! Every selector change recomputes the whole [`DashboardView`]; nothing is
//! memoized between changes.

use dashboard_core::models::{FilterSelection, Row};
use dashboard_data::analysis::{initial_date, DashboardView, DEFAULT_RECORD_LIMIT};
use dashboard_data::reader::ParsedCsv;

/// Loaded sheet plus selector state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    headers: Vec<String>,
    rows: Vec<Row>,
    selection: FilterSelection,
    record_limit: usize,
    view: DashboardView,
}

impl Dashboard {
    /// Build the dashboard in its post-load state: month and user set to
    /// `"All"`, date set to the last row's date.
    pub fn new(data: ParsedCsv) -> Self {
        let selection = FilterSelection {
            date: initial_date(&data.rows).map(str::to_string),
            ..FilterSelection::all()
        };
        Self::with_selection(data, selection, DEFAULT_RECORD_LIMIT)
    }

    /// Build the dashboard with an explicit selection.
    pub fn with_selection(data: ParsedCsv, selection: FilterSelection, record_limit: usize) -> Self {
        let view = DashboardView::compute(&data.rows, &selection, record_limit);
        Self {
            headers: data.headers,
            rows: data.rows,
            selection,
            record_limit,
            view,
        }
    }

    // ── Selectors ─────────────────────────────────────────────────────────

    /// Change the month; the date selection is cleared.
    pub fn select_month(&mut self, month: &str) -> &DashboardView {
        self.selection.set_month(month);
        self.recompute()
    }

    pub fn select_date(&mut self, date: &str) -> &DashboardView {
        self.selection.set_date(date);
        self.recompute()
    }

    pub fn select_user(&mut self, user: &str) -> &DashboardView {
        self.selection.set_user(user);
        self.recompute()
    }

    /// Replace the whole selection at once.
    pub fn set_selection(&mut self, selection: FilterSelection) -> &DashboardView {
        self.selection = selection;
        self.recompute()
    }

    pub fn set_record_limit(&mut self, limit: usize) -> &DashboardView {
        self.record_limit = limit;
        self.recompute()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn recompute(&mut self) -> &DashboardView {
        self.view = DashboardView::compute(&self.rows, &self.selection, self.record_limit);
        tracing::debug!(
            filtered = self.view.metrics.count,
            users = self.view.users.len(),
            "dashboard view recomputed"
        );
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_data::reader::parse_csv;

    const SHEET: &str = "\
Month,Date,User Name,Project Name,# of Hours,Target,Achieved,Productivity (%),Audited,Quality %
March,2024-03-04,Asha,Atlas,8,100,90,90,5,98
March,2024-03-04,Ravi,Borealis,7,80,60,75,4,94
March,2024-03-05,Asha,Atlas,6,60,54,90,3,96
April,2024-04-01,Ravi,Borealis,8,100,100,100,6,99
";

    #[test]
    fn test_initial_selection_uses_last_date() {
        let dash = Dashboard::new(parse_csv(SHEET));
        let sel = dash.selection();
        assert!(sel.month.is_none());
        assert!(sel.user.is_none());
        assert_eq!(sel.date.as_deref(), Some("2024-04-01"));
        assert_eq!(dash.view().metrics.count, 1);
        assert_eq!(dash.headers().len(), 10);
    }

    #[test]
    fn test_select_month_clears_date_and_recomputes() {
        let mut dash = Dashboard::new(parse_csv(SHEET));
        let view = dash.select_month("March");
        assert!(view.selection.date.is_none());
        assert_eq!(view.metrics.count, 3);
        assert!((view.metrics.hours - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_select_user_then_all() {
        let mut dash = Dashboard::new(parse_csv(SHEET));
        dash.select_month("March");
        assert_eq!(dash.select_user("Asha").metrics.count, 2);
        // User breakdown still lists both users.
        assert_eq!(dash.view().users.len(), 2);
        assert_eq!(dash.select_user("All").metrics.count, 3);
    }

    #[test]
    fn test_select_date() {
        let mut dash = Dashboard::new(parse_csv(SHEET));
        dash.select_month("March");
        let view = dash.select_date("2024-03-04");
        assert_eq!(view.metrics.count, 2);
        assert_eq!(view.date_options, vec!["2024-03-04", "2024-03-05"]);
        assert_eq!(dash.select_date("").metrics.count, 3);
    }

    #[test]
    fn test_record_limit() {
        let mut dash = Dashboard::new(parse_csv(SHEET));
        dash.select_date("All");
        assert_eq!(dash.view().records.len(), 4);
        assert_eq!(dash.set_record_limit(1).records.len(), 1);
    }

    #[test]
    fn test_empty_data() {
        let dash = Dashboard::new(ParsedCsv::default());
        assert!(dash.is_empty());
        assert!(dash.selection().is_unfiltered());
        assert_eq!(dash.view().metrics.count, 0);
        assert_eq!(dash.view().month_options, vec!["All"]);
    }

    #[test]
    fn test_set_selection() {
        let mut dash = Dashboard::new(parse_csv(SHEET));
        let view = dash.set_selection(FilterSelection::from_raw("April", "", "Ravi"));
        assert_eq!(view.metrics.count, 1);
        assert_eq!(dash.rows().len(), 4);
    }
}
