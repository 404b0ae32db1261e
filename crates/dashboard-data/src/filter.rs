//! Equality filters over month, date and user.

use dashboard_core::models::{columns, FilterSelection, Row};
use tracing::debug;

/// `true` when `row` satisfies every active predicate in `selection`.
///
/// A disabled predicate (`None`) matches everything; an active predicate
/// never matches a row missing that column.
pub fn row_matches(row: &Row, selection: &FilterSelection) -> bool {
    predicate_matches(row, columns::MONTH, selection.month.as_deref())
        && predicate_matches(row, columns::DATE, selection.date.as_deref())
        && predicate_matches(row, columns::USER_NAME, selection.user.as_deref())
}

/// Rows matching `selection`, in their original order.
pub fn apply_filters<'a>(rows: &'a [Row], selection: &FilterSelection) -> Vec<&'a Row> {
    let filtered: Vec<&Row> = rows.iter().filter(|r| row_matches(r, selection)).collect();
    debug!(
        total = rows.len(),
        kept = filtered.len(),
        month = ?selection.month,
        date = ?selection.date,
        user = ?selection.user,
        "applied filters"
    );
    filtered
}

fn predicate_matches(row: &Row, column: &str, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(value) => row.get(column) == Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: &str, date: &str, user: &str) -> Row {
        Row::from_pairs([
            (columns::MONTH, month),
            (columns::DATE, date),
            (columns::USER_NAME, user),
        ])
    }

    fn sample() -> Vec<Row> {
        vec![
            row("March", "2024-03-04", "Asha"),
            row("March", "2024-03-04", "Ravi"),
            row("March", "2024-03-05", "Asha"),
            row("April", "2024-04-01", "Ravi"),
        ]
    }

    #[test]
    fn test_no_predicates_keeps_all_in_order() {
        let rows = sample();
        let kept = apply_filters(&rows, &FilterSelection::all());
        assert_eq!(kept.len(), 4);
        for (a, b) in kept.iter().zip(rows.iter()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let rows = sample();
        let sel = FilterSelection::from_raw("March", "2024-03-04", "Asha");
        let kept = apply_filters(&rows, &sel);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0], &rows[0]);
    }

    #[test]
    fn test_single_predicate_preserves_order() {
        let rows = sample();
        let sel = FilterSelection::from_raw("All", "", "Ravi");
        let kept = apply_filters(&rows, &sel);
        assert_eq!(kept, vec![&rows[1], &rows[3]]);
    }

    #[test]
    fn test_unknown_value_yields_empty() {
        let rows = sample();
        let sel = FilterSelection::from_raw("December", "", "All");
        assert!(apply_filters(&rows, &sel).is_empty());
    }

    #[test]
    fn test_missing_column_never_matches_active_predicate() {
        let rows = vec![Row::from_pairs([(columns::DATE, "2024-03-04")])];
        let sel = FilterSelection::from_raw("March", "", "All");
        assert!(apply_filters(&rows, &sel).is_empty());

        let sel = FilterSelection::from_raw("All", "2024-03-04", "All");
        assert_eq!(apply_filters(&rows, &sel).len(), 1);
    }

    #[test]
    fn test_matching_is_exact() {
        let rows = sample();
        let sel = FilterSelection::from_raw("march", "", "All");
        assert!(apply_filters(&rows, &sel).is_empty());
    }
}
