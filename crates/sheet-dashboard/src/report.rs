//! Plain-text and JSON rendering of a dashboard view.

use std::fmt::Write;

use dashboard_core::error::Result;
use dashboard_core::formatting::{fit_width, format_fixed, format_hours, format_percent};
use dashboard_core::models::{DetailedRecord, MetricsDisplay};
use dashboard_data::analysis::DashboardView;
use serde::Serialize;

/// JSON report document.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub last_updated: &'a str,
    pub cards: MetricsDisplay,
    #[serde(flatten)]
    pub view: &'a DashboardView,
}

/// Serialize `view` as pretty JSON.
pub fn render_json(view: &DashboardView, last_updated: &str) -> Result<String> {
    let report = JsonReport {
        last_updated,
        cards: view.metrics.display(),
        view,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Render `view` as a plain-text report.
pub fn render_text(view: &DashboardView, last_updated: &str) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, view, last_updated);
    out
}

fn write_text(out: &mut String, view: &DashboardView, last_updated: &str) -> std::fmt::Result {
    let sel = &view.selection;
    writeln!(out, "Productivity Dashboard")?;
    writeln!(out, "Last updated: {}", last_updated)?;
    writeln!(
        out,
        "Filters: month={} date={} user={}",
        sel.month.as_deref().unwrap_or("All"),
        sel.date.as_deref().unwrap_or("All Dates"),
        sel.user.as_deref().unwrap_or("All"),
    )?;
    writeln!(out)?;

    let cards = view.metrics.display();
    writeln!(out, "── Metrics ({} rows) ──", cards.count)?;
    writeln!(out, "  Hours Logged      {}h", cards.hours)?;
    writeln!(out, "  Target Tasks      {}", cards.target)?;
    writeln!(out, "  Tasks Achieved    {}", cards.achieved)?;
    writeln!(out, "  Avg Productivity  {}%", cards.productivity)?;
    writeln!(out, "  Quality Score     {}%", cards.quality)?;
    writeln!(out, "  Audited Items     {}", cards.audited)?;
    writeln!(out)?;

    writeln!(out, "── User Performance ──")?;
    if view.users.is_empty() {
        writeln!(out, "  (no data)")?;
    }
    for user in &view.users {
        writeln!(
            out,
            "  {} productivity {:>7}  quality {:>7}  hours {:>8}",
            fit_width(&user.name, 20),
            format_percent(user.avg_productivity),
            format_percent(user.avg_quality),
            format_hours(user.hours),
        )?;
    }
    writeln!(out)?;

    writeln!(out, "── Trend ({} points) ──", view.trend.len())?;
    for point in &view.trend {
        writeln!(
            out,
            "  {} productivity {:>6}  quality {:>6}  target {:>6}  achieved {:>6}",
            fit_width(&point.date, 12),
            format_fixed(point.productivity, 1),
            format_fixed(point.quality, 1),
            format_fixed(point.target, 0),
            format_fixed(point.achieved, 0),
        )?;
    }
    writeln!(out)?;

    writeln!(out, "── Detailed Records ──")?;
    writeln!(out, "{}", record_line(&header_record()))?;
    for record in &view.records {
        writeln!(out, "{}", record_line(record))?;
    }
    writeln!(out)?;

    writeln!(out, "Months: {}", view.month_options.join(", "))?;
    writeln!(out, "Dates:  {}", view.date_options.join(", "))?;
    writeln!(out, "Users:  {}", view.user_options.join(", "))?;
    Ok(())
}

fn header_record() -> DetailedRecord {
    DetailedRecord {
        date: "Date".to_string(),
        user: "User".to_string(),
        project: "Project".to_string(),
        hours: "Hours".to_string(),
        target: "Target".to_string(),
        achieved: "Achieved".to_string(),
        productivity: "Prod %".to_string(),
        quality: "Quality %".to_string(),
    }
}

fn record_line(r: &DetailedRecord) -> String {
    format!(
        "  {} {} {} {:>6} {:>6} {:>8} {:>7} {:>9}",
        fit_width(&r.date, 12),
        fit_width(&r.user, 16),
        fit_width(&r.project, 18),
        r.hours,
        r.target,
        r.achieved,
        r.productivity,
        r.quality,
    )
}
