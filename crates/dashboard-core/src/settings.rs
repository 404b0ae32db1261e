use clap::Parser;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};
use crate::models::FilterSelection;

/// Spreadsheet the dashboard reads when no other source is configured.
pub const DEFAULT_SHEET_ID: &str = "1br-F3OlvJWn5TDn1Loh7WEXOtVw-o1Y7gl3kAxaMfHM";

/// First tab of the spreadsheet.
pub const DEFAULT_SHEET_GID: &str = "0";

/// Build the CSV export URL for a spreadsheet tab.
///
/// # Examples
///
/// ```
/// use dashboard_core::settings::export_url;
///
/// assert_eq!(
///     export_url("abc", "0"),
///     "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=0"
/// );
/// ```
pub fn export_url(sheet_id: &str, gid: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid={}",
        sheet_id, gid
    )
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Productivity metrics from a spreadsheet CSV export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sheet-dashboard",
    about = "Productivity metrics from a spreadsheet CSV export",
    version
)]
pub struct Settings {
    /// Spreadsheet id used to build the export URL
    #[arg(long, default_value = DEFAULT_SHEET_ID)]
    pub sheet_id: String,

    /// Sheet tab id
    #[arg(long, default_value = DEFAULT_SHEET_GID)]
    pub gid: String,

    /// Full CSV URL (overrides --sheet-id and --gid)
    #[arg(long, env = "SHEET_DASHBOARD_URL")]
    pub url: Option<String>,

    /// Read CSV from a local file instead of fetching it (wins over --url)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Month filter ("All" disables)
    #[arg(long, default_value = "All")]
    pub month: String,

    /// Date filter ("All" or "" disables; defaults to the latest row's date)
    #[arg(long)]
    pub date: Option<String>,

    /// User filter ("All" disables)
    #[arg(long, default_value = "All")]
    pub user: String,

    /// Report format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Maximum number of detailed records to show
    #[arg(long, default_value = "20")]
    pub records: usize,

    /// HTTP timeout in seconds (1-300)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout_secs: u64,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Where the CSV text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Fetch over HTTP GET.
    Url(String),
    /// Read from a local file.
    File(PathBuf),
}

impl Settings {
    /// Parse settings from an explicit argument list.
    pub fn from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Effective log level; `--debug` wins over `--log-level`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            self.log_level.as_str()
        }
    }

    /// Resolve the data source: `--file`, then `--url`, then the export URL.
    pub fn source(&self) -> Result<SourceConfig> {
        if let Some(path) = &self.file {
            return Ok(SourceConfig::File(path.clone()));
        }
        if let Some(url) = &self.url {
            let url = url.trim();
            if url.is_empty() {
                return Err(DashboardError::Config("empty --url".to_string()));
            }
            return Ok(SourceConfig::Url(url.to_string()));
        }
        if self.sheet_id.trim().is_empty() {
            return Err(DashboardError::Config("empty --sheet-id".to_string()));
        }
        Ok(SourceConfig::Url(export_url(self.sheet_id.trim(), self.gid.trim())))
    }

    /// Filter selection from the CLI flags.
    ///
    /// When `--date` was not given, `default_date` (the latest row's date)
    /// is used, matching the dashboard's initial state after a load.
    pub fn selection(&self, default_date: Option<&str>) -> FilterSelection {
        let date = match (&self.date, default_date) {
            (Some(explicit), _) => explicit.as_str(),
            (None, Some(latest)) => latest,
            (None, None) => "",
        };
        FilterSelection::from_raw(&self.month, date, &self.user)
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}
