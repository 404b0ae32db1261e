//! Load-once data manager.
//!
//! Wraps [`load_source`] with the dashboard's loading lifecycle: the
//! `loading` flag is raised for the duration of the fetch and always cleared
//! afterwards. A failed load is logged and leaves the manager holding no
//! rows; there is no retry and no user-facing error beyond
//! [`DataManager::last_error`].

use std::time::Duration;

use chrono::{DateTime, Local};
use dashboard_core::settings::SourceConfig;
use dashboard_data::reader::ParsedCsv;

use crate::fetcher::{load_source, DEFAULT_HTTP_TIMEOUT};

// ── DataManager ───────────────────────────────────────────────────────────────

/// Owner of the parsed sheet and its load status.
///
/// # Example
/// ```no_run
/// use dashboard_core::settings::SourceConfig;
/// use dashboard_runtime::data_manager::DataManager;
///
/// # async fn run() {
/// let mut mgr = DataManager::new(SourceConfig::Url("https://example.com/x.csv".into()));
/// mgr.load().await;
/// println!("rows: {}", mgr.data().len());
/// # }
/// ```
pub struct DataManager {
    /// Where the CSV comes from.
    source: SourceConfig,
    /// HTTP timeout for URL sources.
    timeout: Duration,
    /// Most recently loaded sheet (empty until a successful load).
    data: ParsedCsv,
    /// `true` only while a load is in flight.
    loading: bool,
    /// Local time of the last successful load.
    last_updated: Option<DateTime<Local>>,
    /// Human-readable description of the last error encountered.
    last_error: Option<String>,
}

impl DataManager {
    pub fn new(source: SourceConfig) -> Self {
        Self::with_timeout(source, DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(source: SourceConfig, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            data: ParsedCsv::default(),
            loading: false,
            last_updated: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Fetch and parse the source once.
    ///
    /// Returns `true` on success. On failure the error is logged, the data
    /// is cleared and the loading flag is reset.
    pub async fn load(&mut self) -> bool {
        self.loading = true;
        tracing::info!(source = ?self.source, "loading sheet data");

        let outcome = load_source(&self.source, self.timeout).await;
        self.loading = false;

        match outcome {
            Ok(parsed) => {
                tracing::info!(
                    rows = parsed.len(),
                    columns = parsed.headers.len(),
                    "sheet data loaded"
                );
                self.data = parsed;
                self.last_updated = Some(Local::now());
                self.last_error = None;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching data");
                self.data = ParsedCsv::default();
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// The loaded sheet; empty before the first successful load.
    pub fn data(&self) -> &ParsedCsv {
        &self.data
    }

    /// Hand the loaded sheet over to the caller.
    pub fn into_data(self) -> ParsedCsv {
        self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// "Last updated" stamp as displayed in the report header.
    pub fn last_updated_display(&self) -> String {
        self.last_updated
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default()
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn source(&self) -> &SourceConfig {
        &self.source
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
