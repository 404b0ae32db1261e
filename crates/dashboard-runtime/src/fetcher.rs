//! Single-shot CSV retrieval over HTTP or from a local file.

use std::time::Duration;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::settings::SourceConfig;
use dashboard_data::reader::{load_csv_file, parse_csv, ParsedCsv};
use tracing::{debug, info};

/// Default HTTP timeout for the export request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper around a [`reqwest::Client`] issuing one plain GET.
///
/// No authentication and no retry: a failed request is reported once.
#[derive(Debug, Clone)]
pub struct CsvFetcher {
    client: reqwest::Client,
}

impl CsvFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DashboardError::Config(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }

    /// GET `url` and return the body as text.
    ///
    /// Non-2xx responses are errors.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "requesting CSV export");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| http_error(url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|err| http_error(url, err))?;
        info!(url, bytes = body.len(), "fetched CSV export");
        Ok(body)
    }

    /// Fetch and parse in one step.
    pub async fn fetch_csv(&self, url: &str) -> Result<ParsedCsv> {
        let body = self.fetch_text(url).await?;
        Ok(parse_csv(&body))
    }
}

fn http_error(url: &str, err: reqwest::Error) -> DashboardError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    DashboardError::Http {
        url: url.to_string(),
        message,
    }
}

/// Load and parse the configured source.
pub async fn load_source(source: &SourceConfig, timeout: Duration) -> Result<ParsedCsv> {
    match source {
        SourceConfig::File(path) => load_csv_file(path),
        SourceConfig::Url(url) => CsvFetcher::new(timeout)?.fetch_csv(url).await,
    }
}
