mod bootstrap;
mod report;

use anyhow::Result;
use clap::Parser;
use dashboard_core::settings::Settings;
use dashboard_data::analysis::initial_date;
use dashboard_runtime::dashboard::Dashboard;
use dashboard_runtime::data_manager::DataManager;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.effective_log_level())?;

    tracing::info!("Sheet Dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    let source = settings.source()?;
    let mut manager =
        DataManager::with_timeout(source, Duration::from_secs(settings.timeout_secs));

    // A failed load is logged by the manager; the report then shows no data.
    manager.load().await;
    let last_updated = manager.last_updated_display();

    let data = manager.into_data();
    let selection = settings.selection(initial_date(&data.rows));
    let dashboard = Dashboard::with_selection(data, selection, settings.records);

    let rendered = if settings.is_json() {
        report::render_json(dashboard.view(), &last_updated)?
    } else {
        report::render_text(dashboard.view(), &last_updated)
    };
    println!("{}", rendered);

    Ok(())
}
