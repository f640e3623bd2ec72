//! autoship-report: Autoship demand report
//!
//! Runs one projection against the warehouse snapshot and writes the result
//! to stdout as JSON lines, one record per line:
//! - `{"record":"occurrence", ...}` per projected occurrence, when
//!   `projection.include_occurrences` is set (exact strategy only)
//! - `{"record":"row", ...}` per product/vendor report row
//!
//! ## Configuration
//! - First argument: optional config file path
//! - AUTOSHIP_CONFIG: config file path
//! - AUTOSHIP__PROJECTION__STRATEGY: `exact` or `blended`
//! - AUTOSHIP__PROJECTION__HORIZON_DAYS: horizon length (e.g. 30, 365)
//! - AUTOSHIP__PROJECTION__TODAY: pinned run date (ISO)
//! - AUTOSHIP__STORAGE__TYPE: `sqlite` or `postgres`
//! - AUTOSHIP_LOG: tracing filter (logs go to stderr)

use std::io::Write;

use serde::Serialize;
use tracing::{error, info};

use autoship_demand::config::Config;
use autoship_demand::model::{ProjectedOccurrence, ReportRow};
use autoship_demand::services::DemandReportService;
use autoship_demand::storage::init_source;

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "lowercase")]
enum OutputRecord<'a> {
    Occurrence(&'a ProjectedOccurrence),
    Row(&'a ReportRow),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    autoship_demand::utils::bootstrap::init_tracing();

    let config_path = autoship_demand::utils::bootstrap::parse_config_path();
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let today = config
        .projection
        .resolve_today(chrono::Local::now().date_naive());
    info!(
        %today,
        strategy = %config.projection.strategy,
        horizon_days = config.projection.horizon_days,
        "Starting autoship-report"
    );

    let source = init_source(&config.storage).await?;
    info!("Storage initialized");

    let service = DemandReportService::from_config(source, &config.projection);
    let report = service.run(today).await.map_err(|e| {
        error!("Report run failed: {}", e);
        e
    })?;

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    if config.projection.include_occurrences {
        for occurrence in &report.projection.occurrences {
            serde_json::to_writer(&mut out, &OutputRecord::Occurrence(occurrence))?;
            out.write_all(b"\n")?;
        }
    }
    for row in &report.rows {
        serde_json::to_writer(&mut out, &OutputRecord::Row(row))?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(rows = report.rows.len(), "autoship-report finished");
    Ok(())
}
