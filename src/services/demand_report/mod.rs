//! Demand report service.
//!
//! Loads one warehouse snapshot, projects autoship demand with the
//! configured strategy and joins the result onto per-product metrics.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::ProjectionConfig;
use crate::model::ReportRow;
use crate::projection::{
    Horizon, Projection, ProjectionError, ProjectionInput, ProjectionStrategy,
    PullForwardSchedule,
};
use crate::storage::{SnapshotSource, StorageError};

/// Errors raised by a report run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of one report run.
#[derive(Debug, Clone, Serialize)]
pub struct DemandReport {
    pub today: NaiveDate,
    /// Subscription snapshot the run read; `None` when no snapshot exists
    /// on or before `today`.
    pub snapshot_date: Option<NaiveDate>,
    pub projection: Projection,
    /// One row per product/vendor, ordered by product id then vendor id.
    pub rows: Vec<ReportRow>,
}

/// Runs the autoship demand report against a snapshot source.
pub struct DemandReportService {
    source: Arc<dyn SnapshotSource>,
    strategy: Box<dyn ProjectionStrategy>,
    horizon_days: i64,
}

impl DemandReportService {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        strategy: Box<dyn ProjectionStrategy>,
        horizon_days: i64,
    ) -> Self {
        Self {
            source,
            strategy,
            horizon_days,
        }
    }

    pub fn from_config(source: Arc<dyn SnapshotSource>, config: &ProjectionConfig) -> Self {
        Self::new(source, config.strategy.build(), config.horizon_days)
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Run the report as of `today`.
    ///
    /// The horizon is validated before any warehouse read.
    pub async fn run(&self, today: NaiveDate) -> Result<DemandReport, ReportError> {
        let horizon = Horizon::new(self.horizon_days)?;

        let snapshot_date = self.source.latest_snapshot_date(today).await.map_err(|e| {
            error!(error = %e, "Failed to resolve latest subscription snapshot");
            e
        })?;
        if snapshot_date.is_none() {
            warn!(%today, "No subscription snapshot on or before today");
        }

        let lines = self.source.subscription_lines(today).await.map_err(|e| {
            error!(error = %e, "Failed to load subscription lines");
            e
        })?;
        let settings = self.source.pull_forward_settings().await.map_err(|e| {
            error!(error = %e, "Failed to load pull-forward settings");
            e
        })?;
        let metrics = self.source.product_metrics().await.map_err(|e| {
            error!(error = %e, "Failed to load product metrics");
            e
        })?;

        let schedule = PullForwardSchedule::new(settings);
        let input = ProjectionInput::new(today, horizon, &lines, &schedule)?;
        let projection = self.strategy.project(&input)?;

        let mut rows: Vec<ReportRow> = metrics
            .into_iter()
            .map(|m| {
                let demand = projection.demand_for(&m.product_id);
                ReportRow::from_metrics(m, demand)
            })
            .collect();
        rows.sort_by(|a, b| {
            a.product_id
                .cmp(&b.product_id)
                .then(a.vendor_id.cmp(&b.vendor_id))
        });

        info!(
            strategy = projection.strategy,
            %today,
            horizon_days = horizon.days(),
            lines = lines.len(),
            settings = schedule.settings().len(),
            occurrences = projection.occurrences.len(),
            products = projection.demand.len(),
            rows = rows.len(),
            total_demand = projection.total_demand(),
            "Demand report complete"
        );

        Ok(DemandReport {
            today,
            snapshot_date,
            projection,
            rows,
        })
    }
}
