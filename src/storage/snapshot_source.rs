//! SnapshotSource trait definition.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::Result;
use crate::model::{ProductMetrics, PullForwardSetting, SubscriptionLine};

/// Read-only access to the warehouse inputs of a report run.
///
/// A new subscription snapshot fully replaces the previous one, so lines are
/// always read from the latest snapshot taken on or before `today`.
///
/// # Implementations
///
/// - `SqliteSnapshotSource`: SQLite storage
/// - `PostgresSnapshotSource`: PostgreSQL storage
/// - `MockSnapshotSource`: In-memory mock for testing
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Date of the latest snapshot taken on or before `today`.
    ///
    /// Returns `None` if no such snapshot exists.
    async fn latest_snapshot_date(&self, today: NaiveDate) -> Result<Option<NaiveDate>>;

    /// Participating lines of the latest snapshot on or before `today`.
    ///
    /// Only Active, non-skipped, recurring lines with a non-null frequency
    /// unit and a next fulfillment date after `today` are returned.
    async fn subscription_lines(&self, today: NaiveDate) -> Result<Vec<SubscriptionLine>>;

    /// Full pull-forward history ordered by effective date.
    async fn pull_forward_settings(&self) -> Result<Vec<PullForwardSetting>>;

    /// Per-product/vendor metrics joined into the report.
    async fn product_metrics(&self) -> Result<Vec<ProductMetrics>>;
}
