//! Mock snapshot source for testing.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{Result, SnapshotSource, StorageError};
use crate::model::{ProductMetrics, PullForwardSetting, SubscriptionLine};

/// Snapshot source that keeps every snapshot in memory.
///
/// Applies the same latest-snapshot and participation rules as the SQL
/// sources so services can be tested without a database.
#[derive(Default)]
pub struct MockSnapshotSource {
    lines: RwLock<Vec<SubscriptionLine>>,
    settings: RwLock<Vec<PullForwardSetting>>,
    metrics: RwLock<Vec<ProductMetrics>>,
    fail_on_load: RwLock<bool>,
}

impl MockSnapshotSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_line(&self, line: SubscriptionLine) {
        self.lines.write().await.push(line);
    }

    pub async fn add_setting(&self, setting: PullForwardSetting) {
        self.settings.write().await.push(setting);
    }

    pub async fn add_metrics(&self, metrics: ProductMetrics) {
        self.metrics.write().await.push(metrics);
    }

    pub async fn set_fail_on_load(&self, fail: bool) {
        *self.fail_on_load.write().await = fail;
    }

    async fn check_available(&self) -> Result<()> {
        if *self.fail_on_load.read().await {
            return Err(StorageError::Unavailable("mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshotSource {
    async fn latest_snapshot_date(&self, today: NaiveDate) -> Result<Option<NaiveDate>> {
        self.check_available().await?;
        Ok(self
            .lines
            .read()
            .await
            .iter()
            .map(|line| line.snapshot_date)
            .filter(|date| *date <= today)
            .max())
    }

    async fn subscription_lines(&self, today: NaiveDate) -> Result<Vec<SubscriptionLine>> {
        let Some(snapshot_date) = self.latest_snapshot_date(today).await? else {
            return Ok(Vec::new());
        };
        let mut lines: Vec<SubscriptionLine> = self
            .lines
            .read()
            .await
            .iter()
            .filter(|line| line.snapshot_date == snapshot_date)
            .filter(|line| line.participates())
            .filter(|line| line.next_fulfillment_date > today)
            .cloned()
            .collect();
        lines.sort_by(|a, b| {
            a.product_id
                .cmp(&b.product_id)
                .then(a.next_fulfillment_date.cmp(&b.next_fulfillment_date))
        });
        Ok(lines)
    }

    async fn pull_forward_settings(&self) -> Result<Vec<PullForwardSetting>> {
        self.check_available().await?;
        let mut settings = self.settings.read().await.clone();
        settings.sort_by_key(|s| s.effective_date);
        Ok(settings)
    }

    async fn product_metrics(&self) -> Result<Vec<ProductMetrics>> {
        self.check_available().await?;
        let mut metrics = self.metrics.read().await.clone();
        metrics.sort_by(|a, b| {
            a.product_id
                .cmp(&b.product_id)
                .then(a.vendor_id.cmp(&b.vendor_id))
        });
        Ok(metrics)
    }
}
