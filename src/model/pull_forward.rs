//! Pull-forward settings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Operational offset between nominal fulfillment and actual order placement.
///
/// A setting applies from `effective_date` until the next setting takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullForwardSetting {
    pub effective_date: NaiveDate,
    /// Days before the nominal fulfillment date the order is placed.
    pub pull_forward_days: i64,
}

impl PullForwardSetting {
    pub fn new(effective_date: NaiveDate, pull_forward_days: i64) -> Self {
        Self {
            effective_date,
            pull_forward_days,
        }
    }
}
