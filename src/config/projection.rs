//! Projection run configuration.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::projection::StrategyKind;

/// Default horizon: the yearly report variant.
pub const DEFAULT_HORIZON_DAYS: i64 = 365;

/// Projection run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Projection strategy (`exact` or `blended`).
    pub strategy: StrategyKind,
    /// Horizon length in days. Validated when the report runs.
    pub horizon_days: i64,
    /// Fixed "today" for reruns and backfills. Defaults to the local date.
    pub today: Option<NaiveDate>,
    /// Emit per-occurrence detail alongside report rows.
    pub include_occurrences: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Exact,
            horizon_days: DEFAULT_HORIZON_DAYS,
            today: None,
            include_occurrences: false,
        }
    }
}

impl ProjectionConfig {
    /// The configured override, or `now` when none is set.
    pub fn resolve_today(&self, now: NaiveDate) -> NaiveDate {
        self.today.unwrap_or(now)
    }
}
