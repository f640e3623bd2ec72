//! Autoship demand projection.
//!
//! Projects which subscription fulfillments fall inside a future horizon and
//! turns them into one expected demand quantity per product. Two strategies
//! compute the figure differently and are exposed side by side:
//!
//! - [`ExactDecayProjection`] enumerates every occurrence, resolves its
//!   order-drop-date against the pull-forward history and applies the decay
//!   curve per drop-date.
//! - [`BlendedRateProjection`] estimates an occurrence count per line and
//!   applies one blended rate.
//!
//! Projection is a pure function of its input: the same snapshot, settings
//! and `today` always produce the same output.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{ProductDemand, ProjectedOccurrence, SubscriptionLine};

mod blended;
pub mod calendar;
pub mod decay;
mod exact;
mod schedule;

pub use blended::BlendedRateProjection;
pub use calendar::{DateWindow, Period};
pub use decay::{DecayCurve, BLENDED_RATE, TAIL_RATE};
pub use exact::ExactDecayProjection;
pub use schedule::PullForwardSchedule;

/// Errors surfaced to the caller of a projection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    #[error("Invalid horizon: {horizon_days} days (must be at least 1)")]
    InvalidHorizon { horizon_days: i64 },

    #[error("Horizon of {horizon_days} days from {today} is outside the supported date range")]
    DateOutOfRange { today: NaiveDate, horizon_days: u32 },
}

pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Projection horizon in days, validated to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon(u32);

impl Horizon {
    /// Horizon used by the monthly report variant.
    pub const THIRTY_DAYS: Horizon = Horizon(30);
    /// Horizon used by the yearly report variant.
    pub const YEAR: Horizon = Horizon(365);

    pub fn new(horizon_days: i64) -> Result<Self> {
        u32::try_from(horizon_days)
            .ok()
            .filter(|days| *days > 0)
            .map(Self)
            .ok_or(ProjectionError::InvalidHorizon { horizon_days })
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

/// Everything a strategy needs for one run.
#[derive(Debug, Clone)]
pub struct ProjectionInput<'a> {
    pub today: NaiveDate,
    pub horizon: Horizon,
    pub window: DateWindow,
    pub lines: &'a [SubscriptionLine],
    pub schedule: &'a PullForwardSchedule,
}

impl<'a> ProjectionInput<'a> {
    pub fn new(
        today: NaiveDate,
        horizon: Horizon,
        lines: &'a [SubscriptionLine],
        schedule: &'a PullForwardSchedule,
    ) -> Result<Self> {
        let window = DateWindow::horizon(today, horizon.days()).ok_or(
            ProjectionError::DateOutOfRange {
                today,
                horizon_days: horizon.days(),
            },
        )?;
        Ok(Self {
            today,
            horizon,
            window,
            lines,
            schedule,
        })
    }

    /// Lines that take part in projection.
    pub fn participating_lines(&self) -> impl Iterator<Item = &'a SubscriptionLine> {
        let lines: &'a [SubscriptionLine] = self.lines;
        lines.iter().filter(|line| line.participates())
    }
}

/// Output of one projection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// Name of the strategy that produced this projection.
    pub strategy: &'static str,
    /// Per-occurrence detail, ordered by product and drop-date. Empty for
    /// count-based strategies.
    pub occurrences: Vec<ProjectedOccurrence>,
    /// Demand per product, ordered by product id. Products without any
    /// occurrence are absent.
    pub demand: Vec<ProductDemand>,
}

impl Projection {
    /// Demand for a product, treating an absent product as zero.
    pub fn demand_for(&self, product_id: &str) -> f64 {
        self.demand
            .binary_search_by(|d| d.product_id.as_str().cmp(product_id))
            .map(|idx| self.demand[idx].quantity)
            .unwrap_or(0.0)
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().map(|d| d.quantity).sum()
    }
}

/// A way of turning a subscription snapshot into per-product demand.
pub trait ProjectionStrategy: Send + Sync {
    /// Stable name used in configuration and logs.
    fn name(&self) -> &'static str;

    fn project(&self, input: &ProjectionInput<'_>) -> Result<Projection>;
}

/// Strategy selector used by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Exact,
    Blended,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn ProjectionStrategy> {
        match self {
            Self::Exact => Box::new(ExactDecayProjection::default()),
            Self::Blended => Box::new(BlendedRateProjection),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Blended => write!(f, "blended"),
        }
    }
}

/// Sum quantities per product. Deterministic order by product id.
fn aggregate<'a>(quantities: impl IntoIterator<Item = (&'a str, f64)>) -> Vec<ProductDemand> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for (product_id, quantity) in quantities {
        *totals.entry(product_id).or_insert(0.0) += quantity;
    }
    totals
        .into_iter()
        .map(|(product_id, quantity)| ProductDemand {
            product_id: product_id.to_string(),
            quantity,
        })
        .collect()
}
