//! Projected occurrences and aggregated demand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One future fulfillment of a subscription line.
///
/// Derived during a single projection run and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedOccurrence {
    pub product_id: String,
    /// Nominal fulfillment date of this occurrence.
    pub occurrence_date: NaiveDate,
    /// Date the order is expected to be placed, after pull-forward.
    pub order_drop_date: NaiveDate,
    /// `order_drop_date - today` in days.
    pub days_out: i64,
    /// Quantity inherited from the subscription line.
    pub quantity: i64,
    /// Decay multiplier applied to `quantity`.
    pub decay_rate: f64,
    pub adjusted_quantity: f64,
}

/// Projected autoship demand for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDemand {
    pub product_id: String,
    pub quantity: f64,
}
