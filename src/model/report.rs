//! Per-product report rows.

use serde::{Deserialize, Serialize};

/// Warehouse metrics reported alongside projected demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetrics {
    pub product_id: String,
    pub vendor_id: String,
    pub on_hand_units: i64,
    pub on_order_units: i64,
    /// Units ordered by customers that cannot currently be fulfilled.
    pub backorder_units: i64,
    /// Share of product page views that saw the item out of stock.
    pub stockout_pct: Option<f64>,
    /// Fraction of ordered quantity received from the vendor.
    pub fill_rate: Option<f64>,
}

/// One output row: metrics joined with projected autoship demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub product_id: String,
    pub vendor_id: String,
    pub on_hand_units: i64,
    pub on_order_units: i64,
    pub backorder_units: i64,
    pub stockout_pct: Option<f64>,
    pub fill_rate: Option<f64>,
    /// Projected autoship demand; 0 when the product has no occurrences.
    pub projected_demand: f64,
    /// Demand plus backorders not covered by on-hand and on-order units.
    pub projected_shortfall: f64,
}

impl ReportRow {
    /// Join a metrics row with the product's projected demand.
    pub fn from_metrics(metrics: ProductMetrics, projected_demand: f64) -> Self {
        let supply = (metrics.on_hand_units + metrics.on_order_units) as f64;
        let need = projected_demand + metrics.backorder_units as f64;
        Self {
            product_id: metrics.product_id,
            vendor_id: metrics.vendor_id,
            on_hand_units: metrics.on_hand_units,
            on_order_units: metrics.on_order_units,
            backorder_units: metrics.backorder_units,
            stockout_pct: metrics.stockout_pct,
            fill_rate: metrics.fill_rate,
            projected_demand,
            projected_shortfall: (need - supply).max(0.0),
        }
    }
}
