//! Warehouse schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.
//! Every query lists its columns explicitly.

use sea_query::Iden;

/// Subscription line snapshots table schema.
#[derive(Iden)]
pub enum SubscriptionLineSnapshots {
    Table,
    #[iden = "product_id"]
    ProductId,
    #[iden = "snapshot_date"]
    SnapshotDate,
    #[iden = "next_fulfillment_date"]
    NextFulfillmentDate,
    #[iden = "frequency"]
    Frequency,
    #[iden = "frequency_unit"]
    FrequencyUnit,
    #[iden = "quantity"]
    Quantity,
    #[iden = "status"]
    Status,
    #[iden = "skip_next"]
    SkipNext,
    #[iden = "one_time"]
    OneTime,
}

/// Pull-forward events table schema.
#[derive(Iden)]
pub enum PullForwardEvents {
    Table,
    #[iden = "effective_date"]
    EffectiveDate,
    #[iden = "pull_forward_days"]
    PullForwardDays,
}

/// Per-product report metrics table schema.
#[derive(Iden)]
pub enum ProductReportMetrics {
    Table,
    #[iden = "product_id"]
    ProductId,
    #[iden = "vendor_id"]
    VendorId,
    #[iden = "on_hand_units"]
    OnHandUnits,
    #[iden = "on_order_units"]
    OnOrderUnits,
    #[iden = "backorder_units"]
    BackorderUnits,
    #[iden = "stockout_pct"]
    StockoutPct,
    #[iden = "fill_rate"]
    FillRate,
}

/// Status value of lines that take part in projection.
pub const ACTIVE_STATUS: &str = "Active";
