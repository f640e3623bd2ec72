//! Unified SQL SnapshotSource implementation.
//!
//! Uses a macro to generate implementations for each SQL backend,
//! eliminating code duplication while maintaining type safety.

use std::marker::PhantomData;

use super::SqlDatabase;

/// SQL-based implementation of SnapshotSource.
///
/// This generic implementation works with any SQL database that implements
/// the `SqlDatabase` trait (PostgreSQL, SQLite).
pub struct SqlSnapshotSource<DB: SqlDatabase> {
    pool: DB::Pool,
    _marker: PhantomData<DB>,
}

impl<DB: SqlDatabase> SqlSnapshotSource<DB> {
    /// Create a new SQL snapshot source with the given pool.
    pub fn new(pool: DB::Pool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &DB::Pool {
        &self.pool
    }
}

/// Macro to implement SnapshotSource for a specific SQL backend.
///
/// `$migrations` is the migration directory for the backend's dialect.
macro_rules! impl_snapshot_source {
    ($db_type:ty, $feature:literal, $migrations:literal) => {
        #[cfg(feature = $feature)]
        impl SqlSnapshotSource<$db_type> {
            /// Apply the bundled warehouse migrations.
            ///
            /// Only needed for local and test databases; the production
            /// warehouse owns its schema.
            pub async fn migrate(&self) -> crate::storage::Result<()> {
                sqlx::migrate!($migrations).run(&self.pool).await?;
                Ok(())
            }
        }

        #[cfg(feature = $feature)]
        #[async_trait::async_trait]
        impl crate::storage::SnapshotSource for SqlSnapshotSource<$db_type> {
            async fn latest_snapshot_date(
                &self,
                today: chrono::NaiveDate,
            ) -> crate::storage::Result<Option<chrono::NaiveDate>> {
                use sea_query::{Alias, Expr, Query};
                use sqlx::Row;

                use crate::storage::schema::SubscriptionLineSnapshots;

                let stmt = Query::select()
                    .expr_as(
                        Expr::col(SubscriptionLineSnapshots::SnapshotDate).max(),
                        Alias::new("latest"),
                    )
                    .from(SubscriptionLineSnapshots::Table)
                    .and_where(Expr::col(SubscriptionLineSnapshots::SnapshotDate).lte(today))
                    .to_owned();

                let sql = <$db_type>::build_select(stmt);
                let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
                let latest: Option<chrono::NaiveDate> = row.try_get("latest")?;
                Ok(latest)
            }

            async fn subscription_lines(
                &self,
                today: chrono::NaiveDate,
            ) -> crate::storage::Result<Vec<crate::model::SubscriptionLine>> {
                use sea_query::{Expr, Order, Query};
                use sqlx::Row;

                use crate::model::{FrequencyUnit, SubscriptionLine, SubscriptionStatus};
                use crate::storage::schema::{SubscriptionLineSnapshots, ACTIVE_STATUS};
                use crate::storage::SnapshotSource;

                let Some(snapshot_date) = self.latest_snapshot_date(today).await? else {
                    return Ok(Vec::new());
                };

                let stmt = Query::select()
                    .columns([
                        SubscriptionLineSnapshots::ProductId,
                        SubscriptionLineSnapshots::SnapshotDate,
                        SubscriptionLineSnapshots::NextFulfillmentDate,
                        SubscriptionLineSnapshots::Frequency,
                        SubscriptionLineSnapshots::FrequencyUnit,
                        SubscriptionLineSnapshots::Quantity,
                        SubscriptionLineSnapshots::Status,
                        SubscriptionLineSnapshots::SkipNext,
                        SubscriptionLineSnapshots::OneTime,
                    ])
                    .from(SubscriptionLineSnapshots::Table)
                    .and_where(Expr::col(SubscriptionLineSnapshots::SnapshotDate).eq(snapshot_date))
                    .and_where(Expr::col(SubscriptionLineSnapshots::Status).eq(ACTIVE_STATUS))
                    .and_where(Expr::col(SubscriptionLineSnapshots::SkipNext).eq(false))
                    .and_where(Expr::col(SubscriptionLineSnapshots::OneTime).eq(false))
                    .and_where(Expr::col(SubscriptionLineSnapshots::FrequencyUnit).is_not_null())
                    .and_where(Expr::col(SubscriptionLineSnapshots::NextFulfillmentDate).gt(today))
                    .order_by(SubscriptionLineSnapshots::ProductId, Order::Asc)
                    .order_by(SubscriptionLineSnapshots::NextFulfillmentDate, Order::Asc)
                    .to_owned();

                let sql = <$db_type>::build_select(stmt);
                let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

                rows.iter()
                    .map(|row| -> crate::storage::Result<SubscriptionLine> {
                        let unit: Option<String> = row.try_get("frequency_unit")?;
                        let status: String = row.try_get("status")?;
                        Ok(SubscriptionLine {
                            product_id: row.try_get("product_id")?,
                            snapshot_date: row.try_get("snapshot_date")?,
                            next_fulfillment_date: row.try_get("next_fulfillment_date")?,
                            frequency: row.try_get("frequency")?,
                            frequency_unit: unit.as_deref().map(FrequencyUnit::parse),
                            quantity: row.try_get("quantity")?,
                            status: SubscriptionStatus::parse(&status),
                            skip_next: row.try_get("skip_next")?,
                            one_time: row.try_get("one_time")?,
                        })
                    })
                    .collect()
            }

            async fn pull_forward_settings(
                &self,
            ) -> crate::storage::Result<Vec<crate::model::PullForwardSetting>> {
                use sea_query::{Order, Query};
                use sqlx::Row;

                use crate::model::PullForwardSetting;
                use crate::storage::schema::PullForwardEvents;

                let stmt = Query::select()
                    .columns([
                        PullForwardEvents::EffectiveDate,
                        PullForwardEvents::PullForwardDays,
                    ])
                    .from(PullForwardEvents::Table)
                    .order_by(PullForwardEvents::EffectiveDate, Order::Asc)
                    .to_owned();

                let sql = <$db_type>::build_select(stmt);
                let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

                rows.iter()
                    .map(|row| -> crate::storage::Result<PullForwardSetting> {
                        Ok(PullForwardSetting {
                            effective_date: row.try_get("effective_date")?,
                            pull_forward_days: row.try_get("pull_forward_days")?,
                        })
                    })
                    .collect()
            }

            async fn product_metrics(
                &self,
            ) -> crate::storage::Result<Vec<crate::model::ProductMetrics>> {
                use sea_query::{Order, Query};
                use sqlx::Row;

                use crate::model::ProductMetrics;
                use crate::storage::schema::ProductReportMetrics;

                let stmt = Query::select()
                    .columns([
                        ProductReportMetrics::ProductId,
                        ProductReportMetrics::VendorId,
                        ProductReportMetrics::OnHandUnits,
                        ProductReportMetrics::OnOrderUnits,
                        ProductReportMetrics::BackorderUnits,
                        ProductReportMetrics::StockoutPct,
                        ProductReportMetrics::FillRate,
                    ])
                    .from(ProductReportMetrics::Table)
                    .order_by(ProductReportMetrics::ProductId, Order::Asc)
                    .order_by(ProductReportMetrics::VendorId, Order::Asc)
                    .to_owned();

                let sql = <$db_type>::build_select(stmt);
                let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

                rows.iter()
                    .map(|row| -> crate::storage::Result<ProductMetrics> {
                        Ok(ProductMetrics {
                            product_id: row.try_get("product_id")?,
                            vendor_id: row.try_get("vendor_id")?,
                            on_hand_units: row.try_get("on_hand_units")?,
                            on_order_units: row.try_get("on_order_units")?,
                            backorder_units: row.try_get("backorder_units")?,
                            stockout_pct: row.try_get("stockout_pct")?,
                            fill_rate: row.try_get("fill_rate")?,
                        })
                    })
                    .collect()
            }
        }
    };
}

// Generate implementations for each SQL backend
impl_snapshot_source!(super::postgres::Postgres, "postgres", "migrations/postgres");
impl_snapshot_source!(super::sqlite::Sqlite, "sqlite", "migrations/sqlite");
