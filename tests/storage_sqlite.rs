//! SQLite snapshot source integration tests.
//!
//! Run with: cargo test --test storage_sqlite --features sqlite
//!
//! Uses an in-memory database with the shipped migrations, no external
//! dependencies required.

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;

use autoship_demand::model::FrequencyUnit;
use autoship_demand::storage::{SnapshotSource, SqliteSnapshotSource};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 10, 16)
}

async fn connect_and_migrate() -> SqliteSnapshotSource {
    // One connection: each in-memory connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to SQLite");

    let source = SqliteSnapshotSource::new(pool);
    source.migrate().await.expect("Failed to run migrations");
    source
}

#[allow(clippy::too_many_arguments)]
async fn insert_line(
    source: &SqliteSnapshotSource,
    product_id: &str,
    snapshot_date: NaiveDate,
    next_fulfillment_date: NaiveDate,
    frequency_unit: Option<&str>,
    status: &str,
    skip_next: bool,
    one_time: bool,
) {
    sqlx::query(
        "INSERT INTO subscription_line_snapshots
            (product_id, snapshot_date, next_fulfillment_date, frequency, frequency_unit,
             quantity, status, skip_next, one_time)
         VALUES (?, ?, ?, 1, ?, 3, ?, ?, ?)",
    )
    .bind(product_id)
    .bind(snapshot_date)
    .bind(next_fulfillment_date)
    .bind(frequency_unit)
    .bind(status)
    .bind(skip_next)
    .bind(one_time)
    .execute(source.pool())
    .await
    .expect("Failed to insert subscription line");
}

async fn insert_active(source: &SqliteSnapshotSource, product_id: &str, snapshot: NaiveDate, next: NaiveDate) {
    insert_line(source, product_id, snapshot, next, Some("week"), "Active", false, false).await;
}

#[tokio::test]
async fn test_latest_snapshot_date() {
    let source = connect_and_migrate().await;

    assert_eq!(source.latest_snapshot_date(today()).await.unwrap(), None);

    insert_active(&source, "A", date(2026, 10, 1), date(2026, 10, 20)).await;
    insert_active(&source, "A", date(2026, 10, 15), date(2026, 10, 20)).await;
    insert_active(&source, "A", date(2026, 10, 17), date(2026, 10, 20)).await;

    assert_eq!(
        source.latest_snapshot_date(today()).await.unwrap(),
        Some(date(2026, 10, 15))
    );
}

#[tokio::test]
async fn test_subscription_lines_filters_and_order() {
    let source = connect_and_migrate().await;
    let snapshot = date(2026, 10, 15);

    insert_active(&source, "OLD", date(2026, 10, 1), date(2026, 10, 20)).await;
    insert_active(&source, "B", snapshot, date(2026, 10, 25)).await;
    insert_active(&source, "A", snapshot, date(2026, 10, 30)).await;
    insert_active(&source, "A", snapshot, date(2026, 10, 18)).await;
    insert_active(&source, "PAST", snapshot, today()).await;
    insert_line(&source, "PAUSED", snapshot, date(2026, 10, 20), Some("week"), "Paused", false, false).await;
    insert_line(&source, "SKIP", snapshot, date(2026, 10, 20), Some("week"), "Active", true, false).await;
    insert_line(&source, "ONCE", snapshot, date(2026, 10, 20), Some("week"), "Active", false, true).await;
    insert_line(&source, "NO-UNIT", snapshot, date(2026, 10, 20), None, "Active", false, false).await;

    let lines = source.subscription_lines(today()).await.unwrap();

    let keys: Vec<_> = lines
        .iter()
        .map(|l| (l.product_id.as_str(), l.next_fulfillment_date))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("A", date(2026, 10, 18)),
            ("A", date(2026, 10, 30)),
            ("B", date(2026, 10, 25)),
        ]
    );
    assert!(lines.iter().all(|l| l.snapshot_date == snapshot));
    assert!(lines.iter().all(|l| l.participates()));
    assert_eq!(lines[0].frequency_unit, Some(FrequencyUnit::Week));
    assert_eq!(lines[0].quantity, 3);
}

#[tokio::test]
async fn test_unrecognized_unit_is_loaded() {
    let source = connect_and_migrate().await;
    insert_line(&source, "A", today(), date(2026, 10, 20), Some("fortnight"), "Active", false, false).await;

    let lines = source.subscription_lines(today()).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].frequency_unit,
        Some(FrequencyUnit::Unrecognized("fortnight".to_string()))
    );
}

#[tokio::test]
async fn test_pull_forward_settings_ordered_by_effective_date() {
    let source = connect_and_migrate().await;
    for (effective, days) in [(date(2026, 10, 1), 3), (date(2026, 9, 1), 2)] {
        sqlx::query("INSERT INTO pull_forward_events (effective_date, pull_forward_days) VALUES (?, ?)")
            .bind(effective)
            .bind(days as i64)
            .execute(source.pool())
            .await
            .unwrap();
    }

    let settings = source.pull_forward_settings().await.unwrap();

    assert_eq!(settings.len(), 2);
    assert_eq!(settings[0].effective_date, date(2026, 9, 1));
    assert_eq!(settings[0].pull_forward_days, 2);
    assert_eq!(settings[1].effective_date, date(2026, 10, 1));
    assert_eq!(settings[1].pull_forward_days, 3);
}

#[tokio::test]
async fn test_product_metrics() {
    let source = connect_and_migrate().await;
    sqlx::query(
        "INSERT INTO product_report_metrics
            (product_id, vendor_id, on_hand_units, on_order_units, backorder_units, stockout_pct, fill_rate)
         VALUES ('B', 'V-1', 10, 5, 0, NULL, 0.9),
                ('A', 'V-2', 1, 0, 4, 0.25, NULL),
                ('A', 'V-1', 7, 2, 0, NULL, NULL)",
    )
    .execute(source.pool())
    .await
    .unwrap();

    let metrics = source.product_metrics().await.unwrap();

    let keys: Vec<_> = metrics
        .iter()
        .map(|m| (m.product_id.as_str(), m.vendor_id.as_str()))
        .collect();
    assert_eq!(keys, vec![("A", "V-1"), ("A", "V-2"), ("B", "V-1")]);
    assert_eq!(metrics[1].backorder_units, 4);
    assert_eq!(metrics[1].stockout_pct, Some(0.25));
    assert_eq!(metrics[2].fill_rate, Some(0.9));
    assert_eq!(metrics[0].stockout_pct, None);
}
