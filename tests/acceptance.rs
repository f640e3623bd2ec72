//! Acceptance tests using cucumber-rs (Gherkin).

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use cucumber::{given, then, when, World};

use autoship_demand::model::{FrequencyUnit, ProductMetrics, PullForwardSetting, SubscriptionLine};
use autoship_demand::projection::{ProjectionError, StrategyKind};
use autoship_demand::services::{DemandReport, DemandReportService, ReportError};
use autoship_demand::storage::MockSnapshotSource;

/// Test world containing all test state.
#[derive(World)]
#[world(init = Self::new)]
pub struct TestWorld {
    source: Arc<MockSnapshotSource>,
    today: NaiveDate,
    report: Option<DemandReport>,
    /// Last error from a failed run.
    last_error: Option<ReportError>,
}

impl std::fmt::Debug for TestWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestWorld")
            .field("today", &self.today)
            .field("has_report", &self.report.is_some())
            .finish()
    }
}

impl TestWorld {
    fn new() -> Self {
        Self {
            source: Arc::new(MockSnapshotSource::new()),
            today: NaiveDate::default(),
            report: None,
            last_error: None,
        }
    }

    fn days_from_today(&self, days: u64) -> NaiveDate {
        self.today + Days::new(days)
    }

    fn report(&self) -> &DemandReport {
        self.report
            .as_ref()
            .expect("Expected a report, but the run failed or never happened")
    }

    fn demand_for(&self, product_id: &str) -> f64 {
        self.report()
            .rows
            .iter()
            .find(|r| r.product_id == product_id)
            .map(|r| r.projected_demand)
            .unwrap_or_else(|| self.report().projection.demand_for(product_id))
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// Step implementations

#[given(regex = r"^today is (\d{4}-\d{2}-\d{2})$")]
async fn given_today(world: &mut TestWorld, today: String) {
    world.today = today.parse().expect("Invalid date");
}

#[given(
    expr = "a subscription for {string} every {int} {word} with quantity {int} next fulfilled in {int} days"
)]
async fn given_subscription(
    world: &mut TestWorld,
    product_id: String,
    frequency: i64,
    unit: String,
    quantity: i64,
    next_in: u64,
) {
    let line = SubscriptionLine::active(
        product_id,
        world.today,
        world.days_from_today(next_in),
        frequency,
        FrequencyUnit::parse(&unit),
        quantity,
    );
    world.source.add_line(line).await;
}

#[given(expr = "product {string} from vendor {string} with {int} on hand and {int} on order")]
async fn given_product(
    world: &mut TestWorld,
    product_id: String,
    vendor_id: String,
    on_hand: i64,
    on_order: i64,
) {
    world
        .source
        .add_metrics(ProductMetrics {
            product_id,
            vendor_id,
            on_hand_units: on_hand,
            on_order_units: on_order,
            backorder_units: 0,
            stockout_pct: None,
            fill_rate: None,
        })
        .await;
}

#[given(expr = "a pull-forward of {int} days effective today")]
async fn given_pull_forward_today(world: &mut TestWorld, days: i64) {
    let setting = PullForwardSetting::new(world.today, days);
    world.source.add_setting(setting).await;
}

#[given(expr = "a pull-forward of {int} days effective in {int} days")]
async fn given_pull_forward_later(world: &mut TestWorld, days: i64, effective_in: u64) {
    let setting = PullForwardSetting::new(world.days_from_today(effective_in), days);
    world.source.add_setting(setting).await;
}

#[when(expr = "the {word} report runs with a {int} day horizon")]
async fn when_report_runs(world: &mut TestWorld, strategy: String, horizon_days: i64) {
    let strategy = match strategy.as_str() {
        "exact" => StrategyKind::Exact,
        "blended" => StrategyKind::Blended,
        other => panic!("Unknown strategy '{}'", other),
    };
    let service = DemandReportService::new(world.source.clone(), strategy.build(), horizon_days);
    match service.run(world.today).await {
        Ok(report) => {
            world.report = Some(report);
            world.last_error = None;
        }
        Err(e) => {
            world.report = None;
            world.last_error = Some(e);
        }
    }
}

#[then(expr = "the projection has {int} occurrences for {string}")]
async fn then_occurrence_count(world: &mut TestWorld, expected: usize, product_id: String) {
    let count = world
        .report()
        .projection
        .occurrences
        .iter()
        .filter(|o| o.product_id == product_id)
        .count();
    assert_eq!(count, expected);
}

#[then(expr = "the projected demand for {string} is {float}")]
async fn then_projected_demand(world: &mut TestWorld, product_id: String, expected: f64) {
    assert_close(world.demand_for(&product_id), expected);
}

#[then(expr = "the projected shortfall for {string} is {float}")]
async fn then_projected_shortfall(world: &mut TestWorld, product_id: String, expected: f64) {
    let row = world
        .report()
        .rows
        .iter()
        .find(|r| r.product_id == product_id)
        .expect("Expected a report row for the product");
    assert_close(row.projected_shortfall, expected);
}

#[then(expr = "{string} has no projected demand")]
async fn then_no_demand(world: &mut TestWorld, product_id: String) {
    let projection = &world.report().projection;
    assert!(
        projection.demand.iter().all(|d| d.product_id != product_id),
        "Expected '{}' to be absent from projected demand",
        product_id
    );
    assert!(projection.occurrences.iter().all(|o| o.product_id != product_id));
}

#[then(expr = "the first occurrence for {string} drops in {int} days")]
async fn then_first_drop(world: &mut TestWorld, product_id: String, days: u64) {
    let occurrence = world
        .report()
        .projection
        .occurrences
        .iter()
        .find(|o| o.product_id == product_id)
        .expect("Expected an occurrence for the product");
    assert_eq!(occurrence.order_drop_date, world.days_from_today(days));
}

#[then("the report fails with an invalid horizon")]
async fn then_invalid_horizon(world: &mut TestWorld) {
    let error = world
        .last_error
        .as_ref()
        .expect("Expected the run to fail, but it succeeded");
    assert!(
        matches!(
            error,
            ReportError::Projection(ProjectionError::InvalidHorizon { .. })
        ),
        "Expected an invalid horizon error, got '{}'",
        error
    );
}

#[tokio::main]
async fn main() {
    TestWorld::cucumber().run_and_exit("tests/features").await;
}
