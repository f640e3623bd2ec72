//! Subscription line snapshot records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of a subscription line as recorded by the upstream snapshot.
///
/// Only `Active` lines participate in projection; every other status value is
/// preserved verbatim so it can be reported back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    Active,
    Other(String),
}

impl SubscriptionStatus {
    /// Parse a warehouse status value (case-insensitive for `Active`).
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("active") {
            Self::Active
        } else {
            Self::Other(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for SubscriptionStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<SubscriptionStatus> for String {
    fn from(status: SubscriptionStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Unit of a subscription's fulfillment frequency.
///
/// The warehouse stores the unit as free text. `day`, `week`, `month` and the
/// abbreviation `mon` are recognized; anything else is kept as
/// `Unrecognized` and yields no occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FrequencyUnit {
    Day,
    Week,
    Month,
    Unrecognized(String),
}

impl FrequencyUnit {
    /// Parse a stored frequency unit.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" => Self::Day,
            "week" => Self::Week,
            "month" | "mon" => Self::Month,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for FrequencyUnit {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<FrequencyUnit> for String {
    fn from(unit: FrequencyUnit) -> Self {
        unit.as_str().to_string()
    }
}

/// A recurring-order line from a subscription snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionLine {
    /// Product the line orders.
    pub product_id: String,
    /// Date of the snapshot this line was read from.
    pub snapshot_date: NaiveDate,
    /// Next nominal fulfillment date.
    pub next_fulfillment_date: NaiveDate,
    /// Number of frequency units between fulfillments.
    pub frequency: i64,
    /// Unit of `frequency`; `None` when the warehouse value is null.
    pub frequency_unit: Option<FrequencyUnit>,
    /// Units ordered per fulfillment.
    pub quantity: i64,
    pub status: SubscriptionStatus,
    /// Customer asked to skip the next fulfillment.
    pub skip_next: bool,
    /// One-time order placed through the subscription program.
    pub one_time: bool,
}

impl SubscriptionLine {
    /// An active, non-skipped, recurring line.
    pub fn active(
        product_id: impl Into<String>,
        snapshot_date: NaiveDate,
        next_fulfillment_date: NaiveDate,
        frequency: i64,
        frequency_unit: FrequencyUnit,
        quantity: i64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            snapshot_date,
            next_fulfillment_date,
            frequency,
            frequency_unit: Some(frequency_unit),
            quantity,
            status: SubscriptionStatus::Active,
            skip_next: false,
            one_time: false,
        }
    }

    /// Whether this line takes part in demand projection.
    ///
    /// Requires status Active, not skipping the next fulfillment, not a
    /// one-time order, and a non-null frequency unit.
    pub fn participates(&self) -> bool {
        self.status == SubscriptionStatus::Active
            && !self.skip_next
            && !self.one_time
            && self.frequency_unit.is_some()
    }
}
