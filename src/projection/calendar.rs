//! Calendar arithmetic for subscription periods.

use chrono::{Months, NaiveDate, TimeDelta};

use crate::model::{FrequencyUnit, SubscriptionLine};

/// Recurrence period of a subscription line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Days(u32),
    Weeks(u32),
    Months(u32),
}

impl Period {
    /// Period of a subscription line.
    ///
    /// Returns `None` for a null or unrecognized unit and for a non-positive
    /// frequency; such lines produce no occurrences.
    pub fn for_line(line: &SubscriptionLine) -> Option<Self> {
        let count = u32::try_from(line.frequency).ok().filter(|c| *c > 0)?;
        match line.frequency_unit.as_ref()? {
            FrequencyUnit::Day => Some(Self::Days(count)),
            FrequencyUnit::Week => Some(Self::Weeks(count)),
            FrequencyUnit::Month => Some(Self::Months(count)),
            FrequencyUnit::Unrecognized(_) => None,
        }
    }

    /// `start` advanced by `multiplier` whole periods.
    ///
    /// Month periods use calendar months: the day of month is kept and
    /// clamped to the last day of shorter months (Jan 31 + 1 month = Feb 28).
    /// Each multiple is computed from `start`, so clamping never accumulates.
    pub fn nth_after(&self, start: NaiveDate, multiplier: u32) -> Option<NaiveDate> {
        let multiplier = u64::from(multiplier);
        match *self {
            Self::Days(n) => start.checked_add_days(chrono::Days::new(u64::from(n) * multiplier)),
            Self::Weeks(n) => {
                start.checked_add_days(chrono::Days::new(u64::from(n) * 7 * multiplier))
            }
            Self::Months(n) => {
                let months = u32::try_from(u64::from(n) * multiplier).ok()?;
                start.checked_add_months(Months::new(months))
            }
        }
    }

    /// Period length in days for count-based estimates (a month counts as 30).
    pub fn approx_days(&self) -> i64 {
        match *self {
            Self::Days(n) => i64::from(n),
            Self::Weeks(n) => i64::from(n) * 7,
            Self::Months(n) => i64::from(n) * 30,
        }
    }

    pub fn is_monthly(&self) -> bool {
        matches!(self, Self::Months(_))
    }
}

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// `[today + 1, today + horizon_days]`.
    pub fn horizon(today: NaiveDate, horizon_days: u32) -> Option<Self> {
        let start = today.checked_add_days(chrono::Days::new(1))?;
        let end = today.checked_add_days(chrono::Days::new(u64::from(horizon_days)))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Every occurrence of `period` from `first` that falls inside `window`.
///
/// Occurrence `k` is `first + k * period` for `k = 0, 1, ...`; enumeration
/// stops at the first occurrence past the window end.
pub fn occurrences(
    first: NaiveDate,
    period: Period,
    window: DateWindow,
) -> impl Iterator<Item = NaiveDate> {
    (0u32..)
        .map_while(move |k| period.nth_after(first, k))
        .take_while(move |date| *date <= window.end)
        .filter(move |date| *date >= window.start)
}

/// Count-based occurrence estimate used by the blended projection.
///
/// `floor((horizon_end - first) / period_days) + 1`, clamped at zero. Monthly
/// periods are additionally clamped to at most one occurrence, which
/// under-counts short monthly periods; the clamp is kept so the blended
/// figures stay comparable with the reports built on it.
pub fn estimated_occurrence_count(first: NaiveDate, period: Period, horizon_end: NaiveDate) -> i64 {
    let days_remaining = (horizon_end - first).num_days();
    let count = (days_remaining.div_euclid(period.approx_days()) + 1).max(0);
    if period.is_monthly() {
        count.min(1)
    } else {
        count
    }
}

/// `date` moved back by `days`; negative values move it forward.
pub fn days_before(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_sub_signed(delta))
}
