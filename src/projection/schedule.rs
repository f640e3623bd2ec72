//! Pull-forward offset resolution.

use chrono::NaiveDate;

use crate::model::PullForwardSetting;

/// Pull-forward history ordered by effective date.
///
/// Resolved per date: a projected occurrence uses the setting in effect on
/// its own date, which may differ from the one in effect today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullForwardSchedule {
    settings: Vec<PullForwardSetting>,
}

impl PullForwardSchedule {
    /// Build a schedule from settings in any order.
    ///
    /// When two settings share an effective date the one listed last wins.
    pub fn new(mut settings: Vec<PullForwardSetting>) -> Self {
        settings.sort_by_key(|s| s.effective_date);
        Self { settings }
    }

    pub fn settings(&self) -> &[PullForwardSetting] {
        &self.settings
    }

    /// Offset in effect on `date`: the latest setting effective on or before
    /// it, or 0 when none is.
    pub fn offset_on(&self, date: NaiveDate) -> i64 {
        let idx = self.settings.partition_point(|s| s.effective_date <= date);
        match idx {
            0 => 0,
            n => self.settings[n - 1].pull_forward_days,
        }
    }

    /// Whether some setting became effective exactly on `date`.
    pub fn is_effective_date(&self, date: NaiveDate) -> bool {
        self.settings
            .binary_search_by_key(&date, |s| s.effective_date)
            .is_ok()
    }
}
