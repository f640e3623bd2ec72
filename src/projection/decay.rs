//! Success-rate decay curve.
//!
//! Empirically tuned multipliers keyed on the number of days between today
//! and the order-drop-date. The curve is a constant table.

/// Rates for 1 through 5 days out.
const STEPS: [(i64, f64); 5] = [(1, 0.87), (2, 0.83), (3, 0.79), (4, 0.76), (5, 0.63)];

/// Rate for 6+ days out and for any day count outside the table.
pub const TAIL_RATE: f64 = 0.60;

/// Single multiplier applied by the count-based projection in place of the
/// per-day curve.
pub const BLENDED_RATE: f64 = 0.72;

/// Step function from days-out to success rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayCurve;

impl DecayCurve {
    /// Success rate for an order dropping `days_out` days from today.
    pub fn rate(&self, days_out: i64) -> f64 {
        STEPS
            .iter()
            .find(|(days, _)| *days == days_out)
            .map(|(_, rate)| *rate)
            .unwrap_or(TAIL_RATE)
    }
}
