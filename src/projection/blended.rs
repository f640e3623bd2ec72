//! Count-based projection with a single blended decay rate.

use tracing::{debug, warn};

use super::calendar::{days_before, estimated_occurrence_count, Period};
use super::{aggregate, Projection, ProjectionInput, ProjectionStrategy, Result, BLENDED_RATE};

/// Estimates occurrences per line arithmetically and applies
/// [`BLENDED_RATE`] to all of them.
///
/// The pull-forward offset in effect today is resolved once per run and
/// moves each line's first drop-date back; the count is then taken up to the
/// horizon end with [`estimated_occurrence_count`]. No per-occurrence detail
/// is produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlendedRateProjection;

impl BlendedRateProjection {
    pub const NAME: &'static str = "blended";
}

impl ProjectionStrategy for BlendedRateProjection {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn project(&self, input: &ProjectionInput<'_>) -> Result<Projection> {
        let current_offset = input.schedule.offset_on(input.today);
        let mut quantities = Vec::new();

        for line in input.participating_lines() {
            let Some(period) = Period::for_line(line) else {
                debug!(
                    product_id = %line.product_id,
                    frequency = line.frequency,
                    unit = ?line.frequency_unit,
                    "Skipping line without a usable period"
                );
                continue;
            };
            if line.quantity < 0 {
                warn!(
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    "Skipping line with negative quantity"
                );
                continue;
            }
            let Some(first_drop) = days_before(line.next_fulfillment_date, current_offset) else {
                continue;
            };

            let count = estimated_occurrence_count(first_drop, period, input.window.end);
            if count == 0 {
                continue;
            }
            quantities.push((
                line.product_id.as_str(),
                line.quantity as f64 * count as f64 * BLENDED_RATE,
            ));
        }

        Ok(Projection {
            strategy: Self::NAME,
            occurrences: Vec::new(),
            demand: aggregate(quantities),
        })
    }
}
