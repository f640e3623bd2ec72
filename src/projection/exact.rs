//! Per-occurrence projection with per-drop-date decay.

use tracing::{debug, warn};

use super::calendar::{days_before, occurrences, Period};
use super::{aggregate, DecayCurve, Projection, ProjectionInput, ProjectionStrategy, Result};
use crate::model::ProjectedOccurrence;

/// Enumerates every occurrence inside the horizon and decays each one by its
/// own order-drop-date.
///
/// For each occurrence:
/// 1. the drop-date is the occurrence date minus the pull-forward offset in
///    effect on the occurrence date;
/// 2. occurrences whose drop-date leaves the horizon window are dropped;
/// 3. occurrences whose drop-date is exactly a pull-forward effective date
///    are dropped, since those orders are reported by the settled-order feed;
/// 4. the quantity is multiplied by the decay rate for `drop - today`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactDecayProjection {
    curve: DecayCurve,
}

impl ExactDecayProjection {
    pub const NAME: &'static str = "exact";
}

impl ProjectionStrategy for ExactDecayProjection {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn project(&self, input: &ProjectionInput<'_>) -> Result<Projection> {
        let mut projected = Vec::new();

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

            for occurrence_date in occurrences(line.next_fulfillment_date, period, input.window) {
                let offset = input.schedule.offset_on(occurrence_date);
                let Some(order_drop_date) = days_before(occurrence_date, offset) else {
                    continue;
                };
                if !input.window.contains(order_drop_date) {
                    continue;
                }
                if input.schedule.is_effective_date(order_drop_date) {
                    debug!(
                        product_id = %line.product_id,
                        %order_drop_date,
                        "Occurrence already covered by settled orders"
                    );
                    continue;
                }

                let days_out = (order_drop_date - input.today).num_days();
                let decay_rate = self.curve.rate(days_out);
                projected.push(ProjectedOccurrence {
                    product_id: line.product_id.clone(),
                    occurrence_date,
                    order_drop_date,
                    days_out,
                    quantity: line.quantity,
                    decay_rate,
                    adjusted_quantity: line.quantity as f64 * decay_rate,
                });
            }
        }

        projected.sort_by(|a, b| {
            a.product_id
                .cmp(&b.product_id)
                .then(a.order_drop_date.cmp(&b.order_drop_date))
                .then(a.occurrence_date.cmp(&b.occurrence_date))
        });

        let demand = aggregate(
            projected
                .iter()
                .map(|o| (o.product_id.as_str(), o.adjusted_quantity)),
        );

        Ok(Projection {
            strategy: Self::NAME,
            occurrences: projected,
            demand,
        })
    }
}
