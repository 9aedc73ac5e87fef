use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{DataStore, Metric};

/// Arithmetic mean of one metric across every dated observation of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityAggregate {
    pub mean: f64,
    pub count: usize,
}

/// Computes the per-entity mean of `metric` over the full dataset.
///
/// Entities with zero present values for the metric are absent from the
/// mapping, not zero; callers must render absent entities as "no data".
/// Deterministic: iteration follows canonical dataset order, so repeat calls
/// over the same store are bit-identical.
#[must_use]
pub fn aggregate(store: &DataStore, metric: Metric) -> IndexMap<String, EntityAggregate> {
    let mut sums: IndexMap<String, (f64, usize)> = IndexMap::new();
    for observation in store.observations() {
        let Some(value) = observation.values.get(metric) else {
            continue;
        };
        let slot = sums
            .entry(observation.entity.clone())
            .or_insert((0.0, 0_usize));
        slot.0 += value;
        slot.1 += 1;
    }

    let aggregates: IndexMap<String, EntityAggregate> = sums
        .into_iter()
        .map(|(entity, (sum, count))| {
            (
                entity,
                EntityAggregate {
                    mean: sum / count as f64,
                    count,
                },
            )
        })
        .collect();

    trace!(
        metric = %metric,
        entity_count = aggregates.len(),
        "aggregated metric means"
    );
    aggregates
}

/// Maximum mean across entities, excluding the whole-population entity.
///
/// Drives the map color domain upper bound. The population aggregate row
/// still participates in per-entity display; it is only barred from domain
/// construction so it cannot flatten every state into the bottom of the
/// scale. Returns `None` when no other entity has data.
#[must_use]
pub fn color_scale_max(
    aggregates: &IndexMap<String, EntityAggregate>,
    population_entity: &str,
) -> Option<f64> {
    aggregates
        .iter()
        .filter(|(entity, _)| entity.as_str() != population_entity)
        .map(|(_, aggregate)| OrderedFloat(aggregate.mean))
        .max()
        .map(OrderedFloat::into_inner)
}
