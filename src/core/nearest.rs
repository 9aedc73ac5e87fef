use chrono::NaiveDate;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntitySeries, SeriesPoint};
use crate::error::{DashError, DashResult};

/// One nearest-sample row for the pointer-tracking overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverSample {
    pub entity: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// Returns the observation closest in time to `query`.
///
/// Linear scan in ascending date order; a candidate replaces the incumbent
/// when its absolute day distance is less than *or equal to* the minimum so
/// far, so an exact tie resolves to the later date. The tie direction is
/// observable at midpoints between sample days and is load-bearing for
/// overlay snapping, so it must not change.
pub fn nearest_point(series: &EntitySeries, query: NaiveDate) -> DashResult<SeriesPoint> {
    let mut best: Option<(i64, SeriesPoint)> = None;
    for point in &series.points {
        let distance = (point.date - query).num_days().abs();
        match best {
            Some((current, _)) if current < distance => {}
            _ => best = Some((distance, *point)),
        }
    }

    best.map(|(_, point)| point)
        .ok_or_else(|| DashError::EmptySeries {
            entity: series.entity.clone(),
        })
}

/// Runs the nearest query across every series in the index.
///
/// Results are sorted descending by metric value so stacked overlay labels
/// keep a consistent order between pointer events. Recomputed per event,
/// never cached; O(total points) is fine at this dataset scale.
pub fn nearest_points(
    index: &IndexMap<String, EntitySeries>,
    query: NaiveDate,
) -> DashResult<Vec<HoverSample>> {
    let mut samples: SmallVec<[HoverSample; 8]> = SmallVec::with_capacity(index.len());
    for series in index.values() {
        let point = nearest_point(series, query)?;
        samples.push(HoverSample {
            entity: series.entity.clone(),
            date: point.date,
            value: point.value,
        });
    }

    samples.sort_by_key(|sample| std::cmp::Reverse(OrderedFloat(sample.value)));
    Ok(samples.into_vec())
}
