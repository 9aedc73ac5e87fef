use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{DataStore, Metric};
use crate::error::{DashError, DashResult};

/// One dated sample of the active metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Date-ascending metric samples for one entity.
///
/// Rows whose metric cell is absent contribute no point, so partial data
/// shows up as gaps rather than zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySeries {
    pub entity: String,
    pub points: Vec<SeriesPoint>,
}

impl EntitySeries {
    #[must_use]
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        // Points are date-ascending, so the extent is the first/last pair.
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|point| point.value)
            .fold(None, |best, value| match best {
                Some(current) if current >= value => Some(current),
                _ => Some(value),
            })
    }
}

/// Builds one series per plotted entity for the active metric.
///
/// An empty selection yields exactly one series for the whole-population
/// entity; a non-empty selection yields exactly one series per selected
/// entity, in selection insertion order. An entity that yields zero points is
/// reported as [`DashError::EmptySeries`] rather than silently omitted, since
/// omission would desynchronize the chart and map entity counts.
pub fn build_series_index(
    store: &DataStore,
    selection: &IndexSet<String>,
    metric: Metric,
    population_entity: &str,
) -> DashResult<IndexMap<String, EntitySeries>> {
    let mut index = IndexMap::with_capacity(selection.len().max(1));

    if selection.is_empty() {
        let series = build_series(store, population_entity, metric)?;
        index.insert(population_entity.to_owned(), series);
    } else {
        for entity in selection {
            let series = build_series(store, entity, metric)?;
            index.insert(entity.clone(), series);
        }
    }

    trace!(
        metric = %metric,
        series_count = index.len(),
        "built series index"
    );
    Ok(index)
}

fn build_series(store: &DataStore, entity: &str, metric: Metric) -> DashResult<EntitySeries> {
    // Canonical order is (entity, date) ascending, so the filtered
    // subsequence is already sorted by date.
    let points: Vec<SeriesPoint> = store
        .observations()
        .iter()
        .filter(|observation| observation.entity == entity)
        .filter_map(|observation| {
            observation.values.get(metric).map(|value| SeriesPoint {
                date: observation.date,
                value,
            })
        })
        .collect();

    if points.is_empty() {
        return Err(DashError::EmptySeries {
            entity: entity.to_owned(),
        });
    }

    Ok(EntitySeries {
        entity: entity.to_owned(),
        points,
    })
}
