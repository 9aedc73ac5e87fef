use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::Metric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Per-observation metric cells, indexed by [`Metric::index`].
///
/// `None` means the source cell was empty or non-numeric. Absent is distinct
/// from zero everywhere downstream: aggregation skips absent cells and series
/// construction turns them into gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricValues([Option<f64>; Metric::COUNT]);

impl MetricValues {
    #[must_use]
    pub fn get(self, metric: Metric) -> Option<f64> {
        self.0[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.0[metric.index()] = value;
    }
}

/// One normalized dataset row: an entity, a date, and its metric cells.
///
/// Observations are immutable once loaded. Within one entity no two
/// observations share a date after canonicalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub entity: String,
    pub date: NaiveDate,
    pub values: MetricValues,
}

impl Observation {
    #[must_use]
    pub fn new(entity: impl Into<String>, date: NaiveDate, values: MetricValues) -> Self {
        Self {
            entity: entity.into(),
            date,
            values,
        }
    }
}
