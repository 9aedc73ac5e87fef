use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Metric, MetricValues, Observation};
use crate::error::{DashError, DashResult};

/// Loosely-typed ingestion row as produced by the host's CSV/JSON reader.
///
/// Cells are raw strings keyed by the source column header; normalization and
/// typing happen once inside [`DataStore::load`], never downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawRow {
    #[serde(flatten)]
    pub cells: IndexMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        }
    }
}

/// Column-handling knobs applied during [`DataStore::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Column holding the entity (state) name.
    #[serde(default = "default_entity_column")]
    pub entity_column: String,
    /// Column holding the `YYYY-MM-DD` observation date.
    #[serde(default = "default_date_column")]
    pub date_column: String,
    /// Columns discarded outright before typing.
    #[serde(default = "default_ignored_columns")]
    pub ignored_columns: Vec<String>,
}

fn default_entity_column() -> String {
    "State".to_owned()
}

fn default_date_column() -> String {
    "date".to_owned()
}

fn default_ignored_columns() -> Vec<String> {
    vec!["table_x".to_owned(), "table_y".to_owned(), "Month".to_owned()]
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            entity_column: default_entity_column(),
            date_column: default_date_column(),
            ignored_columns: default_ignored_columns(),
        }
    }
}

/// Observable outcome of one load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoadReport {
    /// Rows that survived into the canonical dataset.
    pub rows_loaded: usize,
    /// Malformed rows dropped during ingestion.
    pub rows_dropped: usize,
    /// Same-(entity, date) rows replaced during canonicalization.
    pub duplicates_replaced: usize,
}

/// Owner of the immutable canonical dataset.
///
/// Observations are sorted by (entity, date) and deduplicated with last-row
/// wins, so per-entity subsequences are already date-ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStore {
    observations: Vec<Observation>,
    report: LoadReport,
}

impl DataStore {
    /// Normalizes, types, and canonicalizes raw rows into a dataset.
    ///
    /// Malformed rows (missing entity or unparseable date) are dropped and
    /// counted; load continues. Fails only when zero rows survive.
    pub fn load(rows: Vec<RawRow>, options: &IngestOptions) -> DashResult<Self> {
        let total = rows.len();
        let mut observations = Vec::with_capacity(total);
        let mut rows_dropped = 0_usize;

        for (row_number, row) in rows.into_iter().enumerate() {
            match parse_row(row, row_number, options) {
                Ok(observation) => observations.push(observation),
                Err(err) => {
                    rows_dropped += 1;
                    warn!(error = %err, "dropping malformed row");
                }
            }
        }

        let (observations, duplicates_replaced) = canonicalize(observations);

        if observations.is_empty() {
            return Err(DashError::EmptyDataset);
        }

        let report = LoadReport {
            rows_loaded: observations.len(),
            rows_dropped,
            duplicates_replaced,
        };
        debug!(
            total,
            rows_loaded = report.rows_loaded,
            rows_dropped = report.rows_dropped,
            duplicates_replaced = report.duplicates_replaced,
            "loaded dataset"
        );

        Ok(Self {
            observations,
            report,
        })
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[must_use]
    pub fn report(&self) -> LoadReport {
        self.report
    }

    /// Entity names in canonical (sorted) order.
    #[must_use]
    pub fn entities(&self) -> IndexSet<String> {
        self.observations
            .iter()
            .map(|observation| observation.entity.clone())
            .collect()
    }
}

fn parse_row(row: RawRow, row_number: usize, options: &IngestOptions) -> DashResult<Observation> {
    let cells = normalize_cells(row, options);

    let entity = cells
        .get(options.entity_column.as_str())
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DashError::MalformedRow {
            row: row_number,
            reason: format!("missing entity column \"{}\"", options.entity_column),
        })?;

    let date_cell = cells
        .get(options.date_column.as_str())
        .map(|value| value.trim())
        .unwrap_or_default();
    let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d").map_err(|_| {
        DashError::MalformedRow {
            row: row_number,
            reason: format!("unparseable date \"{date_cell}\""),
        }
    })?;

    let mut values = MetricValues::default();
    for metric in Metric::ALL {
        values.set(metric, parse_numeric_cell(cells.get(metric.column_name())));
    }

    Ok(Observation::new(entity, date, values))
}

/// Renames `Date` to the configured date column, replaces spaces with
/// underscores, and drops ignored columns.
fn normalize_cells(row: RawRow, options: &IngestOptions) -> IndexMap<String, String> {
    let mut normalized = IndexMap::with_capacity(row.cells.len());
    for (key, value) in row.cells {
        let key = if key == "Date" {
            options.date_column.clone()
        } else {
            key.replace(' ', "_")
        };
        if options.ignored_columns.iter().any(|ignored| *ignored == key) {
            continue;
        }
        normalized.insert(key, value);
    }
    normalized
}

/// Empty or non-numeric cells become absent values, never zero.
fn parse_numeric_cell(cell: Option<&String>) -> Option<f64> {
    let trimmed = cell?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Sorts by (entity, date) and deduplicates same-date rows with last wins.
fn canonicalize(mut observations: Vec<Observation>) -> (Vec<Observation>, usize) {
    observations.sort_by(|a, b| a.entity.cmp(&b.entity).then(a.date.cmp(&b.date)));

    let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
    let mut duplicate_count = 0_usize;
    for observation in observations {
        if let Some(last) = deduped.last_mut() {
            if last.entity == observation.entity && last.date == observation.date {
                *last = observation;
                duplicate_count += 1;
                continue;
            }
        }
        deduped.push(observation);
    }

    if duplicate_count > 0 {
        warn!(
            duplicate_count,
            canonical_count = deduped.len(),
            "canonicalized duplicate observation dates"
        );
    }
    (deduped, duplicate_count)
}
