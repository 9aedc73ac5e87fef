use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::invalidation::{RecomputeScope, RecomputeTopic};
use crate::api::{DashboardConfig, SelectionState};
use crate::core::{
    DataStore, EntityAggregate, EntitySeries, HoverSample, Metric, TimeScale, Viewport, aggregate,
    build_series_index, color_scale_max, nearest_points,
};
use crate::error::{DashError, DashResult};

/// Choropleth-side consumer of recompute output.
///
/// Views observe published frames; they never reach into the coordinator or
/// into each other.
pub trait MapView {
    fn update(&mut self, frame: &MapFrame);
}

/// Chart-side consumer of recompute output.
pub trait ChartView {
    fn update(&mut self, frame: &ChartFrame);
}

/// Everything the map needs for one consistent repaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFrame {
    pub metric: Metric,
    /// Per-entity color input value (metric mean). An absent entity means
    /// "no data" and must render distinctly from a zero mean.
    pub values: IndexMap<String, f64>,
    /// Color domain upper bound; the whole-population entity is excluded
    /// from its computation. `None` when no non-population entity has data.
    pub color_max: Option<f64>,
    /// Selection snapshot in display order, shared verbatim with the chart
    /// frame published in the same pass.
    pub selected: Vec<String>,
    /// Entities the map leaves undrawn; they aggregate and chart normally.
    pub hidden_entities: Vec<String>,
}

/// Axis domains recomputed from the plotted series extent each pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomains {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub value_min: f64,
    pub value_max: f64,
}

/// Everything the chart needs for one consistent repaint: one path per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub metric: Metric,
    pub series: IndexMap<String, EntitySeries>,
    pub domains: AxisDomains,
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CoordinatorState {
    #[default]
    Idle,
    Recomputing,
}

/// Single owner of selection state and derived-view recomputation.
///
/// Every mutation runs one synchronous Idle -> Recomputing -> Idle pass that
/// rebuilds derived structures into fresh values, commits them atomically,
/// and then notifies map views before chart views. Both frames published in
/// one pass carry the same selection snapshot, so no observer can see the
/// two views disagree. A failed pass leaves every published structure
/// untouched and restores the pre-mutation selection.
pub struct ViewCoordinator {
    store: DataStore,
    config: DashboardConfig,
    selection: SelectionState,
    state: CoordinatorState,
    aggregates: IndexMap<String, EntityAggregate>,
    aggregated_metric: Metric,
    time_scale: TimeScale,
    map_frame: MapFrame,
    chart_frame: ChartFrame,
    hover: Vec<HoverSample>,
    map_views: Vec<Box<dyn MapView>>,
    chart_views: Vec<Box<dyn ChartView>>,
}

impl ViewCoordinator {
    /// Builds the coordinator and runs the first recompute pass so frames
    /// are ready before any view registers.
    pub fn new(store: DataStore, config: DashboardConfig) -> DashResult<Self> {
        let mut selection = SelectionState::new(config.initial_metric);
        for entity in &config.initial_selection {
            if !selection.is_selected(entity) {
                selection.toggle(entity);
            }
        }

        let metric = selection.metric();
        let aggregates = aggregate(&store, metric);
        let series = build_series_index(
            &store,
            selection.selected(),
            metric,
            &config.population_entity,
        )?;
        let domains = axis_domains(&series)?;
        let time_scale = TimeScale::from_dates(domains.date_start, domains.date_end)?;

        let selected = selection.snapshot();
        let map_frame = build_map_frame(metric, &aggregates, &config, selected.clone());
        let chart_frame = ChartFrame {
            metric,
            series,
            domains,
            selected,
        };

        Ok(Self {
            store,
            config,
            selection,
            state: CoordinatorState::Idle,
            aggregates,
            aggregated_metric: metric,
            time_scale,
            map_frame,
            chart_frame,
            hover: Vec::new(),
            map_views: Vec::new(),
            chart_views: Vec::new(),
        })
    }

    /// Registers a map view and immediately syncs it to the current frame.
    pub fn register_map_view(&mut self, mut view: Box<dyn MapView>) {
        view.update(&self.map_frame);
        self.map_views.push(view);
    }

    /// Registers a chart view and immediately syncs it to the current frame.
    pub fn register_chart_view(&mut self, mut view: Box<dyn ChartView>) {
        view.update(&self.chart_frame);
        self.chart_views.push(view);
    }

    /// Flips an entity's selection membership and recomputes.
    ///
    /// Returns whether the entity is now selected. If the recompute fails
    /// (e.g. the entity has no data for the active metric), the selection is
    /// restored and the error propagates; the views keep their last
    /// consistent frames.
    pub fn toggle(&mut self, entity: &str) -> DashResult<bool> {
        let previous = self.selection.clone();
        let now_selected = self.selection.toggle(entity);
        match self.recompute(RecomputeScope::selection_change()) {
            Ok(()) => Ok(now_selected),
            Err(err) => {
                self.selection = previous;
                Err(err)
            }
        }
    }

    /// Empties the selection; the chart falls back to the single
    /// whole-population series and the map clears its highlighting.
    pub fn clear(&mut self) -> DashResult<()> {
        let previous = self.selection.clone();
        self.selection.clear();
        match self.recompute(RecomputeScope::selection_change()) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.selection = previous;
                Err(err)
            }
        }
    }

    /// Activates a metric and recomputes aggregates and series.
    pub fn set_metric(&mut self, metric: Metric) -> DashResult<()> {
        let previous = self.selection.clone();
        self.selection.set_metric(metric);
        match self.recompute(RecomputeScope::metric_change()) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.selection = previous;
                Err(err)
            }
        }
    }

    /// Parses a metric key from a selector widget and activates it.
    /// Unknown keys are rejected with no state change and no recompute.
    pub fn set_metric_key(&mut self, key: &str) -> DashResult<Metric> {
        let metric: Metric = key.parse()?;
        self.set_metric(metric)?;
        Ok(metric)
    }

    /// Answers a pointer move over the chart area.
    ///
    /// Inverts the x pixel through the current time scale, finds the nearest
    /// observation per plotted series, and replaces the previous overlay
    /// result. Cursor scope only: frames are not republished. Safe at
    /// arbitrary event frequency; each call is an independent synchronous
    /// recompute whose output supersedes the last.
    pub fn pointer_move(&mut self, pixel_x: f64, viewport: Viewport) -> DashResult<&[HoverSample]> {
        if self.state != CoordinatorState::Idle {
            return Err(DashError::ReentrantRecompute);
        }
        let query = self.time_scale.pixel_to_date(pixel_x, viewport)?;
        let samples = nearest_points(&self.chart_frame.series, query)?;
        trace!(
            pixel_x,
            query = %query,
            samples = samples.len(),
            "pointer-move nearest query"
        );
        self.hover = samples;
        Ok(&self.hover)
    }

    #[must_use]
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.selection.metric()
    }

    #[must_use]
    pub fn map_frame(&self) -> &MapFrame {
        &self.map_frame
    }

    #[must_use]
    pub fn chart_frame(&self) -> &ChartFrame {
        &self.chart_frame
    }

    /// Latest pointer overlay rows, sorted descending by metric value.
    #[must_use]
    pub fn hover(&self) -> &[HoverSample] {
        &self.hover
    }

    #[must_use]
    pub fn aggregates(&self) -> &IndexMap<String, EntityAggregate> {
        &self.aggregates
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn recompute(&mut self, scope: RecomputeScope) -> DashResult<()> {
        if self.state != CoordinatorState::Idle {
            return Err(DashError::ReentrantRecompute);
        }
        self.state = CoordinatorState::Recomputing;
        let result = self.rebuild_and_notify(scope);
        self.state = CoordinatorState::Idle;
        result
    }

    fn rebuild_and_notify(&mut self, scope: RecomputeScope) -> DashResult<()> {
        let metric = self.selection.metric();

        // Build every derived structure into fresh values first; nothing
        // published mutates until the whole pass has succeeded.
        let aggregates =
            if scope.contains(RecomputeTopic::Aggregates) && self.aggregated_metric != metric {
                Some(aggregate(&self.store, metric))
            } else {
                None
            };

        let series = build_series_index(
            &self.store,
            self.selection.selected(),
            metric,
            &self.config.population_entity,
        )?;
        let domains = axis_domains(&series)?;
        let time_scale = TimeScale::from_dates(domains.date_start, domains.date_end)?;

        if let Some(aggregates) = aggregates {
            self.aggregates = aggregates;
            self.aggregated_metric = metric;
        }

        let selected = self.selection.snapshot();
        self.map_frame = build_map_frame(metric, &self.aggregates, &self.config, selected.clone());
        self.chart_frame = ChartFrame {
            metric,
            series,
            domains,
            selected,
        };
        self.time_scale = time_scale;
        // The old overlay indexed into the replaced series set.
        self.hover.clear();

        for view in &mut self.map_views {
            view.update(&self.map_frame);
        }
        for view in &mut self.chart_views {
            view.update(&self.chart_frame);
        }

        debug!(
            metric = %metric,
            selected = self.chart_frame.selected.len(),
            series = self.chart_frame.series.len(),
            rebuilt_aggregates = scope.contains(RecomputeTopic::Aggregates),
            "recompute pass published frames"
        );
        Ok(())
    }
}

fn build_map_frame(
    metric: Metric,
    aggregates: &IndexMap<String, EntityAggregate>,
    config: &DashboardConfig,
    selected: Vec<String>,
) -> MapFrame {
    let values = aggregates
        .iter()
        .map(|(entity, aggregate)| (entity.clone(), aggregate.mean))
        .collect();
    MapFrame {
        metric,
        values,
        color_max: color_scale_max(aggregates, &config.population_entity),
        selected,
        hidden_entities: config.map_hidden_entities.clone(),
    }
}

fn axis_domains(series: &IndexMap<String, EntitySeries>) -> DashResult<AxisDomains> {
    let mut date_start: Option<NaiveDate> = None;
    let mut date_end: Option<NaiveDate> = None;
    let mut value_max = f64::NEG_INFINITY;

    for entity_series in series.values() {
        if let Some((first, last)) = entity_series.date_extent() {
            date_start = Some(date_start.map_or(first, |current| current.min(first)));
            date_end = Some(date_end.map_or(last, |current| current.max(last)));
        }
        if let Some(series_max) = entity_series.max_value() {
            value_max = value_max.max(series_max);
        }
    }

    match (date_start, date_end) {
        (Some(date_start), Some(date_end)) => Ok(AxisDomains {
            date_start,
            date_end,
            value_min: 0.0,
            value_max,
        }),
        _ => Err(DashError::InvalidData(
            "series index has no plottable points".to_owned(),
        )),
    }
}
