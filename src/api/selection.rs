use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Metric;
use crate::error::DashResult;

/// Shared mutable session state: the selected entities and the active metric.
///
/// This is plain data with no callbacks. All mutation funnels through
/// [`ViewCoordinator`](crate::api::ViewCoordinator) so every change triggers
/// exactly one recompute pass; the state object never reaches views directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectionState {
    selected: IndexSet<String>,
    metric: Metric,
}

impl SelectionState {
    #[must_use]
    pub fn new(metric: Metric) -> Self {
        Self {
            selected: IndexSet::new(),
            metric,
        }
    }

    /// Flips membership; returns `true` when the entity is now selected.
    ///
    /// Display order follows insertion order, so deselecting and reselecting
    /// an entity moves it to the end.
    pub fn toggle(&mut self, entity: &str) -> bool {
        if self.selected.shift_remove(entity) {
            debug!(entity, "deselected entity");
            false
        } else {
            self.selected.insert(entity.to_owned());
            debug!(entity, "selected entity");
            true
        }
    }

    pub fn clear(&mut self) {
        debug!(cleared = self.selected.len(), "cleared selection");
        self.selected.clear();
    }

    pub fn set_metric(&mut self, metric: Metric) {
        debug!(metric = %metric, "set active metric");
        self.metric = metric;
    }

    /// Parses a metric key and activates it; unknown keys leave state unchanged.
    pub fn set_metric_key(&mut self, key: &str) -> DashResult<Metric> {
        let metric: Metric = key.parse()?;
        self.set_metric(metric);
        Ok(metric)
    }

    #[must_use]
    pub fn selected(&self) -> &IndexSet<String> {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, entity: &str) -> bool {
        self.selected.contains(entity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Selection contents in display (insertion) order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}
