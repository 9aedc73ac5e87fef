use serde::{Deserialize, Serialize};

use crate::core::{IngestOptions, Metric};

/// Public coordinator bootstrap configuration.
///
/// This type is serializable so host applications can persist/load dashboard
/// setup without inventing their own ad-hoc format. Defaults match the
/// USDA colony dataset this engine was built around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub ingest: IngestOptions,
    /// Synthetic whole-population aggregate entity. Plotted when the
    /// selection is empty and excluded from color-domain construction.
    #[serde(default = "default_population_entity")]
    pub population_entity: String,
    /// Entities left off the map entirely (no geometry or no data worth
    /// drawing); they still aggregate and chart normally.
    #[serde(default = "default_map_hidden_entities")]
    pub map_hidden_entities: Vec<String>,
    #[serde(default)]
    pub initial_metric: Metric,
    #[serde(default)]
    pub initial_selection: Vec<String>,
}

fn default_population_entity() -> String {
    "United States".to_owned()
}

fn default_map_hidden_entities() -> Vec<String> {
    vec!["Alaska".to_owned()]
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ingest: IngestOptions::default(),
            population_entity: default_population_entity(),
            map_hidden_entities: default_map_hidden_entities(),
            initial_metric: Metric::default(),
            initial_selection: Vec::new(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_initial_metric(mut self, metric: Metric) -> Self {
        self.initial_metric = metric;
        self
    }

    #[must_use]
    pub fn with_initial_selection(
        mut self,
        entities: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.initial_selection = entities.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardConfig;

    #[test]
    fn empty_json_object_deserializes_to_defaults() {
        let config: DashboardConfig = serde_json::from_str("{}").expect("defaults");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.population_entity, "United States");
        assert_eq!(config.ingest.entity_column, "State");
    }
}
