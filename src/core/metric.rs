use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashError;

/// User-selectable numeric column of the colony dataset.
///
/// Exactly one metric is active at any time; it drives both the map color
/// values and the chart y-axis. Serde uses the dataset column names so
/// persisted configs match the ingested schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Metric {
    #[default]
    #[serde(rename = "Starting_Colonies")]
    StartingColonies,
    #[serde(rename = "Max_Colonies")]
    MaxColonies,
    #[serde(rename = "Lost_colonies")]
    LostColonies,
    #[serde(rename = "Percent_Lost")]
    PercentLost,
    #[serde(rename = "Added_colonies")]
    AddedColonies,
    #[serde(rename = "Diseases")]
    Diseases,
    #[serde(rename = "Pesticides")]
    Pesticides,
    #[serde(rename = "Varroa_mites")]
    VarroaMites,
    #[serde(rename = "Other_pests_and_parasites")]
    OtherPestsAndParasites,
}

impl Metric {
    pub const COUNT: usize = 9;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::StartingColonies,
        Metric::MaxColonies,
        Metric::LostColonies,
        Metric::PercentLost,
        Metric::AddedColonies,
        Metric::Diseases,
        Metric::Pesticides,
        Metric::VarroaMites,
        Metric::OtherPestsAndParasites,
    ];

    /// Dataset column name after ingestion normalization.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Metric::StartingColonies => "Starting_Colonies",
            Metric::MaxColonies => "Max_Colonies",
            Metric::LostColonies => "Lost_colonies",
            Metric::PercentLost => "Percent_Lost",
            Metric::AddedColonies => "Added_colonies",
            Metric::Diseases => "Diseases",
            Metric::Pesticides => "Pesticides",
            Metric::VarroaMites => "Varroa_mites",
            Metric::OtherPestsAndParasites => "Other_pests_and_parasites",
        }
    }

    /// Human-readable label for titles and selector widgets.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Metric::StartingColonies => "Starting Colonies",
            Metric::MaxColonies => "Max Colonies",
            Metric::LostColonies => "Lost Colonies",
            Metric::PercentLost => "Lost Colonies %",
            Metric::AddedColonies => "Added Colonies",
            Metric::Diseases => "Colonies Affected By Diseases %",
            Metric::Pesticides => "Colonies Affected By Pesticides %",
            Metric::VarroaMites => "Colonies Affected By Varroa Mites %",
            Metric::OtherPestsAndParasites => "Affected By Other Pests and Parasites %",
        }
    }

    /// Stable index used by [`MetricValues`](crate::core::MetricValues) storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Metric {
    type Err = DashError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.column_name() == key)
            .ok_or_else(|| DashError::UnknownMetric(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::Metric;

    #[test]
    fn column_names_round_trip_through_from_str() {
        for metric in Metric::ALL {
            let parsed: Metric = metric.column_name().parse().expect("known column");
            assert_eq!(parsed, metric);
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!("Renovated_colonies".parse::<Metric>().is_err());
    }

    #[test]
    fn indices_are_dense_and_unique() {
        for (position, metric) in Metric::ALL.into_iter().enumerate() {
            assert_eq!(metric.index(), position);
        }
    }
}
