pub mod aggregate;
pub mod metric;
pub mod nearest;
pub mod scale;
pub mod series;
pub mod store;
pub mod types;

pub use aggregate::{EntityAggregate, aggregate, color_scale_max};
pub use metric::Metric;
pub use nearest::{HoverSample, nearest_point, nearest_points};
pub use scale::{LinearScale, TimeScale};
pub use series::{EntitySeries, SeriesPoint, build_series_index};
pub use store::{DataStore, IngestOptions, LoadReport, RawRow};
pub use types::{MetricValues, Observation, Viewport};
