pub mod config;
pub mod coordinator;
pub mod invalidation;
pub mod selection;

pub use config::DashboardConfig;
pub use coordinator::{
    AxisDomains, ChartFrame, ChartView, CoordinatorState, MapFrame, MapView, ViewCoordinator,
};
pub use invalidation::{RecomputeScope, RecomputeTopic};
pub use selection::SelectionState;
