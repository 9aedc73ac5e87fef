//! linkdash-rs: linked-views dashboard coordination engine.
//!
//! This crate owns the shared selection state, derived per-entity aggregates
//! and time series, nearest-point hover queries, and the recompute/notify
//! ordering that keeps a choropleth map and a multi-series time chart
//! consistent. Rendering, layout, and data ingestion live in host code.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{DashboardConfig, SelectionState, ViewCoordinator};
pub use error::{DashError, DashResult};
