//! Data model for resource manager REST payloads.
//!
//! Both payloads are transient: they are built fresh on every poll cycle,
//! applied to the panes, and dropped.

mod apps;
mod metrics;

pub use apps::{AppRecord, apps_from_response};
pub use metrics::{ClusterMetrics, metrics_from_response};
