//! Cluster-wide counters from `/ws/v1/cluster/metrics`.

use serde::Deserialize;
use serde_json::Value;

/// Top-level key wrapping the counters.
const METRICS_KEY: &str = "clusterMetrics";

/// One snapshot of cluster counters.
///
/// Every recognized counter defaults to 0 when the manager omits it.
/// Unrecognized fields are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterMetrics {
    // Applications
    pub apps_submitted: i64,
    pub apps_completed: i64,
    pub apps_pending: i64,
    pub apps_running: i64,
    pub apps_failed: i64,
    pub apps_killed: i64,

    // Nodes
    pub total_nodes: i64,
    pub active_nodes: i64,
    pub decommissioning_nodes: i64,
    pub decommissioned_nodes: i64,
    pub unhealthy_nodes: i64,
    pub rebooted_nodes: i64,
    pub lost_nodes: i64,
    pub shutdown_nodes: i64,

    // Containers
    pub containers_allocated: i64,
    pub containers_reserved: i64,
    pub containers_pending: i64,

    // Resources
    pub allocated_virtual_cores: i64,
    pub total_virtual_cores: i64,
    #[serde(rename = "allocatedMB")]
    pub allocated_mb: i64,
    #[serde(rename = "totalMB")]
    pub total_mb: i64,
}

/// Extracts the metrics snapshot from a response body.
///
/// Returns `Ok(None)` when the body carries no counters (absent, null or
/// empty object), which callers treat as "no update this cycle".
pub fn metrics_from_response(body: Value) -> Result<Option<ClusterMetrics>, serde_json::Error> {
    let Value::Object(mut root) = body else {
        return Ok(None);
    };
    let counters = match root.remove(METRICS_KEY) {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return Ok(None),
    };
    serde_json::from_value(Value::Object(counters)).map(Some)
}

impl ClusterMetrics {
    /// Nodes in either decommission phase.
    pub fn decommission_nodes(&self) -> i64 {
        self.decommissioning_nodes
            .saturating_add(self.decommissioned_nodes)
    }
}
