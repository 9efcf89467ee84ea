use serde::{Deserialize, Serialize};

/// Aggregate counters computed server-side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_processed: u64,
    pub total_alerted: u64,
    pub total_reviewed: u64,
    pub total_processing: u64,
    pub active_rules_count: u64,
}
