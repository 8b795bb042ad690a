// ── Summary statistics ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scan-wide counters the helper computes alongside the site list. No
/// cross-validation against `nginx_sites` is performed -- the helper owns
/// both numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    #[serde(default)]
    pub total_sites: u32,
    #[serde(default)]
    pub ssl_enabled_sites: u32,
    #[serde(default)]
    pub nginx_status: String,
    #[serde(default)]
    pub docker_containers_running: u32,
    #[serde(default)]
    pub scan_date: Option<DateTime<Utc>>,
}
