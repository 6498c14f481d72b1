//! Metrics and scenario export
//!
//! Serializes metrics and scenario results to JSON for external consumption.

use crate::metrics::DrawMetrics;
use crate::replay::event_log_digest;
use crate::scenarios::ScenarioResult;
use chrono::{DateTime, Utc};
use custody_draw::ContractEvent;
use serde::{Deserialize, Serialize};

/// Combined export containing all simulation outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationExport {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub metrics: DrawMetrics,
    pub scenarios: Vec<ScenarioResult>,
    pub event_count: usize,
    pub event_digest: String,
}

impl SimulationExport {
    /// Whether every included scenario passed.
    pub fn all_passed(&self) -> bool {
        self.scenarios.iter().all(|s| s.passed)
    }
}

/// Build a complete simulation export.
pub fn build_export(
    events: &[ContractEvent],
    metrics: &DrawMetrics,
    scenarios: Vec<ScenarioResult>,
) -> SimulationExport {
    SimulationExport {
        version: crate::VERSION.to_string(),
        generated_at: Utc::now(),
        metrics: metrics.clone(),
        scenarios,
        event_count: events.len(),
        event_digest: event_log_digest(events),
    }
}

/// Export complete simulation data as JSON.
pub fn export_json(export: &SimulationExport) -> String {
    serde_json::to_string_pretty(export).unwrap_or_default()
}

/// Write export to a file path.
pub fn write_to_file(export: &SimulationExport, path: &str) -> std::io::Result<()> {
    let json = export_json(export);
    std::fs::write(path, json)
}
