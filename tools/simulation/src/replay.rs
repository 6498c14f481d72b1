//! Event log digests and deterministic replay validation
//!
//! Same seed and config → same event log → same digest.

use crate::scenarios::baseline;
use crate::world::{DrawSimConfig, SimWorld};
use custody_draw::{ConfigError, ContractEvent};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A fingerprint of a finished run for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFingerprint {
    pub event_digest: String,
    pub event_count: usize,
    pub active_obligations: usize,
    pub outstanding_requests: usize,
}

/// Capture a fingerprint of the world's current state.
pub fn capture_fingerprint(world: &SimWorld) -> RunFingerprint {
    RunFingerprint {
        event_digest: event_log_digest(world.engine.events()),
        event_count: world.engine.events().len(),
        active_obligations: world.engine.active_count(),
        outstanding_requests: world.engine.outstanding_requests(),
    }
}

/// SHA-256 of the JSON-serialized event log, hex encoded.
pub fn event_log_digest(events: &[ContractEvent]) -> String {
    let mut hasher = Sha256::new();
    for event in events {
        if let Ok(bytes) = serde_json::to_vec(event) {
            hasher.update(&bytes);
        }
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

/// Run the baseline scenario again with `config` and compare fingerprints.
pub fn validate_replay(config: &DrawSimConfig, expected: &RunFingerprint) -> Result<ReplayValidation, ConfigError> {
    let run = baseline::run_with_world(config)?;
    let replayed = capture_fingerprint(&run.world);
    Ok(ReplayValidation {
        matches: replayed == *expected,
        original: expected.clone(),
        replayed,
    })
}

/// Result of replay validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayValidation {
    pub matches: bool,
    pub original: RunFingerprint,
    pub replayed: RunFingerprint,
}

/// Export event log as JSON.
pub fn export_event_log(events: &[ContractEvent]) -> String {
    serde_json::to_string_pretty(events).unwrap_or_default()
}

/// Import event log from JSON.
pub fn import_event_log(json: &str) -> Result<Vec<ContractEvent>, serde_json::Error> {
    serde_json::from_str(json)
}
