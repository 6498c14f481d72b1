//! Draw metrics for simulation
//!
//! Tracks pulls, outcomes, rejections and payout failures, and the observed
//! forfeiture rate against the expected one in six.

use custody_draw::{ContractEvent, DrawOutcome, FulfillError, PullError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::numeric::Amount;

/// Aggregated simulation metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawMetrics {
    pub total_pulls: u64,
    pub total_returned: u64,
    pub total_forfeited: u64,
    pub rejected_pulls: u64,
    pub already_active_rejections: u64,
    pub payout_failures: u64,
    pub unknown_callbacks: u64,
    /// Sum of recorded quantities across pulls
    pub quantity_pulled: Amount,
}

impl DrawMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single event into metrics.
    pub fn record_event(&mut self, event: &ContractEvent) {
        match event {
            ContractEvent::Pulled(pulled) => {
                self.total_pulls += 1;
                self.quantity_pulled += pulled.amount;
            }
            ContractEvent::DrawResolved(resolved) => match resolved.outcome {
                DrawOutcome::Returned => self.total_returned += 1,
                DrawOutcome::Forfeited => self.total_forfeited += 1,
            },
        }
    }

    pub fn record_rejection(&mut self, err: &PullError) {
        self.rejected_pulls += 1;
        if matches!(err, PullError::AlreadyActive { .. }) {
            self.already_active_rejections += 1;
        }
    }

    pub fn record_fulfill_failure(&mut self, err: &FulfillError) {
        match err {
            FulfillError::Payout { .. } => self.payout_failures += 1,
            FulfillError::UnknownRequest { .. } => self.unknown_callbacks += 1,
            _ => {}
        }
    }

    /// Process all events from an engine.
    pub fn ingest_events(&mut self, events: &[ContractEvent]) {
        for event in events {
            self.record_event(event);
        }
    }

    pub fn total_resolved(&self) -> u64 {
        self.total_returned + self.total_forfeited
    }

    /// Forfeited draws over resolved draws; zero before any resolution.
    pub fn forfeit_rate(&self) -> Decimal {
        let resolved = self.total_resolved();
        if resolved == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.total_forfeited) / Decimal::from(resolved)).round_dp(4)
    }

    /// Build a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Pulls: {} | Returned: {} | Forfeited: {} | Rejected: {} | Payout failures: {} | Forfeit rate: {}",
            self.total_pulls,
            self.total_returned,
            self.total_forfeited,
            self.rejected_pulls,
            self.payout_failures,
            self.forfeit_rate(),
        )
    }
}
