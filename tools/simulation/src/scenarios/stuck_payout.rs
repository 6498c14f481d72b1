//! Stuck payout scenario
//!
//! The token freezes between pull and fulfillment. Winners' payouts fail and
//! their obligations stay active with no pending callback; losers resolve
//! normally. Afterwards stuck depositors are locked out of new pulls.

use crate::metrics::DrawMetrics;
use crate::scenarios::ScenarioResult;
use crate::world::SimWorld;
use custody_draw::mocks::MockToken;
use custody_draw::resolver::{outcome_for, roll};
use custody_draw::{ConfigError, DrawOutcome, FulfillError, PullError};
use tracing::{info, warn};
use types::numeric::Amount;

/// Configuration for the stuck payout scenario.
#[derive(Debug, Clone)]
pub struct StuckPayoutConfig {
    pub seed: u64,
    pub depositors: usize,
    pub amount: Amount,
}

impl Default for StuckPayoutConfig {
    fn default() -> Self {
        Self {
            seed: 17,
            depositors: 12,
            amount: 500,
        }
    }
}

/// Run the stuck payout scenario.
pub fn run(config: &StuckPayoutConfig) -> Result<ScenarioResult, ConfigError> {
    let mut world = SimWorld::new(config.seed)?;
    let token = world.deploy_token(MockToken::new());
    let mut metrics = DrawMetrics::new();
    let mut failures = Vec::new();

    let mut pulls = Vec::with_capacity(config.depositors);
    for _ in 0..config.depositors {
        let address = world.address();
        world.fund(token, address, config.amount * 2);
        match world.pull(address, token, config.amount, 0) {
            Ok(receipt) => pulls.push((address, receipt.request_id)),
            Err(err) => metrics.record_rejection(&err),
        }
    }

    if let Some(t) = world.chain.token_mut(&token) {
        t.freeze();
    }

    let mut stuck = Vec::new();
    for (depositor, request_id) in &pulls {
        let expected = outcome_for(roll(&world.oracle.word_for(*request_id)));
        match (world.fulfill(*request_id), expected) {
            (Err(err @ FulfillError::Payout { .. }), DrawOutcome::Returned) => {
                metrics.record_fulfill_failure(&err);
                stuck.push(*depositor);
            }
            (Ok(_), DrawOutcome::Forfeited) => {}
            (outcome, expected) => {
                warn!(%depositor, ?expected, "unexpected resolution under frozen token");
                failures.push(format!("{depositor}: expected {expected:?}, got {outcome:?}"));
            }
        }
    }

    if world.oracle.pending_count() != 0 {
        failures.push("oracle still has pending requests".to_string());
    }
    if world.engine.active_count() != stuck.len() {
        failures.push(format!(
            "{} active obligations for {} stuck depositors",
            world.engine.active_count(),
            stuck.len()
        ));
    }

    // Unfreezing does not unstick anyone: there is no retry path.
    if let Some(t) = world.chain.token_mut(&token) {
        t.set_frozen(false);
    }
    for depositor in &stuck {
        match world.pull(*depositor, token, config.amount, 0) {
            Err(PullError::AlreadyActive { .. }) => {}
            other => failures.push(format!("{depositor}: re-pull gave {other:?}")),
        }
    }

    metrics.ingest_events(world.engine.events());
    let passed = failures.is_empty();
    info!(passed, stuck = stuck.len(), "stuck payout scenario finished");

    Ok(ScenarioResult {
        name: "stuck_payout".to_string(),
        rounds_run: 1,
        draws_requested: pulls.len() as u64,
        draws_resolved: metrics.total_resolved(),
        events_emitted: world.engine.events().len(),
        metrics: metrics.clone(),
        passed,
        details: if failures.is_empty() {
            format!("{} stuck of {} | {}", stuck.len(), pulls.len(), metrics.summary())
        } else {
            failures.join("; ")
        },
    })
}
