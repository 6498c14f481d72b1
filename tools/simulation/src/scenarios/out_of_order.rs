//! Out-of-order fulfillment scenario
//!
//! All depositors pull first, then the oracle answers in a seeded shuffled
//! order. Each depositor's final balance must depend only on their own
//! roll, so the same run with a different answer order ends identically.

use crate::metrics::DrawMetrics;
use crate::scenarios::ScenarioResult;
use crate::world::SimWorld;
use custody_draw::mocks::MockToken;
use custody_draw::resolver::{outcome_for, roll};
use custody_draw::{ConfigError, DrawOutcome};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use types::ids::{Address, RequestId};
use types::numeric::Amount;

/// Configuration for the out-of-order scenario.
#[derive(Debug, Clone)]
pub struct OutOfOrderConfig {
    pub seed: u64,
    pub depositors: usize,
    pub amount: Amount,
    /// Seed for the fulfillment order
    pub shuffle_seed: u64,
}

impl Default for OutOfOrderConfig {
    fn default() -> Self {
        Self {
            seed: 3,
            depositors: 25,
            amount: 1000,
            shuffle_seed: 99,
        }
    }
}

/// Final per-depositor balances of one run, in depositor order.
pub fn final_balances(config: &OutOfOrderConfig) -> Result<Vec<Amount>, ConfigError> {
    let (world, token, depositors, _) = drive(config)?;
    let balances = depositors
        .iter()
        .map(|d| world.chain.token(&token).map(|t| t.balance(*d)).unwrap_or_default())
        .collect();
    Ok(balances)
}

/// Run the out-of-order scenario.
pub fn run(config: &OutOfOrderConfig) -> Result<ScenarioResult, ConfigError> {
    let (world, token, depositors, metrics) = drive(config)?;
    let mut failures = Vec::new();

    for (depositor, request_id) in &depositors_with_requests(&world, &depositors) {
        let word = world.oracle.word_for(*request_id);
        let expected = match outcome_for(roll(&word)) {
            DrawOutcome::Returned => config.amount,
            DrawOutcome::Forfeited => 0,
        };
        let actual = world
            .chain
            .token(&token)
            .map(|t| t.balance(*depositor))
            .unwrap_or_default();
        if actual != expected {
            failures.push(format!("{depositor}: expected {expected}, found {actual}"));
        }
    }

    let passed = failures.is_empty() && world.engine.active_count() == 0;
    info!(passed, depositors = depositors.len(), "out-of-order scenario finished");

    Ok(ScenarioResult {
        name: "out_of_order".to_string(),
        rounds_run: 1,
        draws_requested: metrics.total_pulls,
        draws_resolved: metrics.total_resolved(),
        events_emitted: world.engine.events().len(),
        metrics: metrics.clone(),
        passed,
        details: if failures.is_empty() {
            metrics.summary()
        } else {
            failures.join("; ")
        },
    })
}

fn drive(config: &OutOfOrderConfig) -> Result<(SimWorld, Address, Vec<Address>, DrawMetrics), ConfigError> {
    let mut world = SimWorld::new(config.seed)?;
    let token = world.deploy_token(MockToken::new());
    let mut metrics = DrawMetrics::new();

    let mut depositors = Vec::with_capacity(config.depositors);
    for _ in 0..config.depositors {
        let address = world.address();
        world.fund(token, address, config.amount);
        if let Err(err) = world.pull(address, token, config.amount, 0) {
            metrics.record_rejection(&err);
        }
        depositors.push(address);
    }

    let mut order = world.pending();
    order.shuffle(&mut ChaCha8Rng::seed_from_u64(config.shuffle_seed));
    for request_id in order {
        if let Err(err) = world.fulfill(request_id) {
            metrics.record_fulfill_failure(&err);
        }
    }

    metrics.ingest_events(world.engine.events());
    Ok((world, token, depositors, metrics))
}

/// Pair each depositor with the request their pull produced.
fn depositors_with_requests(world: &SimWorld, depositors: &[Address]) -> Vec<(Address, RequestId)> {
    world
        .engine
        .events()
        .iter()
        .filter_map(|event| match event {
            custody_draw::ContractEvent::Pulled(p) if depositors.contains(&p.depositor) => {
                Some((p.depositor, p.request_id))
            }
            _ => None,
        })
        .collect()
}
