//! Mixed asset kinds scenario
//!
//! Every depositor holds a fungible balance, one unique item and a stack of
//! per-id units, and pulls whichever the RNG picks. Checks that each pull
//! was classified by its asset's real protocol and that custody per kind
//! adds up.

use crate::bots::{DepositorBot, DepositorConfig, Stake};
use crate::metrics::DrawMetrics;
use crate::scenarios::baseline::check_conservation;
use crate::scenarios::ScenarioResult;
use crate::world::SimWorld;
use custody_draw::mocks::{MockMultiToken, MockNft, MockToken};
use custody_draw::{ConfigError, ContractEvent, DrawOutcome};
use tracing::info;
use types::asset::AssetKind;
use types::numeric::{Amount, ItemId};

/// Per-id collection id every depositor holds units of.
const UNIT_ID: ItemId = 1;

/// Configuration for the mixed assets scenario.
#[derive(Debug, Clone)]
pub struct MixedAssetsConfig {
    pub seed: u64,
    pub depositors: usize,
    pub rounds: usize,
    pub starting_balance: Amount,
    pub starting_units: Amount,
}

impl Default for MixedAssetsConfig {
    fn default() -> Self {
        Self {
            seed: 11,
            depositors: 8,
            rounds: 30,
            starting_balance: 1_000_000,
            starting_units: 50,
        }
    }
}

/// Run the mixed assets scenario.
pub fn run(config: &MixedAssetsConfig) -> Result<ScenarioResult, ConfigError> {
    let mut world = SimWorld::new(config.seed)?;
    let token = world.deploy_token(MockToken::new());
    let nft = world.deploy_nft(MockNft::new());
    let multi = world.deploy_multi(MockMultiToken::new());
    let engine = world.engine.address();

    let mut bots = Vec::with_capacity(config.depositors);
    let mut depositors = Vec::with_capacity(config.depositors);
    for i in 0..config.depositors {
        let address = world.address();
        world.fund(token, address, config.starting_balance);
        if let Some(collection) = world.chain.nft_mut(&nft) {
            collection.mint(address, i as ItemId);
            collection.set_approval_for_all(address, engine, true);
        }
        if let Some(collection) = world.chain.multi_mut(&multi) {
            collection.mint(address, UNIT_ID, config.starting_units);
            collection.set_approval_for_all(address, engine, true);
        }
        let stakes = vec![
            Stake::Fungible { asset: token },
            Stake::Item { asset: nft, item_id: i as ItemId },
            Stake::Units { asset: multi, item_id: UNIT_ID, max: config.starting_units / 5 },
        ];
        bots.push((DepositorBot::new(address, DepositorConfig::default(), config.seed ^ ((i as u64) << 8)), stakes));
        depositors.push(address);
    }

    let mut metrics = DrawMetrics::new();
    let mut requested = 0u64;
    let mut resolved = 0u64;
    let mut forfeited_items = 0usize;
    let mut forfeited_units: Amount = 0;

    for _ in 0..config.rounds {
        for (bot, stakes) in &mut bots {
            match bot.tick(&mut world, stakes) {
                Some(Ok(_)) => requested += 1,
                Some(Err(err)) => metrics.record_rejection(&err),
                None => {}
            }
        }
        for request_id in world.pending() {
            match world.fulfill(request_id) {
                Ok(resolution) => {
                    resolved += 1;
                    if resolution.outcome == DrawOutcome::Forfeited {
                        match resolution.obligation.kind {
                            AssetKind::NonFungible => forfeited_items += 1,
                            AssetKind::MultiToken => forfeited_units += resolution.obligation.quantity,
                            AssetKind::Fungible => {}
                        }
                    }
                }
                Err(err) => metrics.record_fulfill_failure(&err),
            }
        }
    }

    metrics.ingest_events(world.engine.events());
    let mut failures = Vec::new();

    for event in world.engine.events() {
        if let ContractEvent::Pulled(p) = event {
            let want = if p.asset == nft {
                AssetKind::NonFungible
            } else if p.asset == multi {
                AssetKind::MultiToken
            } else {
                AssetKind::Fungible
            };
            if p.kind != want {
                failures.push(format!("{} classified {} instead of {}", p.asset, p.kind, want));
            }
        }
    }

    if let Err(reason) = check_conservation(&world, token, &depositors, config.starting_balance) {
        failures.push(reason);
    }
    let items_held = (0..config.depositors)
        .filter(|i| world.chain.nft(&nft).and_then(|c| c.owner(*i as ItemId)) == Some(engine))
        .count();
    if items_held != forfeited_items {
        failures.push(format!("engine owns {items_held} items, forfeited {forfeited_items}"));
    }
    let units_held = world
        .chain
        .multi(&multi)
        .map(|c| c.balance(engine, UNIT_ID))
        .unwrap_or_default();
    if units_held != forfeited_units {
        failures.push(format!("engine holds {units_held} units, forfeited {forfeited_units}"));
    }

    let passed = failures.is_empty() && resolved == requested;
    info!(passed, requested, resolved, items_held, units_held = %units_held, "mixed assets scenario finished");

    Ok(ScenarioResult {
        name: "mixed_assets".to_string(),
        rounds_run: config.rounds as u64,
        draws_requested: requested,
        draws_resolved: resolved,
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
