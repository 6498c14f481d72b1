//! Depositor bot
//!
//! Decides each tick whether to pull and how much, from a deterministic
//! seeded RNG. Bots do not check whether they already have an active
//! obligation, so the engine's single-flight rule gets exercised.

use crate::world::SimWorld;
use custody_draw::{PullError, PullReceipt};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use types::ids::Address;
use types::numeric::{Amount, ItemId};

/// Configuration for a depositor bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositorConfig {
    /// Smallest pull amount
    pub min_pull: Amount,
    /// Largest pull amount
    pub max_pull: Amount,
    /// Probability of attempting a pull on a tick (0.0 to 1.0)
    pub pull_probability: f64,
}

impl DepositorConfig {
    /// Pull probability clamped into [0, 1]; NaN counts as never.
    pub fn effective_pull_probability(&self) -> f64 {
        if self.pull_probability.is_nan() {
            0.0
        } else {
            self.pull_probability.clamp(0.0, 1.0)
        }
    }
}

impl Default for DepositorConfig {
    fn default() -> Self {
        Self {
            min_pull: 1,
            max_pull: 10_000,
            pull_probability: 0.6,
        }
    }
}

/// Something a bot can put up for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stake {
    /// Any amount of a fungible token
    Fungible { asset: Address },
    /// One specific unique item
    Item { asset: Address, item_id: ItemId },
    /// Units of one id in a per-id-balance collection
    Units { asset: Address, item_id: ItemId, max: Amount },
}

/// Depositor with deterministic seeded RNG.
pub struct DepositorBot {
    pub address: Address,
    pub config: DepositorConfig,
    pub pulls_submitted: usize,
    pub pulls_rejected: usize,
    rng: ChaCha8Rng,
}

impl DepositorBot {
    pub fn new(address: Address, config: DepositorConfig, seed: u64) -> Self {
        Self {
            address,
            config,
            pulls_submitted: 0,
            pulls_rejected: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn wants_to_pull(&mut self) -> bool {
        self.rng.gen_bool(self.config.effective_pull_probability())
    }

    /// Random amount within the configured range.
    pub fn next_amount(&mut self) -> Amount {
        let max = self.config.max_pull.max(self.config.min_pull);
        self.rng.gen_range(self.config.min_pull..=max)
    }

    /// Pick one of `stakes` and the pull parameters for it.
    pub fn choose_pull(&mut self, stakes: &[Stake]) -> Option<(Address, Amount, ItemId)> {
        let stake = *stakes.choose(&mut self.rng)?;
        let pull = match stake {
            Stake::Fungible { asset } => (asset, self.next_amount(), 0),
            Stake::Item { asset, item_id } => (asset, 1, item_id),
            Stake::Units { asset, item_id, max } => {
                (asset, self.rng.gen_range(1..=max.max(1)), item_id)
            }
        };
        Some(pull)
    }

    /// Maybe pull one of `stakes`.
    ///
    /// Returns None if the bot sat this tick out.
    pub fn tick(
        &mut self,
        world: &mut SimWorld,
        stakes: &[Stake],
    ) -> Option<Result<PullReceipt, PullError>> {
        if !self.wants_to_pull() {
            return None;
        }
        let (asset, amount, item_id) = self.choose_pull(stakes)?;
        let result = world.pull(self.address, asset, amount, item_id);
        match result {
            Ok(_) => self.pulls_submitted += 1,
            Err(_) => self.pulls_rejected += 1,
        }
        Some(result)
    }
}
