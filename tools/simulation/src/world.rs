//! Simulated host world
//!
//! One engine, one mock oracle and one mock chain, with every address
//! derived from a counter so that a given seed replays byte-for-byte.

use custody_draw::mocks::{MockAsset, MockChain, MockMultiToken, MockNft, MockOracle, MockToken};
use custody_draw::oracle::RandomnessRequest;
use custody_draw::{CallContext, ConfigError, DrawResolution, Engine, EngineConfig, FulfillError, PullError, PullReceipt};
use serde::{Deserialize, Serialize};
use types::ids::{Address, RequestId};
use types::numeric::{Amount, ItemId, RandomWord};
use uuid::Uuid;

/// Configuration for a seeded draw simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSimConfig {
    /// Seed for bots and oracle words
    pub seed: u64,
    /// Number of depositors
    pub depositors: usize,
    /// Pull/fulfill rounds
    pub rounds: usize,
    /// Starting fungible balance of each depositor
    pub starting_balance: Amount,
    /// Largest single fungible pull
    pub max_pull: Amount,
    /// Fee burned by the fungible token, in basis points
    pub fee_bps: u32,
    /// Parameters attached to each randomness request
    pub request: RandomnessRequest,
}

impl Default for DrawSimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            depositors: 10,
            rounds: 50,
            starting_balance: 1_000_000,
            max_pull: 10_000,
            fee_bps: 0,
            request: RandomnessRequest::default(),
        }
    }
}

impl DrawSimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Engine plus its collaborators.
#[derive(Debug)]
pub struct SimWorld {
    pub chain: MockChain,
    pub oracle: MockOracle,
    pub engine: Engine,
    next_address: u128,
}

impl SimWorld {
    /// Build a world whose oracle derives words from `seed`.
    pub fn new(seed: u64) -> Result<Self, ConfigError> {
        Self::with_request(seed, RandomnessRequest::default())
    }

    pub fn with_request(seed: u64, request: RandomnessRequest) -> Result<Self, ConfigError> {
        let engine_address = sim_address(1);
        let oracle = MockOracle::at(sim_address(2), seed);
        let config = EngineConfig {
            oracle: oracle.address(),
            request,
        };
        Ok(Self {
            chain: MockChain::new(),
            oracle,
            engine: Engine::new(engine_address, config)?,
            next_address: 3,
        })
    }

    /// Allocate the next deterministic address.
    pub fn address(&mut self) -> Address {
        let address = sim_address(self.next_address);
        self.next_address += 1;
        address
    }

    pub fn deploy_token(&mut self, token: MockToken) -> Address {
        let address = self.address();
        self.chain.deploy_at(address, MockAsset::Token(token))
    }

    pub fn deploy_nft(&mut self, nft: MockNft) -> Address {
        let address = self.address();
        self.chain.deploy_at(address, MockAsset::Nft(nft))
    }

    pub fn deploy_multi(&mut self, multi: MockMultiToken) -> Address {
        let address = self.address();
        self.chain.deploy_at(address, MockAsset::Multi(multi))
    }

    /// Mint `amount` of a deployed token to `holder` and approve the engine.
    pub fn fund(&mut self, token: Address, holder: Address, amount: Amount) {
        let engine = self.engine.address();
        if let Some(token) = self.chain.token_mut(&token) {
            token.mint(holder, amount);
            let allowance = token.allowance(holder, engine);
            token.approve(holder, engine, allowance + amount);
        }
    }

    pub fn pull(
        &mut self,
        who: Address,
        asset: Address,
        amount: Amount,
        item_id: ItemId,
    ) -> Result<PullReceipt, PullError> {
        self.engine.pull(
            &CallContext::direct(who),
            &mut self.chain,
            &mut self.oracle,
            asset,
            amount,
            item_id,
        )
    }

    /// Answer `request_id` with the oracle's seeded word.
    pub fn fulfill(&mut self, request_id: RequestId) -> Result<DrawResolution, FulfillError> {
        self.oracle
            .fulfill_seeded(&mut self.engine, &mut self.chain, request_id)
    }

    /// Answer `request_id` with a chosen value.
    pub fn fulfill_with(&mut self, request_id: RequestId, value: u64) -> Result<DrawResolution, FulfillError> {
        self.oracle.fulfill(
            &mut self.engine,
            &mut self.chain,
            request_id,
            &[RandomWord::from_u64(value)],
        )
    }

    /// Requests the oracle has not answered yet, in id order.
    pub fn pending(&self) -> Vec<RequestId> {
        self.oracle.pending_ids()
    }
}

fn sim_address(n: u128) -> Address {
    Address::from_uuid(Uuid::from_u128(n))
}
