use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use types::ids::{Address, RequestId};
use types::numeric::RandomWord;

use crate::asset::AssetBook;
use crate::engine::Engine;
use crate::errors::{FulfillError, OracleError};
use crate::oracle::{RandomnessOracle, RandomnessRequest};
use crate::resolver::DrawResolution;
use crate::security::CallContext;

/// Randomness oracle that queues requests until the test answers them.
///
/// Words are derived from the seed and request id with SHA-256, so a
/// given seed always produces the same draws.
#[derive(Debug, Clone)]
pub struct MockOracle {
    address: Address,
    seed: u64,
    next_id: u64,
    pending: BTreeMap<RequestId, (Address, RandomnessRequest)>,
    reject_next: bool,
    unavailable: bool,
    forced_id: Option<RequestId>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::at(Address::new(), seed)
    }

    /// An oracle calling back from a fixed address.
    pub fn at(address: Address, seed: u64) -> Self {
        Self {
            address,
            seed,
            next_id: 1,
            pending: BTreeMap::new(),
            reject_next: false,
            unavailable: false,
            forced_id: None,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Reject the next request.
    pub fn reject_next(&mut self) {
        self.reject_next = true;
    }

    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Hand out `request_id` on the next request instead of a fresh id.
    pub fn force_next_id(&mut self, request_id: RequestId) {
        self.forced_id = Some(request_id);
    }

    /// Deterministic word for `request_id` under this oracle's seed.
    pub fn word_for(&self, request_id: RequestId) -> RandomWord {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_be_bytes());
        hasher.update(request_id.value().to_be_bytes());
        RandomWord::from_be_bytes(hasher.finalize().into())
    }

    pub fn pending_ids(&self) -> Vec<RequestId> {
        self.pending.keys().copied().collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Parameters a pending request was made with.
    pub fn pending_request(&self, request_id: &RequestId) -> Option<&(Address, RandomnessRequest)> {
        self.pending.get(request_id)
    }

    /// Deliver `words` for `request_id` to the engine as the oracle.
    ///
    /// The request is consumed whatever the engine answers, matching an
    /// oracle that calls back once and never retries.
    pub fn fulfill<B: AssetBook>(
        &mut self,
        engine: &mut Engine,
        assets: &mut B,
        request_id: RequestId,
        words: &[RandomWord],
    ) -> Result<DrawResolution, FulfillError> {
        self.pending.remove(&request_id);
        engine.fulfill(&CallContext::direct(self.address), assets, request_id, words)
    }

    /// Deliver the seeded word for `request_id`.
    pub fn fulfill_seeded<B: AssetBook>(
        &mut self,
        engine: &mut Engine,
        assets: &mut B,
        request_id: RequestId,
    ) -> Result<DrawResolution, FulfillError> {
        let word = self.word_for(request_id);
        self.fulfill(engine, assets, request_id, &[word])
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomnessOracle for MockOracle {
    fn request_random(
        &mut self,
        requester: Address,
        request: &RandomnessRequest,
    ) -> Result<RequestId, OracleError> {
        if self.unavailable {
            return Err(OracleError::Unavailable);
        }
        if std::mem::take(&mut self.reject_next) {
            return Err(OracleError::Rejected {
                reason: "subscription not funded".into(),
            });
        }
        let request_id = match self.forced_id.take() {
            Some(forced) => forced,
            None => {
                let id = RequestId::new(self.next_id);
                self.next_id += 1;
                id
            }
        };
        self.pending.insert(request_id, (requester, request.clone()));
        Ok(request_id)
    }
}
