//! Randomness oracle boundary
//!
//! The engine asks for randomness synchronously and is told the request id.
//! The answer arrives later, out of band, when the oracle calls
//! `Engine::fulfill` with the same id.

use serde::{Deserialize, Serialize};
use types::ids::{Address, RequestId};

use crate::errors::OracleError;

/// Parameters sent with every randomness request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomnessRequest {
    /// Oracle key (gas lane) to draw from
    pub key_hash: [u8; 32],
    /// Billing subscription at the oracle
    pub subscription_id: u64,
    /// Confirmations the oracle waits before answering
    pub request_confirmations: u16,
    /// Gas budget for the callback
    pub callback_gas_limit: u32,
    /// Random words requested; the draw uses the first
    pub num_words: u32,
}

impl Default for RandomnessRequest {
    fn default() -> Self {
        Self {
            key_hash: [0u8; 32],
            subscription_id: 0,
            request_confirmations: 3,
            callback_gas_limit: 100_000,
            num_words: 1,
        }
    }
}

/// External randomness provider.
pub trait RandomnessOracle {
    /// Register a request on behalf of `requester` and return its id.
    fn request_random(
        &mut self,
        requester: Address,
        request: &RandomnessRequest,
    ) -> Result<RequestId, OracleError>;
}
