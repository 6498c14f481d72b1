//! Contract-specific error types
//!
//! Error taxonomy for the pull entry point, the draw resolver, the oracle
//! boundary and configuration loading.

use thiserror::Error;
use types::errors::CallError;
use types::ids::{Address, RequestId};
use types::numeric::{Amount, ItemId};

/// Why an asset did not end up in custody.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntakeError {
    #[error("Asset call failed: {0}")]
    Call(#[from] CallError),

    #[error("Asset reported an unsuccessful transfer")]
    TransferRejected,

    #[error("Nothing received: engine balance unchanged at {balance}")]
    NothingReceived { balance: Amount },

    #[error("Engine balance decreased during intake: {before} -> {after}")]
    BalanceDecreased { before: Amount, after: Amount },

    #[error("Item {item_id} not owned by engine after transfer")]
    OwnershipNotReceived { item_id: ItemId },

    #[error("Item {item_id}: expected {expected} units, engine received {received}")]
    ItemsNotReceived { item_id: ItemId, expected: Amount, received: Amount },
}

/// Oracle request errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("Randomness request rejected: {reason}")]
    Rejected { reason: String },

    #[error("Oracle unavailable")]
    Unavailable,
}

/// Errors from `Engine::pull`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PullError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: &'static str },

    #[error("Relayed call rejected: origin {origin}, sender {sender}")]
    RelayedCaller { origin: Address, sender: Address },

    #[error("Depositor {depositor} already has an active obligation")]
    AlreadyActive { depositor: Address },

    #[error("Intake failed: {0}")]
    Intake(#[from] IntakeError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Oracle returned request id {request_id} which is already outstanding")]
    DuplicateRequest { request_id: RequestId },
}

/// Errors from `Engine::fulfill`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FulfillError {
    #[error("Unauthorized: caller {caller} is not the oracle")]
    NotOracle { caller: Address },

    #[error("Unknown request: {request_id}")]
    UnknownRequest { request_id: RequestId },

    #[error("No random values supplied for {request_id}")]
    NoRandomValues { request_id: RequestId },

    #[error("Payout to {depositor} failed: {source}")]
    Payout { depositor: Address, source: CallError },
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Oracle address must not be null")]
    NullOracle,

    #[error("Engine address must not be null")]
    NullEngine,

    #[error("Number of random words must be at least 1")]
    NoWords,

    #[error("Malformed config: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
