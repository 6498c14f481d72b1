//! Failure of a call into an external collaborator
//!
//! Shared by the engine and by every collaborator implementation, so that a
//! reverted asset call looks the same whichever side observes it.

use crate::ids::Address;
use thiserror::Error;

/// Outcome of an external call that did not return normally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("No asset deployed at {address}")]
    NoAsset { address: Address },

    #[error("Method not implemented: {method}")]
    NotImplemented { method: &'static str },

    #[error("Call reverted: {reason}")]
    Reverted { reason: String },
}

impl CallError {
    /// Shorthand for a revert with a message.
    pub fn reverted(reason: impl Into<String>) -> Self {
        CallError::Reverted {
            reason: reason.into(),
        }
    }

    pub fn not_implemented(method: &'static str) -> Self {
        CallError::NotImplemented { method }
    }
}
