//! Caller identity checks
//!
//! The engine has no roles beyond "depositor" and "oracle". Depositors must
//! call directly: a relayed call comes from an intermediary that could react
//! to the outcome or re-enter the engine, and it would also make the
//! one-obligation-per-depositor rule meaningless.

use serde::{Deserialize, Serialize};
use types::ids::Address;

/// Identity of an invocation.
///
/// `origin` is the principal that started the top-level call; `sender` is
/// the immediate caller. They differ whenever an intermediary relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub origin: Address,
    pub sender: Address,
}

impl CallContext {
    /// A top-level call made by `caller` itself.
    pub fn direct(caller: Address) -> Self {
        Self {
            origin: caller,
            sender: caller,
        }
    }

    /// A call started by `origin` and relayed through `via`.
    pub fn relayed(origin: Address, via: Address) -> Self {
        Self { origin, sender: via }
    }

    /// Whether the immediate caller is also the originator.
    pub fn is_direct(&self) -> bool {
        self.origin == self.sender
    }
}

/// Restricts resolution callbacks to the configured oracle.
#[derive(Debug, Clone)]
pub struct OracleGate {
    oracle: Address,
}

impl OracleGate {
    pub fn new(oracle: Address) -> Self {
        Self { oracle }
    }

    /// Check whether `caller` is the oracle.
    pub fn is_oracle(&self, caller: &Address) -> bool {
        !caller.is_null() && *caller == self.oracle
    }

    pub fn oracle(&self) -> Address {
        self.oracle
    }
}
