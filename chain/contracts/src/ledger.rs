//! Custody ledger and request tracker
//!
//! The engine's only durable state: depositor → obligation, and
//! request id → depositor. An obligation is active exactly while it is
//! present in the ledger.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::asset::AssetKind;
use types::ids::{Address, RequestId};
use types::numeric::{Amount, ItemId};

/// An asset held in custody pending resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    pub asset: Address,
    /// 1 for unique-id assets, the transferred amount otherwise
    pub quantity: Amount,
    pub item_id: ItemId,
    pub kind: AssetKind,
}

/// Depositor → active obligation.
#[derive(Debug, Default)]
pub struct CustodyLedger {
    obligations: HashMap<Address, Obligation>,
}

impl CustodyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, depositor: &Address) -> bool {
        self.obligations.contains_key(depositor)
    }

    pub fn get(&self, depositor: &Address) -> Option<&Obligation> {
        self.obligations.get(depositor)
    }

    /// Record an obligation. Returns `false` if one is already active.
    pub fn open(&mut self, depositor: Address, obligation: Obligation) -> bool {
        if self.is_active(&depositor) {
            return false;
        }
        self.obligations.insert(depositor, obligation);
        true
    }

    /// Clear the depositor's obligation, returning it.
    pub fn clear(&mut self, depositor: &Address) -> Option<Obligation> {
        self.obligations.remove(depositor)
    }

    /// Sum of active quantities recorded for `asset`.
    pub fn held_quantity(&self, asset: &Address) -> Amount {
        self.obligations
            .values()
            .filter(|o| o.asset == *asset)
            .map(|o| o.quantity)
            .sum()
    }

    /// Sum of active quantities recorded for one item of a per-id asset.
    pub fn held_item_quantity(&self, asset: &Address, item_id: ItemId) -> Amount {
        self.obligations
            .values()
            .filter(|o| o.asset == *asset && o.item_id == item_id)
            .map(|o| o.quantity)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.obligations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obligations.is_empty()
    }
}

/// Outstanding request id → depositor.
#[derive(Debug, Default)]
pub struct RequestTracker {
    requests: HashMap<RequestId, Address>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, request_id: &RequestId) -> bool {
        self.requests.contains_key(request_id)
    }

    pub fn depositor_of(&self, request_id: &RequestId) -> Option<Address> {
        self.requests.get(request_id).copied()
    }

    /// Track a new request. Returns `false` if the id is already outstanding.
    pub fn track(&mut self, request_id: RequestId, depositor: Address) -> bool {
        if self.contains(&request_id) {
            return false;
        }
        self.requests.insert(request_id, depositor);
        true
    }

    pub fn untrack(&mut self, request_id: &RequestId) -> Option<Address> {
        self.requests.remove(request_id)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
