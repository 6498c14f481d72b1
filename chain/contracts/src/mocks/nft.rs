use std::collections::{HashMap, HashSet};

use types::asset::InterfaceId;
use types::errors::CallError;
use types::ids::Address;
use types::numeric::ItemId;

use crate::asset::Asset;

/// Unique-id collection with per-item approvals and operators.
#[derive(Debug, Clone, Default)]
pub struct MockNft {
    owners: HashMap<ItemId, Address>,
    approvals: HashMap<ItemId, Address>,
    operators: HashSet<(Address, Address)>,
    frozen: bool,
    /// Accept transfers without moving ownership
    phantom_transfers: bool,
}

impl MockNft {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection whose transfers report success but move nothing.
    pub fn with_phantom_transfers(mut self) -> Self {
        self.phantom_transfers = true;
        self
    }

    pub fn mint(&mut self, to: Address, item_id: ItemId) {
        self.owners.insert(item_id, to);
    }

    pub fn approve(&mut self, owner: Address, spender: Address, item_id: ItemId) {
        if self.owners.get(&item_id) == Some(&owner) {
            self.approvals.insert(item_id, spender);
        }
    }

    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
    }

    pub fn owner(&self, item_id: ItemId) -> Option<Address> {
        self.owners.get(&item_id).copied()
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    fn is_authorized(&self, caller: Address, owner: Address, item_id: ItemId) -> bool {
        caller == owner
            || self.operators.contains(&(owner, caller))
            || self.approvals.get(&item_id) == Some(&caller)
    }
}

impl Asset for MockNft {
    fn supports_interface(&self, interface: InterfaceId) -> Result<bool, CallError> {
        Ok(interface == InterfaceId::NON_FUNGIBLE || interface == InterfaceId::INTROSPECTION)
    }

    fn owner_of(&self, item_id: ItemId) -> Result<Address, CallError> {
        self.owner(item_id)
            .ok_or_else(|| CallError::reverted("nonexistent item"))
    }

    fn transfer_item(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        item_id: ItemId,
    ) -> Result<(), CallError> {
        if self.frozen {
            return Err(CallError::reverted("collection frozen"));
        }
        let owner = self.owner_of(item_id)?;
        if owner != from {
            return Err(CallError::reverted("from is not the owner"));
        }
        if !self.is_authorized(caller, owner, item_id) {
            return Err(CallError::reverted("caller not authorized"));
        }
        if self.phantom_transfers {
            return Ok(());
        }
        self.approvals.remove(&item_id);
        self.owners.insert(item_id, to);
        Ok(())
    }
}
