use std::collections::{HashMap, HashSet};

use types::asset::{InterfaceId, ITEM_RECEIVED};
use types::errors::CallError;
use types::ids::Address;
use types::numeric::{Amount, ItemId};

use crate::asset::{Asset, ItemReceiver};

/// Per-id balance collection that calls the recipient's hook on every
/// safe transfer.
#[derive(Debug, Clone, Default)]
pub struct MockMultiToken {
    balances: HashMap<(Address, ItemId), Amount>,
    operators: HashSet<(Address, Address)>,
    frozen: bool,
    /// Report success without moving units
    phantom_transfers: bool,
}

impl MockMultiToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection whose safe transfers report success but move nothing.
    pub fn with_phantom_transfers(mut self) -> Self {
        self.phantom_transfers = true;
        self
    }

    pub fn mint(&mut self, to: Address, item_id: ItemId, amount: Amount) {
        *self.balances.entry((to, item_id)).or_insert(0) += amount;
    }

    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
    }

    pub fn balance(&self, holder: Address, item_id: ItemId) -> Amount {
        self.balances.get(&(holder, item_id)).copied().unwrap_or(0)
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    fn move_balance(&mut self, from: Address, to: Address, item_id: ItemId, amount: Amount) {
        *self.balances.entry((from, item_id)).or_insert(0) -= amount;
        *self.balances.entry((to, item_id)).or_insert(0) += amount;
    }
}

impl Asset for MockMultiToken {
    fn supports_interface(&self, interface: InterfaceId) -> Result<bool, CallError> {
        Ok(interface == InterfaceId::MULTI_TOKEN || interface == InterfaceId::INTROSPECTION)
    }

    fn item_balance_of(&self, holder: Address, item_id: ItemId) -> Result<Amount, CallError> {
        Ok(self.balance(holder, item_id))
    }

    fn safe_transfer_item(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        item_id: ItemId,
        amount: Amount,
        data: &[u8],
        receiver: Option<&dyn ItemReceiver>,
    ) -> Result<(), CallError> {
        if self.frozen {
            return Err(CallError::reverted("collection frozen"));
        }
        if caller != from && !self.operators.contains(&(from, caller)) {
            return Err(CallError::reverted("caller not authorized"));
        }
        if self.balance(from, item_id) < amount {
            return Err(CallError::reverted("insufficient balance"));
        }
        if self.phantom_transfers {
            return Ok(());
        }

        self.move_balance(from, to, item_id, amount);
        if let Some(hook) = receiver {
            if hook.on_item_received(caller, from, item_id, amount, data) != ITEM_RECEIVED {
                self.move_balance(to, from, item_id, amount);
                return Err(CallError::reverted("receiver rejected transfer"));
            }
        }
        Ok(())
    }
}
