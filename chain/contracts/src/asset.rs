//! Asset collaborator boundary
//!
//! The engine never implements transfer logic; it calls out to assets
//! through `Asset` and reaches them through an `AssetBook` host. Every call is
//! fallible, and every method has a default that reports "not implemented",
//! so an asset implements only the protocol it actually speaks.

use types::errors::CallError;
use types::ids::Address;
use types::asset::InterfaceId;
use types::numeric::{Amount, ItemId};

/// Hook a contract exposes to accept inbound per-id transfers.
///
/// A per-id asset calls the recipient's hook during a safe transfer and
/// reverts unless the hook returns the matching acceptance token.
pub trait ItemReceiver {
    fn on_item_received(
        &self,
        operator: Address,
        from: Address,
        item_id: ItemId,
        amount: Amount,
        data: &[u8],
    ) -> [u8; 4];

    fn on_batch_received(
        &self,
        operator: Address,
        from: Address,
        item_ids: &[ItemId],
        amounts: &[Amount],
        data: &[u8],
    ) -> [u8; 4];
}

/// Capability set of an external asset.
///
/// `caller` is the immediate caller of each mutating method; assets use it
/// for allowance and operator checks.
pub trait Asset {
    // ───────────────────────── Introspection ─────────────────────────

    fn supports_interface(&self, _interface: InterfaceId) -> Result<bool, CallError> {
        Err(CallError::not_implemented("supports_interface"))
    }

    // ───────────────────────── Fungible ─────────────────────────

    fn balance_of(&self, _holder: Address) -> Result<Amount, CallError> {
        Err(CallError::not_implemented("balance_of"))
    }

    fn transfer(&mut self, _caller: Address, _to: Address, _amount: Amount) -> Result<bool, CallError> {
        Err(CallError::not_implemented("transfer"))
    }

    fn transfer_from(
        &mut self,
        _caller: Address,
        _from: Address,
        _to: Address,
        _amount: Amount,
    ) -> Result<bool, CallError> {
        Err(CallError::not_implemented("transfer_from"))
    }

    // ───────────────────────── Unique-id ─────────────────────────

    fn owner_of(&self, _item_id: ItemId) -> Result<Address, CallError> {
        Err(CallError::not_implemented("owner_of"))
    }

    fn transfer_item(
        &mut self,
        _caller: Address,
        _from: Address,
        _to: Address,
        _item_id: ItemId,
    ) -> Result<(), CallError> {
        Err(CallError::not_implemented("transfer_item"))
    }

    // ───────────────────────── Per-id balance ─────────────────────────

    fn item_balance_of(&self, _holder: Address, _item_id: ItemId) -> Result<Amount, CallError> {
        Err(CallError::not_implemented("item_balance_of"))
    }

    /// `receiver` is the recipient's hook, `None` when the recipient has no code.
    #[allow(clippy::too_many_arguments)]
    fn safe_transfer_item(
        &mut self,
        _caller: Address,
        _from: Address,
        _to: Address,
        _item_id: ItemId,
        _amount: Amount,
        _data: &[u8],
        _receiver: Option<&dyn ItemReceiver>,
    ) -> Result<(), CallError> {
        Err(CallError::not_implemented("safe_transfer_item"))
    }
}

/// Host environment that resolves asset references and makes a sequence of
/// asset calls atomic.
///
/// The engine takes a checkpoint before the external calls of an operation
/// and reverts to it if any later step fails, so no asset-side effect of a
/// failed operation survives.
pub trait AssetBook {
    type Checkpoint;

    /// Resolve `address`; `CallError::NoAsset` if nothing is deployed there.
    fn asset(&self, address: Address) -> Result<&dyn Asset, CallError>;

    fn asset_mut(&mut self, address: Address) -> Result<&mut dyn Asset, CallError>;

    fn checkpoint(&self) -> Self::Checkpoint;

    fn revert(&mut self, checkpoint: Self::Checkpoint);
}
