//! Per-kind custody movements
//!
//! One intake path and one release path per asset kind. Intake reports the
//! quantity actually taken into custody; release moves exactly the recorded
//! quantity back to the depositor.

use types::asset::{AssetKind, BATCH_RECEIVED, ITEM_RECEIVED};
use types::errors::CallError;
use types::ids::Address;
use types::numeric::{Amount, ItemId};

use crate::asset::{AssetBook, ItemReceiver};
use crate::errors::IntakeError;
use crate::ledger::Obligation;

/// The engine's receiver hook. Acknowledges every inbound per-id transfer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustodyReceiver;

impl ItemReceiver for CustodyReceiver {
    fn on_item_received(
        &self,
        _operator: Address,
        _from: Address,
        _item_id: ItemId,
        _amount: Amount,
        _data: &[u8],
    ) -> [u8; 4] {
        ITEM_RECEIVED
    }

    fn on_batch_received(
        &self,
        _operator: Address,
        _from: Address,
        _item_ids: &[ItemId],
        _amounts: &[Amount],
        _data: &[u8],
    ) -> [u8; 4] {
        BATCH_RECEIVED
    }
}

/// Move the deposit from `depositor` into `engine` custody.
///
/// `receiver` is the engine's hook, handed to per-id assets for the
/// inbound acknowledgment.
///
/// Returns the quantity to record: 1 for unique-id items, the requested
/// amount for per-id balances, the measured balance delta for fungibles.
/// Per-id intake fails unless the engine's item balance grew by exactly
/// the requested amount.
#[allow(clippy::too_many_arguments)]
pub(crate) fn receive<B: AssetBook>(
    assets: &mut B,
    engine: Address,
    depositor: Address,
    asset: Address,
    kind: AssetKind,
    amount: Amount,
    item_id: ItemId,
    receiver: &dyn ItemReceiver,
) -> Result<Amount, IntakeError> {
    match kind {
        AssetKind::NonFungible => {
            assets
                .asset_mut(asset)?
                .transfer_item(engine, depositor, engine, item_id)?;
            let owner = assets.asset(asset)?.owner_of(item_id)?;
            if owner != engine {
                return Err(IntakeError::OwnershipNotReceived { item_id });
            }
            Ok(1)
        }
        AssetKind::MultiToken => {
            let before = assets.asset(asset)?.item_balance_of(engine, item_id)?;
            assets.asset_mut(asset)?.safe_transfer_item(
                engine,
                depositor,
                engine,
                item_id,
                amount,
                &[],
                Some(receiver),
            )?;
            let after = assets.asset(asset)?.item_balance_of(engine, item_id)?;
            let received = after.checked_sub(before).unwrap_or(0);
            if received != amount {
                return Err(IntakeError::ItemsNotReceived { item_id, expected: amount, received });
            }
            Ok(amount)
        }
        AssetKind::Fungible => {
            let before = assets.asset(asset)?.balance_of(engine)?;
            let accepted = assets
                .asset_mut(asset)?
                .transfer_from(engine, depositor, engine, amount)?;
            if !accepted {
                return Err(IntakeError::TransferRejected);
            }
            let after = assets.asset(asset)?.balance_of(engine)?;
            match after.checked_sub(before) {
                None => Err(IntakeError::BalanceDecreased { before, after }),
                Some(0) => Err(IntakeError::NothingReceived { balance: after }),
                Some(delta) => Ok(delta),
            }
        }
    }
}

/// Return an obligation's custody to its depositor.
pub(crate) fn release<B: AssetBook>(
    assets: &mut B,
    engine: Address,
    depositor: Address,
    obligation: &Obligation,
) -> Result<(), CallError> {
    let asset = assets.asset_mut(obligation.asset)?;
    match obligation.kind {
        AssetKind::NonFungible => {
            asset.transfer_item(engine, engine, depositor, obligation.item_id)
        }
        AssetKind::MultiToken => asset.safe_transfer_item(
            engine,
            engine,
            depositor,
            obligation.item_id,
            obligation.quantity,
            &[],
            None,
        ),
        AssetKind::Fungible => {
            if asset.transfer(engine, depositor, obligation.quantity)? {
                Ok(())
            } else {
                Err(CallError::reverted("transfer reported failure"))
            }
        }
    }
}
