//! Contract events
//!
//! Events are immutable records emitted by the two state-changing
//! operations. They carry everything an observer needs to follow a
//! depositor from intake to resolution.

use serde::{Deserialize, Serialize};
use types::asset::AssetKind;
use types::ids::{Address, RequestId};
use types::numeric::{Amount, ItemId};

use crate::resolver::DrawOutcome;

/// Asset taken into custody and randomness requested.
///
/// `amount` is the quantity actually recorded, which for fee-on-transfer
/// assets is less than the amount the depositor asked to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulled {
    pub depositor: Address,
    pub request_id: RequestId,
    pub asset: Address,
    pub amount: Amount,
    pub item_id: ItemId,
    pub kind: AssetKind,
}

/// Oracle callback resolved an obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResolved {
    pub depositor: Address,
    pub request_id: RequestId,
    pub roll: u64,
    pub outcome: DrawOutcome,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    Pulled(Pulled),
    DrawResolved(DrawResolved),
}

impl ContractEvent {
    /// Depositor the event concerns.
    pub fn depositor(&self) -> Address {
        match self {
            ContractEvent::Pulled(e) => e.depositor,
            ContractEvent::DrawResolved(e) => e.depositor,
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            ContractEvent::Pulled(e) => e.request_id,
            ContractEvent::DrawResolved(e) => e.request_id,
        }
    }
}
