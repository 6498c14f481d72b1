//! Draw resolver
//!
//! Maps the oracle's random value to a roll of a six-sided die. Any face
//! but zero returns custody; zero forfeits it. Either way the obligation and
//! its tracker entry are cleared in the same step, unless the return
//! transfer fails, in which case nothing changes.

use serde::{Deserialize, Serialize};
use types::ids::{Address, RequestId};
use types::numeric::RandomWord;

use crate::asset::AssetBook;
use crate::custody;
use crate::errors::FulfillError;
use crate::ledger::{CustodyLedger, Obligation, RequestTracker};

/// Number of equally likely rolls.
pub const DIE_FACES: u64 = 6;

/// The roll that forfeits custody.
pub const FORFEIT_ROLL: u64 = 0;

/// Result of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawOutcome {
    /// Custody returned to the depositor
    Returned,
    /// Custody kept by the engine with no extraction path
    Forfeited,
}

/// Everything a resolution decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResolution {
    pub depositor: Address,
    pub request_id: RequestId,
    pub roll: u64,
    pub outcome: DrawOutcome,
    pub obligation: Obligation,
}

/// `word mod DIE_FACES`.
pub fn roll(word: &RandomWord) -> u64 {
    word.modulo(DIE_FACES)
}

pub fn outcome_for(roll: u64) -> DrawOutcome {
    if roll == FORFEIT_ROLL {
        DrawOutcome::Forfeited
    } else {
        DrawOutcome::Returned
    }
}

/// Resolve one outstanding request.
///
/// The caller has already authenticated the oracle. Asset-side effects of a
/// failed payout are reverted through the host checkpoint and the ledger is
/// left untouched.
pub(crate) fn resolve<B: AssetBook>(
    ledger: &mut CustodyLedger,
    tracker: &mut RequestTracker,
    assets: &mut B,
    engine: Address,
    request_id: RequestId,
    random_values: &[RandomWord],
) -> Result<DrawResolution, FulfillError> {
    let depositor = tracker
        .depositor_of(&request_id)
        .ok_or(FulfillError::UnknownRequest { request_id })?;
    let word = random_values
        .first()
        .ok_or(FulfillError::NoRandomValues { request_id })?;
    let obligation = ledger
        .get(&depositor)
        .cloned()
        .ok_or(FulfillError::UnknownRequest { request_id })?;

    let roll = roll(word);
    let outcome = outcome_for(roll);

    if outcome == DrawOutcome::Returned {
        let checkpoint = assets.checkpoint();
        if let Err(source) = custody::release(assets, engine, depositor, &obligation) {
            assets.revert(checkpoint);
            return Err(FulfillError::Payout { depositor, source });
        }
    }

    tracker.untrack(&request_id);
    ledger.clear(&depositor);

    Ok(DrawResolution {
        depositor,
        request_id,
        roll,
        outcome,
        obligation,
    })
}
