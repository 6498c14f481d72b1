//! In-memory collaborators
//!
//! A host chain holding three asset flavours, plus a randomness oracle that
//! queues requests until told to answer. Used by unit tests, the
//! integration suite and the simulation harness.

mod chain;
mod multi;
mod nft;
mod oracle;
mod token;

pub use chain::{MockAsset, MockChain};
pub use multi::MockMultiToken;
pub use nft::MockNft;
pub use oracle::MockOracle;
pub use token::MockToken;

use types::asset::InterfaceId;
use types::errors::CallError;

/// How an asset answers interface probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeBehavior {
    /// No introspection method at all
    #[default]
    Absent,
    /// The probe call reverts
    Reverts,
    /// Gives the same answer for every interface
    Answers(bool),
}

impl ProbeBehavior {
    pub(crate) fn answer(&self, _interface: InterfaceId) -> Result<bool, CallError> {
        match self {
            ProbeBehavior::Absent => Err(CallError::not_implemented("supports_interface")),
            ProbeBehavior::Reverts => Err(CallError::reverted("probe reverted")),
            ProbeBehavior::Answers(answer) => Ok(*answer),
        }
    }
}
