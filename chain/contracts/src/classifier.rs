//! Asset classification by ordered, fail-open capability probes
//!
//! Probe order is fixed: unique-id first, per-id-balance second. Only an
//! affirmative answer counts; a probe that errors (no introspection, revert,
//! nothing deployed) is a "no" and classification moves on. Anything left
//! unclassified is fungible, whose intake path trusts balance deltas only.

use tracing::debug;
use types::asset::{AssetKind, InterfaceId};
use types::ids::Address;

use crate::asset::AssetBook;

/// Probe sequence, in precedence order.
const PROBES: [(InterfaceId, AssetKind); 2] = [
    (InterfaceId::NON_FUNGIBLE, AssetKind::NonFungible),
    (InterfaceId::MULTI_TOKEN, AssetKind::MultiToken),
];

/// Ask the asset whether it supports `interface`.
///
/// Never fails: an erroring probe is inconclusive and reads as `false`.
pub fn probe<B: AssetBook>(assets: &B, asset: Address, interface: InterfaceId) -> bool {
    let answer = assets
        .asset(asset)
        .and_then(|a| a.supports_interface(interface));
    match answer {
        Ok(supported) => supported,
        Err(err) => {
            debug!(%asset, %interface, error = %err, "probe inconclusive, treating as unsupported");
            false
        }
    }
}

/// Classify an arbitrary asset reference.
pub fn classify<B: AssetBook>(assets: &B, asset: Address) -> AssetKind {
    let kind = PROBES
        .iter()
        .find(|(interface, _)| probe(assets, asset, *interface))
        .map(|(_, kind)| *kind)
        .unwrap_or(AssetKind::Fungible);
    debug!(%asset, %kind, "asset classified");
    kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockChain, MockMultiToken, MockNft, MockToken, ProbeBehavior};

    #[test]
    fn test_token_without_introspection_is_fungible() {
        let mut chain = MockChain::new();
        let token = chain.deploy_token(MockToken::new());
        assert_eq!(classify(&chain, token), AssetKind::Fungible);
    }

    #[test]
    fn test_reverting_probe_is_fungible() {
        let mut chain = MockChain::new();
        let token = chain.deploy_token(MockToken::new().with_probe(ProbeBehavior::Reverts));
        assert_eq!(classify(&chain, token), AssetKind::Fungible);
    }

    #[test]
    fn test_token_answering_no_is_fungible() {
        let mut chain = MockChain::new();
        let token = chain.deploy_token(MockToken::new().with_probe(ProbeBehavior::Answers(false)));
        assert_eq!(classify(&chain, token), AssetKind::Fungible);
    }

    #[test]
    fn test_nft_classified() {
        let mut chain = MockChain::new();
        let nft = chain.deploy_nft(MockNft::new());
        assert_eq!(classify(&chain, nft), AssetKind::NonFungible);
    }

    #[test]
    fn test_multi_token_classified() {
        let mut chain = MockChain::new();
        let multi = chain.deploy_multi(MockMultiToken::new());
        assert_eq!(classify(&chain, multi), AssetKind::MultiToken);
    }

    #[test]
    fn test_unique_id_probe_takes_precedence() {
        // An asset claiming every interface resolves to the first probe.
        let mut chain = MockChain::new();
        let token = chain.deploy_token(MockToken::new().with_probe(ProbeBehavior::Answers(true)));
        assert_eq!(classify(&chain, token), AssetKind::NonFungible);
    }

    #[test]
    fn test_missing_asset_is_fungible() {
        let chain = MockChain::new();
        assert_eq!(classify(&chain, Address::new()), AssetKind::Fungible);
        assert!(!probe(&chain, Address::new(), InterfaceId::NON_FUNGIBLE));
    }
}
