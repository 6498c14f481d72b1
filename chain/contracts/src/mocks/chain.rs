use std::collections::HashMap;

use types::errors::CallError;
use types::ids::Address;

use crate::asset::{Asset, AssetBook};

use super::{MockMultiToken, MockNft, MockToken};

/// Any asset the mock chain can host.
#[derive(Debug, Clone)]
pub enum MockAsset {
    Token(MockToken),
    Nft(MockNft),
    Multi(MockMultiToken),
}

impl MockAsset {
    fn as_asset(&self) -> &dyn Asset {
        match self {
            MockAsset::Token(token) => token,
            MockAsset::Nft(nft) => nft,
            MockAsset::Multi(multi) => multi,
        }
    }

    fn as_asset_mut(&mut self) -> &mut dyn Asset {
        match self {
            MockAsset::Token(token) => token,
            MockAsset::Nft(nft) => nft,
            MockAsset::Multi(multi) => multi,
        }
    }
}

/// Host of deployed assets. Checkpoints are full snapshots.
#[derive(Debug, Clone, Default)]
pub struct MockChain {
    assets: HashMap<Address, MockAsset>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy at a fresh address.
    pub fn deploy(&mut self, asset: MockAsset) -> Address {
        self.deploy_at(Address::new(), asset)
    }

    /// Deploy at a chosen address, replacing whatever was there.
    pub fn deploy_at(&mut self, address: Address, asset: MockAsset) -> Address {
        self.assets.insert(address, asset);
        address
    }

    pub fn deploy_token(&mut self, token: MockToken) -> Address {
        self.deploy(MockAsset::Token(token))
    }

    pub fn deploy_nft(&mut self, nft: MockNft) -> Address {
        self.deploy(MockAsset::Nft(nft))
    }

    pub fn deploy_multi(&mut self, multi: MockMultiToken) -> Address {
        self.deploy(MockAsset::Multi(multi))
    }

    pub fn token(&self, address: &Address) -> Option<&MockToken> {
        match self.assets.get(address) {
            Some(MockAsset::Token(token)) => Some(token),
            _ => None,
        }
    }

    pub fn token_mut(&mut self, address: &Address) -> Option<&mut MockToken> {
        match self.assets.get_mut(address) {
            Some(MockAsset::Token(token)) => Some(token),
            _ => None,
        }
    }

    pub fn nft(&self, address: &Address) -> Option<&MockNft> {
        match self.assets.get(address) {
            Some(MockAsset::Nft(nft)) => Some(nft),
            _ => None,
        }
    }

    pub fn nft_mut(&mut self, address: &Address) -> Option<&mut MockNft> {
        match self.assets.get_mut(address) {
            Some(MockAsset::Nft(nft)) => Some(nft),
            _ => None,
        }
    }

    pub fn multi(&self, address: &Address) -> Option<&MockMultiToken> {
        match self.assets.get(address) {
            Some(MockAsset::Multi(multi)) => Some(multi),
            _ => None,
        }
    }

    pub fn multi_mut(&mut self, address: &Address) -> Option<&mut MockMultiToken> {
        match self.assets.get_mut(address) {
            Some(MockAsset::Multi(multi)) => Some(multi),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetBook for MockChain {
    type Checkpoint = HashMap<Address, MockAsset>;

    fn asset(&self, address: Address) -> Result<&dyn Asset, CallError> {
        self.assets
            .get(&address)
            .map(MockAsset::as_asset)
            .ok_or(CallError::NoAsset { address })
    }

    fn asset_mut(&mut self, address: Address) -> Result<&mut dyn Asset, CallError> {
        self.assets
            .get_mut(&address)
            .map(MockAsset::as_asset_mut)
            .ok_or(CallError::NoAsset { address })
    }

    fn checkpoint(&self) -> Self::Checkpoint {
        self.assets.clone()
    }

    fn revert(&mut self, checkpoint: Self::Checkpoint) {
        self.assets = checkpoint;
    }
}
