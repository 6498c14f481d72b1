//! Asset kinds and capability interface identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transfer protocol an asset implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Balance-based asset; custody is measured by balance deltas
    Fungible,
    /// Unique-id asset; each item has exactly one owner
    NonFungible,
    /// Per-id balances; an item id can have many units
    MultiToken,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Fungible => "fungible",
            AssetKind::NonFungible => "non_fungible",
            AssetKind::MultiToken => "multi_token",
        };
        f.write_str(name)
    }
}

/// Four-byte identifier of a capability an asset may advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceId(pub [u8; 4]);

impl InterfaceId {
    /// Unique-id non-fungible interface.
    pub const NON_FUNGIBLE: InterfaceId = InterfaceId([0x80, 0xac, 0x58, 0xcd]);

    /// Per-id-balance interface.
    pub const MULTI_TOKEN: InterfaceId = InterfaceId([0xd9, 0xb6, 0x7a, 0x26]);

    /// Introspection interface itself.
    pub const INTROSPECTION: InterfaceId = InterfaceId([0x01, 0xff, 0xc9, 0xa7]);

    /// Per-id-balance receiver interface.
    pub const MULTI_TOKEN_RECEIVER: InterfaceId = InterfaceId([0x4e, 0x23, 0x12, 0xe0]);
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Token a receiver returns to accept a single per-id transfer.
pub const ITEM_RECEIVED: [u8; 4] = [0xf2, 0x3a, 0x6e, 0x61];

/// Token a receiver returns to accept a batch per-id transfer.
pub const BATCH_RECEIVED: [u8; 4] = [0xbc, 0x19, 0x7c, 0x81];
