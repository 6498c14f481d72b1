//! Integer quantities and oracle random words
//!
//! Asset quantities are whole token units, so plain unsigned integers are
//! used instead of decimals. Random words are 256-bit unsigned integers held
//! as 32 big-endian bytes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Quantity of an asset in its smallest unit.
pub type Amount = u128;

/// Discriminator of an item inside a non-fungible asset.
pub type ItemId = u128;

/// Byte width of a random word.
pub const WORD_BYTES: usize = 32;

/// Errors parsing a random word from hex.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseWordError {
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Word exceeds {WORD_BYTES} bytes: got {len}")]
    TooLong { len: usize },
}

/// A 256-bit random value delivered by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RandomWord([u8; WORD_BYTES]);

impl RandomWord {
    /// Build from big-endian bytes.
    pub fn from_be_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Self(bytes)
    }

    /// Build a word whose integer value is `value`.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Remainder of the 256-bit value divided by `modulus`.
    ///
    /// Returns 0 for a zero modulus.
    pub fn modulo(&self, modulus: u64) -> u64 {
        if modulus == 0 {
            return 0;
        }
        let m = modulus as u128;
        let rem = self
            .0
            .iter()
            .fold(0u128, |acc, byte| (acc * 256 + *byte as u128) % m);
        rem as u64
    }
}

impl From<u64> for RandomWord {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for RandomWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for RandomWord {
    type Err = ParseWordError;

    /// Parses up to 64 hex digits, with or without a `0x` prefix.
    /// Shorter inputs are left-padded with zeros.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let raw = hex::decode(padded)?;
        if raw.len() > WORD_BYTES {
            return Err(ParseWordError::TooLong { len: raw.len() });
        }
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - raw.len()..].copy_from_slice(&raw);
        Ok(Self(bytes))
    }
}

impl Serialize for RandomWord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RandomWord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
