//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the node sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod money;
pub mod serde_util;

pub use money::Money;

use crate::error::SdkError;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Opaque asset identifier (`"WAVES"` or a base58 issue transaction id).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The chain's native asset id.
    pub fn native() -> Self {
        Self(crate::network::NATIVE_ASSET_ID.to_string())
    }

    pub fn is_native(&self) -> bool {
        self.0 == crate::network::NATIVE_ASSET_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for AssetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetId(s.to_string()))
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // The node reports the native asset as `null` in several responses.
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map(AssetId).unwrap_or_else(AssetId::native))
    }
}

// ─── Address ─────────────────────────────────────────────────────────────────

const ADDRESS_LENGTH: usize = 26;
const ADDRESS_VERSION: u8 = 1;

/// An account address stored as a base58 string.
///
/// Serializes transparently as a JSON string. Can be used as a HashMap key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    /// Parse and check the base58 payload shape (version byte + length).
    pub fn parse(s: &str) -> Result<Self, SdkError> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| SdkError::Validation(format!("address {:?}: {}", s, e)))?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(SdkError::Validation(format!(
                "address {:?}: expected {} bytes, got {}",
                s,
                ADDRESS_LENGTH,
                bytes.len()
            )));
        }
        if bytes[0] != ADDRESS_VERSION {
            return Err(SdkError::Validation(format!(
                "address {:?}: unsupported version {}",
                s, bytes[0]
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Address(s))
    }
}
