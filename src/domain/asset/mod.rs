//! Asset domain: descriptors, metadata cache, per-asset balances, facade.

pub mod cache;
pub mod client;
mod convert;
pub mod wire;

use crate::error::SdkError;
use crate::network::{NATIVE_ASSET_ID, NATIVE_ASSET_PRECISION, NATIVE_ASSET_QUANTITY};
use crate::shared::{Address, AssetId, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use cache::AssetMetadataCache;

// ─── AssetDescriptor ─────────────────────────────────────────────────────────

/// Metadata for a single asset.
///
/// `id` and `precision` never change once fetched; `reissuable` and
/// `quantity` are refreshed from later balance snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub id: AssetId,
    pub name: String,
    pub precision: u32,
    pub reissuable: bool,
    /// Total issued, in major units.
    pub quantity: Decimal,
    pub description: String,
    pub issuer: Option<Address>,
}

impl AssetDescriptor {
    /// The built-in descriptor of the native asset.
    pub fn native() -> Self {
        Self {
            id: AssetId::native(),
            name: NATIVE_ASSET_ID.to_string(),
            precision: NATIVE_ASSET_PRECISION,
            reissuable: false,
            quantity: Decimal::from(NATIVE_ASSET_QUANTITY),
            description: String::new(),
            issuer: None,
        }
    }

    pub fn is_native(&self) -> bool {
        self.id.is_native()
    }

    pub fn zero(&self) -> Result<Money, SdkError> {
        Money::zero(self.id.clone(), self.precision)
    }

    pub fn money_from_minor_units(&self, units: i128) -> Result<Money, SdkError> {
        Money::from_minor_units(self.id.clone(), self.precision, units)
    }

    /// Apply a partial update. Identity fields are untouched.
    pub fn apply(&mut self, update: &AssetUpdate) {
        if let Some(reissuable) = update.reissuable {
            self.reissuable = reissuable;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
    }
}

/// Fields of a descriptor that may change after the first fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetUpdate {
    pub reissuable: Option<bool>,
    pub quantity: Option<Decimal>,
}

impl AssetUpdate {
    pub fn from_descriptor(asset: &AssetDescriptor) -> Self {
        Self {
            reissuable: Some(asset.reissuable),
            quantity: Some(asset.quantity),
        }
    }
}

// ─── AssetSearchResult ───────────────────────────────────────────────────────

/// An asset matching a search query. Carries no precision; call
/// `info` for the full descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSearchResult {
    pub id: AssetId,
    /// Display name, after any client-side rename.
    pub name: String,
    pub ticker: Option<String>,
}

// ─── AssetBalance ────────────────────────────────────────────────────────────

/// A held amount of one asset as reported by the balance source.
///
/// `asset` carries the `reissuable`/`quantity` observed in the same report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub asset: AssetDescriptor,
    pub balance: Money,
}
