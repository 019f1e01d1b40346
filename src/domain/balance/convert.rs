//! Conversions: node balance wire types → balance domain types.

use super::wire::{AssetBalanceEntry, BalanceDetailsResponse};
use super::{AccountState, NativeBalanceDetail};
use crate::domain::asset::{AssetBalance, AssetDescriptor, AssetMetadataCache};
use crate::error::SdkError;
use crate::sources::AssetRegistry;
use rust_decimal::Decimal;

impl BalanceDetailsResponse {
    /// Derive the leasing split from the node's aggregate figures.
    ///
    /// `leased_out = regular - available`, `leased_in = effective - available`.
    pub fn into_account_state(
        self,
        native: &AssetDescriptor,
        aliases: Vec<String>,
    ) -> Result<AccountState, SdkError> {
        let leased_out = (self.regular - self.available).max(0);
        let leased_in = (self.effective - self.available).max(0);
        Ok(AccountState {
            native: NativeBalanceDetail {
                regular: native.money_from_minor_units(self.regular)?,
                available: native.money_from_minor_units(self.available)?,
                leased_out: native.money_from_minor_units(leased_out)?,
                leased_in: native.money_from_minor_units(leased_in)?,
            },
            aliases,
        })
    }
}

impl AssetBalanceEntry {
    /// Build the domain balance.
    ///
    /// Metadata comes from the embedded issue transaction when present,
    /// otherwise from `known`. `reissuable` and `quantity` always come from
    /// this entry.
    pub fn into_asset_balance(
        self,
        known: Option<AssetDescriptor>,
    ) -> Result<AssetBalance, SdkError> {
        let mut asset = match (self.issue_transaction, known) {
            (Some(issue), _) => AssetDescriptor {
                id: self.asset_id.clone(),
                name: issue.name,
                precision: issue.decimals,
                reissuable: self.reissuable,
                quantity: Decimal::ZERO,
                description: issue.description,
                issuer: issue.sender,
            },
            (None, Some(known)) => known,
            (None, None) => return Err(SdkError::AssetNotFound(self.asset_id)),
        };

        asset.reissuable = self.reissuable;
        asset.quantity = asset.money_from_minor_units(self.quantity)?.amount();
        let balance = asset.money_from_minor_units(self.balance)?;
        Ok(AssetBalance { asset, balance })
    }
}

/// Convert a node balance list. Entries without an embedded issue
/// transaction take their metadata from the cache, which fetches each
/// unknown asset once.
pub async fn asset_balances_from_wire(
    entries: Vec<AssetBalanceEntry>,
    cache: &AssetMetadataCache,
    registry: &dyn AssetRegistry,
) -> Result<Vec<AssetBalance>, SdkError> {
    let mut balances = Vec::with_capacity(entries.len());
    for entry in entries {
        let known = if entry.issue_transaction.is_none() {
            Some(cache.fetch_or_get(&entry.asset_id, registry).await?)
        } else {
            None
        };
        balances.push(entry.into_asset_balance(known)?);
    }
    Ok(balances)
}
