//! Conversions: asset wire types → AssetDescriptor.

use super::wire::{AssetDetailsResponse, AssetSearchItem};
use super::{AssetDescriptor, AssetSearchResult};
use crate::error::SdkError;
use crate::shared::Money;

impl TryFrom<AssetDetailsResponse> for AssetDescriptor {
    type Error = SdkError;

    fn try_from(resp: AssetDetailsResponse) -> Result<Self, Self::Error> {
        let quantity = Money::from_minor_units(resp.asset_id.clone(), resp.decimals, resp.quantity)?;
        Ok(AssetDescriptor {
            id: resp.asset_id,
            name: resp.name,
            precision: resp.decimals,
            reissuable: resp.reissuable,
            quantity: quantity.amount(),
            description: resp.description,
            issuer: resp.issuer,
        })
    }
}

impl From<AssetSearchItem> for AssetSearchResult {
    fn from(item: AssetSearchItem) -> Self {
        AssetSearchResult {
            id: item.id,
            name: item.name,
            ticker: item.ticker.filter(|t| !t.is_empty()),
        }
    }
}
