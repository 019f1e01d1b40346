//! Wire types for asset metadata and search responses (REST).

use crate::shared::{serde_util, Address, AssetId};
use serde::Deserialize;

/// `GET /assets/details/{assetId}`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetailsResponse {
    pub asset_id: AssetId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub decimals: u32,
    pub reissuable: bool,
    /// Total issued, in minor units.
    #[serde(with = "serde_util::minor_units")]
    pub quantity: i128,
    pub issuer: Option<Address>,
    #[serde(default)]
    pub issue_height: Option<u64>,
}

/// One match of `GET /assets/search/{query}` on the data service.
#[derive(Deserialize, Debug, Clone)]
pub struct AssetSearchItem {
    pub id: AssetId,
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
}
