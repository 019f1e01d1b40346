//! Wire types for node balance responses (REST).

use crate::shared::{serde_util, Address, AssetId};
use serde::Deserialize;

/// `GET /addresses/balance/details/{address}`: native amounts in minor units.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDetailsResponse {
    pub address: Address,
    #[serde(with = "serde_util::minor_units")]
    pub regular: i128,
    #[serde(with = "serde_util::minor_units")]
    pub generating: i128,
    #[serde(with = "serde_util::minor_units")]
    pub available: i128,
    #[serde(with = "serde_util::minor_units")]
    pub effective: i128,
}

/// Issue transaction embedded in an asset balance entry.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IssueTransaction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub decimals: u32,
    pub sender: Option<Address>,
}

/// One entry of `GET /assets/balance/{address}`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalanceEntry {
    pub asset_id: AssetId,
    #[serde(with = "serde_util::minor_units")]
    pub balance: i128,
    pub reissuable: bool,
    /// Total issued, in minor units.
    #[serde(with = "serde_util::minor_units")]
    pub quantity: i128,
    /// Newer nodes omit the issue transaction; metadata then comes from the registry.
    #[serde(default)]
    pub issue_transaction: Option<IssueTransaction>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AssetsBalanceResponse {
    pub address: Address,
    pub balances: Vec<AssetBalanceEntry>,
}
