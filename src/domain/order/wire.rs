//! Wire types for matcher order history responses.

use super::{OrderStatus, OrderType};
use crate::shared::{serde_util, AssetId};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Asset pair an order trades.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetPair {
    pub amount_asset: AssetId,
    pub price_asset: AssetId,
}

/// One order from `GET /matcher/orderbook/{publicKey}`.
///
/// `amount` and `filled` are minor units of the amount asset; `price` is
/// scaled by `10^(8 + price_decimals - amount_decimals)`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    #[serde(with = "serde_util::minor_units")]
    pub amount: i128,
    #[serde(with = "serde_util::minor_units")]
    pub filled: i128,
    #[serde(with = "serde_util::minor_units")]
    pub price: i128,
    #[serde(with = "serde_util::timestamp_ms")]
    pub timestamp: DateTime<Utc>,
    pub asset_pair: AssetPair,
}
