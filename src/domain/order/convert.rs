//! Conversions: matcher wire orders → Order domain types.

use super::wire::OrderResponse;
use super::Order;
use crate::domain::asset::{AssetDescriptor, AssetMetadataCache};
use crate::error::SdkError;
use crate::shared::Money;
use crate::sources::AssetRegistry;

/// Fixed exponent the matcher adds to every price.
const PRICE_CONSTANT_EXP: u32 = 8;

impl OrderResponse {
    /// Normalize amounts using the descriptors of both pair assets.
    pub fn into_order(
        self,
        amount_asset: &AssetDescriptor,
        price_asset: &AssetDescriptor,
    ) -> Result<Order, SdkError> {
        if amount_asset.id != self.asset_pair.amount_asset
            || price_asset.id != self.asset_pair.price_asset
        {
            return Err(SdkError::Validation(format!(
                "order {} trades {}/{}, got descriptors for {}/{}",
                self.id,
                self.asset_pair.amount_asset,
                self.asset_pair.price_asset,
                amount_asset.id,
                price_asset.id
            )));
        }

        let price_scale = (PRICE_CONSTANT_EXP + price_asset.precision)
            .checked_sub(amount_asset.precision)
            .ok_or_else(|| {
                SdkError::Validation(format!(
                    "amount precision {} too large for order {}",
                    amount_asset.precision, self.id
                ))
            })?;
        let price = Money::from_minor_units(price_asset.id.clone(), price_scale, self.price)?;

        Ok(Order {
            amount: amount_asset.money_from_minor_units(self.amount)?,
            filled: amount_asset.money_from_minor_units(self.filled)?,
            price: Money::new(price_asset.id.clone(), price_asset.precision, price.amount())?,
            id: self.id,
            order_type: self.order_type,
            status: self.status,
            timestamp: self.timestamp,
        })
    }
}

/// Convert a matcher order list, resolving pair assets through the cache.
pub async fn orders_from_wire(
    responses: Vec<OrderResponse>,
    cache: &AssetMetadataCache,
    registry: &dyn AssetRegistry,
) -> Result<Vec<Order>, SdkError> {
    let mut orders = Vec::with_capacity(responses.len());
    for response in responses {
        let amount_asset = cache
            .fetch_or_get(&response.asset_pair.amount_asset, registry)
            .await?;
        let price_asset = cache
            .fetch_or_get(&response.asset_pair.price_asset, registry)
            .await?;
        orders.push(response.into_order(&amount_asset, &price_asset)?);
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderStatus, OrderType};
    use crate::shared::AssetId;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    fn usd() -> AssetDescriptor {
        AssetDescriptor {
            id: AssetId::from("USD"),
            name: "US Dollar".to_string(),
            precision: 2,
            reissuable: true,
            quantity: dec!(1000000),
            description: String::new(),
            issuer: None,
        }
    }

    fn response_json() -> &'static str {
        r#"{
            "id": "ord1",
            "type": "buy",
            "status": "PartiallyFilled",
            "amount": 200000000,
            "filled": 50000000,
            "price": 125,
            "timestamp": 1700000000000,
            "assetPair": {"amountAsset": null, "priceAsset": "USD"}
        }"#
    }

    #[test]
    fn test_wire_order_deserializes() {
        let resp: OrderResponse = serde_json::from_str(response_json()).unwrap();
        assert_eq!(resp.order_type, OrderType::Buy);
        assert_eq!(resp.status, OrderStatus::PartiallyFilled);
        assert!(resp.asset_pair.amount_asset.is_native());
    }

    #[test]
    fn test_into_order_normalizes_price() {
        // WAVES/USD: price scale = 8 + 2 - 8 = 2, so 125 → 1.25 USD per WAVES.
        let resp: OrderResponse = serde_json::from_str(response_json()).unwrap();
        let order = resp.into_order(&AssetDescriptor::native(), &usd()).unwrap();
        assert_eq!(order.amount.amount(), dec!(2));
        assert_eq!(order.filled.amount(), dec!(0.5));
        assert_eq!(order.price.amount(), dec!(1.25));
        assert_eq!(order.price.precision(), 2);
        assert_eq!(order.locked_amount().unwrap().amount(), dec!(1.87));
    }

    #[test]
    fn test_into_order_rejects_wrong_descriptors() {
        let resp: OrderResponse = serde_json::from_str(response_json()).unwrap();
        assert!(matches!(
            resp.into_order(&usd(), &AssetDescriptor::native()),
            Err(SdkError::Validation(_))
        ));
    }

    struct UsdRegistry;

    #[async_trait]
    impl AssetRegistry for UsdRegistry {
        async fn asset_descriptor(&self, asset_id: &AssetId) -> Result<AssetDescriptor, SdkError> {
            if asset_id.as_str() == "USD" {
                Ok(usd())
            } else {
                Err(SdkError::AssetNotFound(asset_id.clone()))
            }
        }
    }

    #[tokio::test]
    async fn test_orders_from_wire_resolves_assets() {
        let resp: OrderResponse = serde_json::from_str(response_json()).unwrap();
        let cache = AssetMetadataCache::new();
        let orders = orders_from_wire(vec![resp], &cache, &UsdRegistry).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert!(cache.get(&AssetId::from("USD")).await.is_some());
    }
}
