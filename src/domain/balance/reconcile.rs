//! Pure balance reconciliation.
//!
//! Merges node balances, open-order locks and pending-transaction
//! reservations into one [`CategorizedBalance`] per asset. No async, no
//! network calls, no caches.
//!
//! ```text
//! regular   = node_regular   - reserved
//! available = node_available - reserved - in_orders
//! ```
//!
//! Each result is clamped at zero. Order and reservation snapshots are taken
//! at slightly different times than the node snapshot, so a transient
//! negative is expected and not an error.

use super::{CategorizedBalance, NativeBalanceDetail};
use crate::domain::asset::{AssetBalance, AssetDescriptor};
use crate::error::SdkError;
use crate::shared::{AssetId, Money};
use std::collections::BTreeMap;

/// Sum amounts per asset.
pub fn group_money(list: &[Money]) -> Result<BTreeMap<AssetId, Money>, SdkError> {
    let mut grouped: BTreeMap<AssetId, Money> = BTreeMap::new();
    for money in list {
        let sum = match grouped.get(money.asset_id()) {
            Some(total) => total.add(money)?,
            None => money.clone(),
        };
        grouped.insert(money.asset_id().clone(), sum);
    }
    Ok(grouped)
}

/// `money - Σ deductions`, clamped at zero.
fn sub_clamped(money: &Money, deductions: &[&Money]) -> Result<Money, SdkError> {
    let mut result = money.clone();
    for deduction in deductions {
        result = result.sub(deduction)?;
    }
    Ok(result.clamp_non_negative())
}

/// Group amounts per asset, dropping any sum that comes out negative.
fn group_non_negative(list: &[Money]) -> Result<BTreeMap<AssetId, Money>, SdkError> {
    Ok(group_money(list)?
        .into_iter()
        .map(|(id, sum)| (id, sum.clamp_non_negative()))
        .collect())
}

fn amount_or_zero(grouped: &BTreeMap<AssetId, Money>, like: &Money) -> Money {
    grouped
        .get(like.asset_id())
        .cloned()
        .unwrap_or_else(|| like.zero_like())
}

/// A balance with every category zero.
pub fn zero_balance(asset: &AssetDescriptor) -> Result<CategorizedBalance, SdkError> {
    let zero = asset.zero()?;
    Ok(CategorizedBalance {
        asset: asset.clone(),
        regular: zero.clone(),
        available: zero.clone(),
        in_orders: zero.clone(),
        leased_out: zero.clone(),
        leased_in: zero,
    })
}

/// Build the categorized balance list.
///
/// The native row comes first, followed by the other assets in the order the
/// balance source reported them. A native entry inside `asset_balances` is
/// ignored: the node's native breakdown is authoritative.
pub fn reconcile(
    native_asset: &AssetDescriptor,
    native: &NativeBalanceDetail,
    asset_balances: &[AssetBalance],
    orders: &[Money],
    reserved: &[Money],
) -> Result<Vec<CategorizedBalance>, SdkError> {
    let in_orders = group_non_negative(orders)?;
    let reservations = group_non_negative(reserved)?;

    let native_reserved = amount_or_zero(&reservations, &native.regular);
    let native_orders = amount_or_zero(&in_orders, &native.regular);

    let mut balances = Vec::with_capacity(asset_balances.len() + 1);
    balances.push(CategorizedBalance {
        asset: native_asset.clone(),
        regular: sub_clamped(&native.regular, &[&native_reserved])?,
        available: sub_clamped(&native.available, &[&native_reserved, &native_orders])?,
        in_orders: native_orders,
        leased_out: native.leased_out.clone().clamp_non_negative(),
        leased_in: native.leased_in.clone().clamp_non_negative(),
    });

    for entry in asset_balances
        .iter()
        .filter(|entry| entry.asset.id != native_asset.id)
    {
        let balance = &entry.balance;
        let reserved = amount_or_zero(&reservations, balance);
        let locked = amount_or_zero(&in_orders, balance);

        balances.push(CategorizedBalance {
            asset: entry.asset.clone(),
            regular: sub_clamped(balance, &[&reserved])?,
            available: sub_clamped(balance, &[&reserved, &locked])?,
            in_orders: locked,
            leased_out: balance.zero_like(),
            leased_in: balance.zero_like(),
        });
    }

    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn native_money(amount: Decimal) -> Money {
        Money::new(AssetId::native(), 8, amount).unwrap()
    }

    fn token() -> AssetDescriptor {
        AssetDescriptor {
            id: AssetId::from("TOKEN"),
            name: "Token".to_string(),
            precision: 2,
            reissuable: true,
            quantity: dec!(1000),
            description: String::new(),
            issuer: None,
        }
    }

    fn token_money(amount: Decimal) -> Money {
        Money::new(AssetId::from("TOKEN"), 2, amount).unwrap()
    }

    fn native_detail(regular: Decimal, available: Decimal, leased_out: Decimal, leased_in: Decimal) -> NativeBalanceDetail {
        NativeBalanceDetail {
            regular: native_money(regular),
            available: native_money(available),
            leased_out: native_money(leased_out),
            leased_in: native_money(leased_in),
        }
    }

    #[test]
    fn test_group_money_sums_per_asset() {
        let grouped = group_money(&[
            native_money(dec!(1)),
            token_money(dec!(2)),
            native_money(dec!(3.5)),
        ])
        .unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&AssetId::native()].amount(), dec!(4.5));
        assert_eq!(grouped[&AssetId::from("TOKEN")].amount(), dec!(2));
    }

    #[test]
    fn test_native_row() {
        let result = reconcile(
            &AssetDescriptor::native(),
            &native_detail(dec!(100), dec!(90), dec!(5), dec!(0)),
            &[],
            &[native_money(dec!(20))],
            &[native_money(dec!(10))],
        )
        .unwrap();

        assert_eq!(result.len(), 1);
        let row = &result[0];
        assert!(row.asset.is_native());
        assert_eq!(row.regular.amount(), dec!(90));
        assert_eq!(row.available.amount(), dec!(60));
        assert_eq!(row.in_orders.amount(), dec!(20));
        assert_eq!(row.leased_out.amount(), dec!(5));
        assert_eq!(row.leased_in.amount(), dec!(0));
    }

    #[test]
    fn test_asset_row_applies_orders_and_reservations() {
        let result = reconcile(
            &AssetDescriptor::native(),
            &native_detail(dec!(1), dec!(1), dec!(0), dec!(0)),
            &[AssetBalance {
                asset: token(),
                balance: token_money(dec!(50)),
            }],
            &[token_money(dec!(15)), token_money(dec!(5))],
            &[token_money(dec!(10))],
        )
        .unwrap();

        assert_eq!(result.len(), 2);
        let row = &result[1];
        assert_eq!(row.asset_id().as_str(), "TOKEN");
        assert_eq!(row.regular.amount(), dec!(40));
        assert_eq!(row.available.amount(), dec!(20));
        assert_eq!(row.in_orders.amount(), dec!(20));
        assert!(row.leased_out.is_zero());
        assert!(row.leased_in.is_zero());
        assert_eq!(row.leased_in.asset_id().as_str(), "TOKEN");
    }

    #[test]
    fn test_native_entry_in_asset_balances_is_skipped() {
        let result = reconcile(
            &AssetDescriptor::native(),
            &native_detail(dec!(10), dec!(10), dec!(0), dec!(0)),
            &[
                AssetBalance {
                    asset: AssetDescriptor::native(),
                    balance: native_money(dec!(999)),
                },
                AssetBalance {
                    asset: token(),
                    balance: token_money(dec!(1)),
                },
            ],
            &[],
            &[],
        )
        .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].regular.amount(), dec!(10));
        assert_eq!(result[1].asset_id().as_str(), "TOKEN");
    }

    #[test]
    fn test_never_negative() {
        let grid = [dec!(0), dec!(1), dec!(50), dec!(1000)];
        for reserved in grid {
            for locked in grid {
                let result = reconcile(
                    &AssetDescriptor::native(),
                    &native_detail(dec!(50), dec!(40), dec!(0), dec!(0)),
                    &[AssetBalance {
                        asset: token(),
                        balance: token_money(dec!(50)),
                    }],
                    &[native_money(locked), token_money(locked)],
                    &[native_money(reserved), token_money(reserved)],
                )
                .unwrap();
                for row in &result {
                    for amount in row.amounts() {
                        assert!(!amount.is_negative(), "{:?}", row);
                    }
                    assert!(row.available.lte(&row.regular).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_overfilled_order_and_negative_reservation_never_surface() {
        use crate::domain::order::{open_order_money, Order, OrderStatus, OrderType};

        let overfilled = Order {
            id: "overfilled".to_string(),
            order_type: OrderType::Sell,
            status: OrderStatus::PartiallyFilled,
            amount: native_money(dec!(10)),
            filled: native_money(dec!(15)),
            price: token_money(dec!(1)),
            timestamp: chrono::Utc::now(),
        };
        let locks = open_order_money(&[overfilled]).unwrap();

        let result = reconcile(
            &AssetDescriptor::native(),
            &native_detail(dec!(100), dec!(90), dec!(-3), dec!(-1)),
            &[AssetBalance {
                asset: token(),
                balance: token_money(dec!(50)),
            }],
            &locks,
            &[native_money(dec!(-7)), token_money(dec!(-2))],
        )
        .unwrap();

        let native = &result[0];
        assert_eq!(native.regular.amount(), dec!(100));
        assert_eq!(native.available.amount(), dec!(90));
        assert!(native.in_orders.is_zero());
        assert!(native.leased_out.is_zero());
        assert!(native.leased_in.is_zero());

        let token_row = &result[1];
        assert_eq!(token_row.regular.amount(), dec!(50));
        assert_eq!(token_row.available.amount(), dec!(50));
        for row in &result {
            for amount in row.amounts() {
                assert!(!amount.is_negative(), "{:?}", row);
            }
        }
    }

    #[test]
    fn test_unrelated_locks_are_ignored() {
        let result = reconcile(
            &AssetDescriptor::native(),
            &native_detail(dec!(10), dec!(10), dec!(0), dec!(0)),
            &[],
            &[token_money(dec!(3))],
            &[token_money(dec!(4))],
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].available.amount(), dec!(10));
        assert!(result[0].in_orders.is_zero());
    }

    #[test]
    fn test_zero_balance() {
        let zero = zero_balance(&token()).unwrap();
        assert!(zero.is_empty());
        assert_eq!(zero.regular.precision(), 2);
        assert_eq!(zero.leased_out.asset_id().as_str(), "TOKEN");
    }
}
