//! One balance refresh: gather every source, reconcile, write through.

use super::{reconcile, CategorizedBalance};
use crate::domain::asset::{AssetDescriptor, AssetMetadataCache};
use crate::domain::order::open_order_money;
use crate::error::SdkError;
use crate::shared::Address;
use crate::sources::{AliasRegistry, BalanceSource, OrderSource, ReservedSource};

use futures_util::try_join;
use std::sync::Arc;

/// Everything a refresh needs, captured by value so it can run detached from
/// the client that created it.
#[derive(Clone)]
pub struct BalanceRefresh {
    pub address: Address,
    pub native_asset: AssetDescriptor,
    pub balances: Arc<dyn BalanceSource>,
    pub orders: Arc<dyn OrderSource>,
    pub reserved: Arc<dyn ReservedSource>,
    pub aliases: Arc<dyn AliasRegistry>,
    pub metadata: Arc<AssetMetadataCache>,
}

impl BalanceRefresh {
    pub async fn run(&self) -> Result<Vec<CategorizedBalance>, SdkError> {
        tracing::debug!(address = %self.address, "refreshing balances");

        let (account, asset_balances, orders, reserved) = try_join!(
            self.balances.account_state(&self.address),
            self.balances.asset_balances(&self.address),
            self.orders.orders(&self.address),
            self.reserved.reserved_amounts(),
        )?;

        let order_money = open_order_money(&orders)?;
        let balances = reconcile(
            &self.native_asset,
            &account.native,
            &asset_balances,
            &order_money,
            &reserved,
        )?;

        for entry in &asset_balances {
            self.metadata.merge_observed(&entry.asset).await;
        }
        self.aliases.replace(account.aliases).await;

        tracing::debug!(
            address = %self.address,
            assets = balances.len(),
            open_orders = order_money.len(),
            "balances refreshed"
        );
        Ok(balances)
    }
}
