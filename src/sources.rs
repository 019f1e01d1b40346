//! Collaborator interfaces consumed by the balance engine.
//!
//! The SDK owns no transport for orders, pending transactions or aliases; the
//! app plugs in implementations of these traits. `NodeHttp` (feature `http`)
//! implements [`AssetRegistry`] and [`BalanceSource`] against the node REST API
//! and [`AssetSearch`] against the data service.

use crate::domain::asset::{AssetBalance, AssetDescriptor, AssetSearchResult};
use crate::domain::balance::AccountState;
use crate::domain::fee::TransactionType;
use crate::domain::order::Order;
use crate::error::SdkError;
use crate::shared::{Address, AssetId, Money};

use async_trait::async_trait;

/// Asset metadata lookup. Fails with [`SdkError::AssetNotFound`] for unknown ids.
#[async_trait]
pub trait AssetRegistry: Send + Sync {
    async fn asset_descriptor(&self, asset_id: &AssetId) -> Result<AssetDescriptor, SdkError>;
}

/// Free-text asset lookup by name or ticker.
#[async_trait]
pub trait AssetSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<AssetSearchResult>, SdkError>;
}

/// On-chain balances of an account.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Native balance breakdown plus the account's aliases.
    async fn account_state(&self, address: &Address) -> Result<AccountState, SdkError>;

    /// Every non-native asset the account holds.
    async fn asset_balances(&self, address: &Address) -> Result<Vec<AssetBalance>, SdkError>;
}

/// The account's orders on the matcher, in any status.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn orders(&self, address: &Address) -> Result<Vec<Order>, SdkError>;
}

/// Amounts committed by local transactions that are not yet confirmed.
#[async_trait]
pub trait ReservedSource: Send + Sync {
    async fn reserved_amounts(&self) -> Result<Vec<Money>, SdkError>;
}

/// Receives the alias list reported by the latest account state.
#[async_trait]
pub trait AliasRegistry: Send + Sync {
    async fn replace(&self, aliases: Vec<String>);
}

/// Minimal fee per transaction type.
#[async_trait]
pub trait FeeSchedule: Send + Sync {
    async fn fee(&self, tx_type: TransactionType) -> Result<Money, SdkError>;
}

/// A reserved-amount source for apps without a pending-transaction tracker.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReservations;

#[async_trait]
impl ReservedSource for NoReservations {
    async fn reserved_amounts(&self) -> Result<Vec<Money>, SdkError> {
        Ok(Vec::new())
    }
}

/// An order source for accounts that never trade on the matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOrders;

#[async_trait]
impl OrderSource for NoOrders {
    async fn orders(&self, _address: &Address) -> Result<Vec<Order>, SdkError> {
        Ok(Vec::new())
    }
}
