//! Assets sub-client: metadata, search, balances, fees.

use crate::client::WalletClient;
use crate::domain::asset::{AssetDescriptor, AssetSearchResult};
use crate::domain::balance::{zero_balance, CategorizedBalance};
use crate::domain::fee::TransactionType;
use crate::error::SdkError;
use crate::shared::{AssetId, Money};

use futures_util::future::try_join_all;
use futures_util::try_join;
use std::slice;

/// Sub-client for asset operations.
pub struct Assets<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Assets<'a> {
    /// Asset metadata. Fetched once per id, then served from cache.
    pub async fn info(&self, asset_id: &AssetId) -> Result<AssetDescriptor, SdkError> {
        self.client
            .metadata
            .fetch_or_get(asset_id, self.client.registry.as_ref())
            .await
    }

    /// Cached metadata only, no fetch.
    pub async fn cached(&self, asset_id: &AssetId) -> Option<AssetDescriptor> {
        self.client.metadata.get(asset_id).await
    }

    /// Assets whose name or ticker matches `query`, with configured renames
    /// applied. An empty query matches nothing.
    pub async fn search(&self, query: &str) -> Result<Vec<AssetSearchResult>, SdkError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let Some(search) = &self.client.search else {
            return Err(SdkError::Validation(
                "no asset search source configured".to_string(),
            ));
        };

        let mut results = search.search(query).await?;
        for result in &mut results {
            if let Some(name) = self.client.remapped_names.get(&result.id) {
                result.name = name.clone();
            }
        }
        Ok(results)
    }

    /// Balance of one asset. Zero in every category if the account holds none.
    pub async fn balance(&self, asset_id: &AssetId) -> Result<CategorizedBalance, SdkError> {
        self.balance_list(slice::from_ref(asset_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::Other(format!("No balance entry for {}", asset_id)))
    }

    /// Balances for `ids`, in the same order. Ids the account does not hold
    /// get an all-zero entry carrying the asset's metadata.
    ///
    /// Suspends until a session is established.
    pub async fn balance_list(&self, ids: &[AssetId]) -> Result<Vec<CategorizedBalance>, SdkError> {
        let (held, placeholders) = try_join!(self.user_balances(), self.placeholders(ids))?;

        Ok(placeholders
            .into_iter()
            .map(|placeholder| {
                held.iter()
                    .find(|entry| entry.asset_id() == placeholder.asset_id())
                    .cloned()
                    .unwrap_or(placeholder)
            })
            .collect())
    }

    async fn placeholders(&self, ids: &[AssetId]) -> Result<Vec<CategorizedBalance>, SdkError> {
        let assets = try_join_all(ids.iter().map(|id| self.info(id))).await?;
        assets.iter().map(zero_balance).collect()
    }

    /// Every balance of the signed-in account, native first.
    ///
    /// Served from the poll cache; concurrent callers share one refresh.
    /// Suspends until a session is established.
    pub async fn user_balances(&self) -> Result<Vec<CategorizedBalance>, SdkError> {
        self.client.balance_cache().await.get().await
    }

    /// Minimal fee for a transaction type.
    pub async fn fee(&self, tx_type: TransactionType) -> Result<Money, SdkError> {
        self.client.fees.fee(tx_type).await
    }

    /// Drop the cached balance snapshot so the next read refreshes.
    pub async fn invalidate_balances(&self) {
        if let Some(cache) = self.client.balance_cache.get() {
            cache.invalidate().await;
        }
    }
}
