//! Asset metadata cache: id → descriptor, never evicted.

use super::{AssetDescriptor, AssetUpdate};
use crate::error::SdkError;
use crate::shared::AssetId;
use crate::sources::AssetRegistry;

use async_lock::RwLock;
use std::collections::HashMap;

/// Process-lifetime cache of asset descriptors.
///
/// Concurrent `fetch_or_get` calls for the same uncached id may each hit the
/// registry; whichever completes first is stored and later calls are served
/// from the cache.
pub struct AssetMetadataCache {
    assets: RwLock<HashMap<AssetId, AssetDescriptor>>,
}

impl AssetMetadataCache {
    /// An empty cache with the native descriptor pre-seeded.
    pub fn new() -> Self {
        Self::with_native(AssetDescriptor::native())
    }

    pub fn with_native(native: AssetDescriptor) -> Self {
        let mut assets = HashMap::new();
        assets.insert(native.id.clone(), native);
        Self {
            assets: RwLock::new(assets),
        }
    }

    pub async fn get(&self, asset_id: &AssetId) -> Option<AssetDescriptor> {
        self.assets.read().await.get(asset_id).cloned()
    }

    pub async fn fetch_or_get(
        &self,
        asset_id: &AssetId,
        registry: &dyn AssetRegistry,
    ) -> Result<AssetDescriptor, SdkError> {
        if let Some(asset) = self.get(asset_id).await {
            tracing::debug!(asset_id = %asset_id, "asset metadata cache hit");
            return Ok(asset);
        }

        let fetched = registry.asset_descriptor(asset_id).await?;
        let mut assets = self.assets.write().await;
        let stored = assets
            .entry(asset_id.clone())
            .or_insert_with(|| fetched.clone());
        Ok(stored.clone())
    }

    pub async fn insert(&self, asset: AssetDescriptor) {
        self.assets.write().await.insert(asset.id.clone(), asset);
    }

    /// Merge mutable fields into a cached entry.
    ///
    /// Returns `false` and leaves the cache untouched when the id is unknown.
    pub async fn update(&self, asset_id: &AssetId, update: &AssetUpdate) -> bool {
        match self.assets.write().await.get_mut(asset_id) {
            Some(asset) => {
                asset.apply(update);
                true
            }
            None => {
                tracing::warn!(asset_id = %asset_id, "update for uncached asset ignored");
                false
            }
        }
    }

    /// Write-through of a descriptor observed in a balance snapshot.
    ///
    /// Known assets get their mutable fields refreshed; unknown assets are
    /// inserted as reported.
    pub async fn merge_observed(&self, observed: &AssetDescriptor) {
        let mut assets = self.assets.write().await;
        match assets.get_mut(&observed.id) {
            Some(asset) => asset.apply(&AssetUpdate::from_descriptor(observed)),
            None => {
                assets.insert(observed.id.clone(), observed.clone());
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.assets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.assets.read().await.is_empty()
    }

    /// Drop every entry except the native descriptor.
    pub async fn clear(&self) {
        self.assets.write().await.retain(|id, _| id.is_native());
    }
}

impl Default for AssetMetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRegistry {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AssetRegistry for CountingRegistry {
        async fn asset_descriptor(&self, asset_id: &AssetId) -> Result<AssetDescriptor, SdkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if asset_id.as_str() == "missing" {
                return Err(SdkError::AssetNotFound(asset_id.clone()));
            }
            Ok(AssetDescriptor {
                id: asset_id.clone(),
                name: "Token".to_string(),
                precision: 2,
                reissuable: true,
                quantity: dec!(1000),
                description: String::new(),
                issuer: None,
            })
        }
    }

    fn registry() -> CountingRegistry {
        CountingRegistry {
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_fetch_or_get_memoizes() {
        let cache = AssetMetadataCache::new();
        let registry = registry();
        let id = AssetId::from("TOKEN");

        assert!(cache.get(&id).await.is_none());
        let first = cache.fetch_or_get(&id, &registry).await.unwrap();
        let second = cache.fetch_or_get(&id, &registry).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(&id).await.unwrap().precision, 2);
    }

    #[tokio::test]
    async fn test_native_is_preseeded() {
        let cache = AssetMetadataCache::new();
        let registry = registry();
        let native = cache.fetch_or_get(&AssetId::native(), &registry).await.unwrap();
        assert!(native.is_native());
        assert_eq!(registry.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let cache = AssetMetadataCache::new();
        let registry = registry();
        let id = AssetId::from("missing");
        assert!(matches!(
            cache.fetch_or_get(&id, &registry).await,
            Err(SdkError::AssetNotFound(_))
        ));
        assert!(cache.fetch_or_get(&id, &registry).await.is_err());
        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let cache = AssetMetadataCache::new();
        let id = AssetId::from("TOKEN");
        cache.fetch_or_get(&id, &registry()).await.unwrap();

        let updated = cache
            .update(
                &id,
                &AssetUpdate {
                    reissuable: Some(false),
                    quantity: Some(dec!(250)),
                },
            )
            .await;
        assert!(updated);
        let asset = cache.get(&id).await.unwrap();
        assert!(!asset.reissuable);
        assert_eq!(asset.quantity, dec!(250));
        assert_eq!(asset.name, "Token");
    }

    #[tokio::test]
    async fn test_update_unknown_asset_is_noop() {
        let cache = AssetMetadataCache::new();
        let before = cache.len().await;
        let updated = cache
            .update(&AssetId::from("nope"), &AssetUpdate::default())
            .await;
        assert!(!updated);
        assert_eq!(cache.len().await, before);
    }

    #[tokio::test]
    async fn test_merge_observed_inserts_then_updates() {
        let cache = AssetMetadataCache::new();
        let mut observed = registry()
            .asset_descriptor(&AssetId::from("TOKEN"))
            .await
            .unwrap();
        cache.merge_observed(&observed).await;
        assert_eq!(cache.get(&observed.id).await.unwrap().quantity, dec!(1000));

        observed.quantity = dec!(1500);
        observed.name = "Renamed".to_string();
        cache.merge_observed(&observed).await;
        let cached = cache.get(&observed.id).await.unwrap();
        assert_eq!(cached.quantity, dec!(1500));
        assert_eq!(cached.name, "Token");
    }

    #[tokio::test]
    async fn test_clear_keeps_native() {
        let cache = AssetMetadataCache::new();
        cache.fetch_or_get(&AssetId::from("TOKEN"), &registry()).await.unwrap();
        assert_eq!(cache.len().await, 2);
        cache.clear().await;
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&AssetId::native()).await.is_some());
    }
}
