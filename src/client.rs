//! High-level client: `WalletClient` with nested sub-client accessors.
//!
//! The facade for asset metadata and balances lives in
//! `domain/asset/client.rs`. This module keeps the builder, the shared cache
//! state and the accessor methods.

use crate::cache::PollCache;
use crate::domain::alias::AliasBook;
use crate::domain::asset::client::Assets;
use crate::domain::asset::{AssetDescriptor, AssetMetadataCache};
use crate::domain::balance::{BalanceRefresh, CategorizedBalance};
use crate::domain::fee::StaticFeeSchedule;
use crate::error::SdkError;
use crate::session::{Session, SessionGate};
use crate::shared::AssetId;
use crate::sources::{
    AliasRegistry, AssetRegistry, AssetSearch, BalanceSource, FeeSchedule, NoOrders,
    NoReservations, OrderSource, ReservedSource,
};

use async_lock::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub use crate::domain::asset::client::Assets as AssetsClient;

pub(crate) type BalanceCache = PollCache<Vec<CategorizedBalance>>;

/// The primary entry point of the SDK.
pub struct WalletClient {
    pub(crate) registry: Arc<dyn AssetRegistry>,
    pub(crate) balances: Arc<dyn BalanceSource>,
    pub(crate) orders: Arc<dyn OrderSource>,
    pub(crate) reserved: Arc<dyn ReservedSource>,
    pub(crate) aliases: Arc<dyn AliasRegistry>,
    pub(crate) fees: Arc<dyn FeeSchedule>,
    pub(crate) search: Option<Arc<dyn AssetSearch>>,
    /// Display names that replace the ones search results carry.
    pub(crate) remapped_names: Arc<HashMap<AssetId, String>>,
    pub(crate) session: Arc<SessionGate>,
    /// Asset metadata: id → descriptor, never evicted.
    pub(crate) metadata: Arc<AssetMetadataCache>,
    /// Built on the first balance request after sign-in.
    pub(crate) balance_cache: Arc<OnceCell<BalanceCache>>,
    pub(crate) native_asset: AssetDescriptor,
    pub(crate) balance_refresh: Duration,
}

impl WalletClient {
    pub fn builder() -> WalletClientBuilder {
        WalletClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub fn metadata(&self) -> &AssetMetadataCache {
        &self.metadata
    }

    pub fn native_asset(&self) -> &AssetDescriptor {
        &self.native_asset
    }

    /// Fire the session-ready signal. Only the first call has an effect.
    pub async fn sign_in(&self, session: Session) -> bool {
        self.session.sign_in(session).await
    }

    /// Clear asset metadata (the native descriptor stays) and drop the
    /// cached balance snapshot.
    pub async fn clear_all_caches(&self) {
        self.metadata.clear().await;
        if let Some(cache) = self.balance_cache.get() {
            cache.invalidate().await;
        }
    }

    /// The balance poll cache, built once the session is ready.
    pub(crate) async fn balance_cache(&self) -> &BalanceCache {
        let session = self.session.wait().await;
        self.balance_cache
            .get_or_init(|| async {
                tracing::debug!(
                    address = %session.address,
                    refresh_ms = self.balance_refresh.as_millis() as u64,
                    "starting balance polling"
                );
                let refresh = BalanceRefresh {
                    address: session.address.clone(),
                    native_asset: self.native_asset.clone(),
                    balances: self.balances.clone(),
                    orders: self.orders.clone(),
                    reserved: self.reserved.clone(),
                    aliases: self.aliases.clone(),
                    metadata: self.metadata.clone(),
                };
                PollCache::new(self.balance_refresh, move || {
                    let refresh = refresh.clone();
                    async move { refresh.run().await }
                })
            })
            .await
    }
}

impl Clone for WalletClient {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            balances: self.balances.clone(),
            orders: self.orders.clone(),
            reserved: self.reserved.clone(),
            aliases: self.aliases.clone(),
            fees: self.fees.clone(),
            search: self.search.clone(),
            remapped_names: self.remapped_names.clone(),
            session: self.session.clone(),
            metadata: self.metadata.clone(),
            balance_cache: self.balance_cache.clone(),
            native_asset: self.native_asset.clone(),
            balance_refresh: self.balance_refresh,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct WalletClientBuilder {
    node_url: String,
    data_service_url: String,
    registry: Option<Arc<dyn AssetRegistry>>,
    balances: Option<Arc<dyn BalanceSource>>,
    orders: Arc<dyn OrderSource>,
    reserved: Arc<dyn ReservedSource>,
    aliases: Arc<dyn AliasRegistry>,
    fees: Arc<dyn FeeSchedule>,
    search: Option<Arc<dyn AssetSearch>>,
    remapped_names: HashMap<AssetId, String>,
    native_asset: AssetDescriptor,
    balance_refresh: Duration,
}

struct NodeSources {
    registry: Arc<dyn AssetRegistry>,
    balances: Arc<dyn BalanceSource>,
    search: Option<Arc<dyn AssetSearch>>,
}

impl Default for WalletClientBuilder {
    fn default() -> Self {
        Self {
            node_url: crate::network::DEFAULT_NODE_URL.to_string(),
            data_service_url: crate::network::DEFAULT_DATA_SERVICE_URL.to_string(),
            registry: None,
            balances: None,
            orders: Arc::new(NoOrders),
            reserved: Arc::new(NoReservations),
            aliases: Arc::new(AliasBook::new()),
            fees: Arc::new(StaticFeeSchedule::default()),
            search: None,
            remapped_names: HashMap::new(),
            native_asset: AssetDescriptor::native(),
            balance_refresh: crate::network::DEFAULT_BALANCE_REFRESH,
        }
    }
}

impl WalletClientBuilder {
    /// Node used for metadata and balances when no custom source is set.
    pub fn node_url(mut self, url: &str) -> Self {
        self.node_url = url.to_string();
        self
    }

    /// Data service used for asset search when no custom source is set.
    pub fn data_service_url(mut self, url: &str) -> Self {
        self.data_service_url = url.to_string();
        self
    }

    pub fn asset_registry(mut self, registry: Arc<dyn AssetRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn balance_source(mut self, balances: Arc<dyn BalanceSource>) -> Self {
        self.balances = Some(balances);
        self
    }

    pub fn order_source(mut self, orders: Arc<dyn OrderSource>) -> Self {
        self.orders = orders;
        self
    }

    pub fn reserved_source(mut self, reserved: Arc<dyn ReservedSource>) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn alias_registry(mut self, aliases: Arc<dyn AliasRegistry>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn fee_schedule(mut self, fees: Arc<dyn FeeSchedule>) -> Self {
        self.fees = fees;
        self
    }

    pub fn asset_search(mut self, search: Arc<dyn AssetSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Show `name` instead of the reported name wherever search returns `id`.
    pub fn remapped_asset_name(mut self, id: AssetId, name: &str) -> Self {
        self.remapped_names.insert(id, name.to_string());
        self
    }

    pub fn native_asset(mut self, native: AssetDescriptor) -> Self {
        self.native_asset = native;
        self
    }

    /// How long a balance snapshot is served before the next refresh.
    pub fn balance_refresh(mut self, interval: Duration) -> Self {
        self.balance_refresh = interval;
        self
    }

    pub fn build(self) -> Result<WalletClient, SdkError> {
        let metadata = Arc::new(AssetMetadataCache::with_native(self.native_asset.clone()));
        let sources = self.node_sources(&metadata)?;
        Ok(WalletClient {
            registry: sources.registry,
            balances: sources.balances,
            orders: self.orders,
            reserved: self.reserved,
            aliases: self.aliases,
            fees: self.fees,
            search: sources.search,
            remapped_names: Arc::new(self.remapped_names),
            session: Arc::new(SessionGate::new()),
            metadata,
            balance_cache: Arc::new(OnceCell::new()),
            native_asset: self.native_asset,
            balance_refresh: self.balance_refresh,
        })
    }

    #[cfg(feature = "http")]
    fn node_sources(&self, metadata: &Arc<AssetMetadataCache>) -> Result<NodeSources, SdkError> {
        let node = Arc::new(
            crate::http::NodeHttp::new(&self.node_url)
                .with_data_service(&self.data_service_url)
                .with_native(self.native_asset.clone())
                .with_metadata(metadata.clone()),
        );
        let registry = self
            .registry
            .clone()
            .unwrap_or_else(|| node.clone() as Arc<dyn AssetRegistry>);
        let balances = self
            .balances
            .clone()
            .unwrap_or_else(|| node.clone() as Arc<dyn BalanceSource>);
        let search = self
            .search
            .clone()
            .unwrap_or_else(|| node as Arc<dyn AssetSearch>);
        Ok(NodeSources {
            registry,
            balances,
            search: Some(search),
        })
    }

    #[cfg(not(feature = "http"))]
    fn node_sources(&self, _metadata: &Arc<AssetMetadataCache>) -> Result<NodeSources, SdkError> {
        match (&self.registry, &self.balances) {
            (Some(registry), Some(balances)) => Ok(NodeSources {
                registry: registry.clone(),
                balances: balances.clone(),
                search: self.search.clone(),
            }),
            _ => Err(SdkError::Validation(format!(
                "asset registry and balance source are required without the `http` feature (node {})",
                self.node_url
            ))),
        }
    }
}
