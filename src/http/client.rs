//! Low-level node REST client: `NodeHttp`.
//!
//! One method per endpoint returning wire types, plus the [`AssetRegistry`],
//! [`BalanceSource`] and [`AssetSearch`] implementations that convert them to
//! domain types. Search goes to the data service, everything else to the node.

use crate::domain::asset::wire::{AssetDetailsResponse, AssetSearchItem};
use crate::domain::asset::{AssetBalance, AssetDescriptor, AssetMetadataCache, AssetSearchResult};
use crate::domain::balance::wire::{AssetsBalanceResponse, BalanceDetailsResponse};
use crate::domain::balance::{asset_balances_from_wire, AccountState};
use crate::error::{HttpError, SdkError};
use crate::http::retry::RetryPolicy;
use crate::shared::{Address, AssetId};
use crate::sources::{AssetRegistry, AssetSearch, BalanceSource};

use async_trait::async_trait;
use futures_util::try_join;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Node REST client.
#[derive(Clone)]
pub struct NodeHttp {
    base_url: String,
    data_service_url: String,
    client: Client,
    native: AssetDescriptor,
    /// Resolves balance entries that arrive without an issue transaction.
    metadata: Arc<AssetMetadataCache>,
    retry: RetryPolicy,
}

impl NodeHttp {
    pub fn new(base_url: &str) -> Self {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        });

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            data_service_url: crate::network::DEFAULT_DATA_SERVICE_URL.to_string(),
            client,
            native: AssetDescriptor::native(),
            metadata: Arc::new(AssetMetadataCache::new()),
            retry: RetryPolicy::Idempotent,
        }
    }

    /// Descriptor answered locally for the native asset id.
    pub fn with_native(mut self, native: AssetDescriptor) -> Self {
        self.native = native;
        self
    }

    /// Share the client's metadata cache so balance refreshes reuse it.
    pub fn with_metadata(mut self, metadata: Arc<AssetMetadataCache>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_data_service(mut self, url: &str) -> Self {
        self.data_service_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn data_service_url(&self) -> &str {
        &self.data_service_url
    }

    // ── Assets ───────────────────────────────────────────────────────────

    pub async fn get_asset_details(
        &self,
        asset_id: &AssetId,
    ) -> Result<AssetDetailsResponse, HttpError> {
        let url = format!(
            "{}/assets/details/{}",
            self.base_url,
            urlencoding::encode(asset_id.as_str())
        );
        self.get(&url).await
    }

    pub async fn get_asset_balances(
        &self,
        address: &Address,
    ) -> Result<AssetsBalanceResponse, HttpError> {
        let url = format!("{}/assets/balance/{}", self.base_url, address);
        self.get(&url).await
    }

    pub async fn search_assets(&self, query: &str) -> Result<Vec<AssetSearchItem>, HttpError> {
        let url = format!(
            "{}/assets/search/{}",
            self.data_service_url,
            urlencoding::encode(query)
        );
        self.get(&url).await
    }

    // ── Addresses ────────────────────────────────────────────────────────

    pub async fn get_balance_details(
        &self,
        address: &Address,
    ) -> Result<BalanceDetailsResponse, HttpError> {
        let url = format!("{}/addresses/balance/details/{}", self.base_url, address);
        self.get(&url).await
    }

    pub async fn get_aliases(&self, address: &Address) -> Result<Vec<String>, HttpError> {
        let url = format!("{}/alias/by-address/{}", self.base_url, address);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let Some(config) = self.retry.config() else {
            return self.do_get(url).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if !config.should_retry(&e) || attempt == config.max_retries {
                        return Err(e);
                    }

                    let delay = match &e {
                        HttpError::RateLimited {
                            retry_after_ms: Some(ms),
                        } => Duration::from_millis(*ms),
                        _ => config.delay_for_attempt(attempt),
                    };
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying request to {}",
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    last_error = Some(e);
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

#[async_trait]
impl AssetRegistry for NodeHttp {
    async fn asset_descriptor(&self, asset_id: &AssetId) -> Result<AssetDescriptor, SdkError> {
        if *asset_id == self.native.id {
            return Ok(self.native.clone());
        }

        match self.get_asset_details(asset_id).await {
            Ok(details) => details.try_into(),
            // The node answers unknown ids with 400 ("invalid asset id") or 404.
            Err(HttpError::NotFound(_)) | Err(HttpError::BadRequest(_)) => {
                Err(SdkError::AssetNotFound(asset_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl AssetSearch for NodeHttp {
    async fn search(&self, query: &str) -> Result<Vec<AssetSearchResult>, SdkError> {
        let items = self.search_assets(query).await?;
        Ok(items.into_iter().map(AssetSearchResult::from).collect())
    }
}

#[async_trait]
impl BalanceSource for NodeHttp {
    async fn account_state(&self, address: &Address) -> Result<AccountState, SdkError> {
        let (details, aliases) =
            try_join!(self.get_balance_details(address), self.get_aliases(address))?;
        details.into_account_state(&self.native, aliases)
    }

    async fn asset_balances(&self, address: &Address) -> Result<Vec<AssetBalance>, SdkError> {
        let resp = self.get_asset_balances(address).await?;
        asset_balances_from_wire(resp.balances, &self.metadata, self).await
    }
}
