//! # Waves Balances
//!
//! Asset metadata and reconciled account balances for Waves wallets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Money, asset ids, domain models, reconciliation (pure, no I/O)
//! 2. **Sources**: Collaborator traits the balance engine pulls from
//! 3. **Caches**: Asset metadata cache and the single-flight poll cache
//! 4. **HTTP API**: `NodeHttp` against the node REST API (feature `http`)
//! 5. **High-Level Client**: `WalletClient` with the `assets()` sub-client
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waves_balances::prelude::*;
//!
//! let client = WalletClient::builder()
//!     .node_url("https://nodes.wavesnodes.com")
//!     .build()?;
//!
//! client.sign_in(Session::new(Address::parse("3P...")?)).await;
//! let balances = client.assets().user_balances().await?;
//! let waves = client.assets().balance(&AssetId::native()).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants and chain defaults.
pub mod network;

/// Session readiness signal.
pub mod session;

// ── Layer 2: Sources ─────────────────────────────────────────────────────────

/// Collaborator traits: registry, search, balances, orders, reservations, aliases, fees.
pub mod sources;

// ── Layer 3: Caches ──────────────────────────────────────────────────────────

/// Single-flight, time-bounded caches.
pub mod cache;

// ── Layer 4: HTTP API ────────────────────────────────────────────────────────

/// Node HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `WalletClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Address, AssetId, Money};

    // Domain types: asset
    pub use crate::domain::asset::{
        AssetBalance, AssetDescriptor, AssetMetadataCache, AssetSearchResult, AssetUpdate,
    };

    // Domain types: balance
    pub use crate::domain::balance::{
        reconcile, AccountState, BalanceRefresh, CategorizedBalance, NativeBalanceDetail,
    };

    // Domain types: order, fee, alias
    pub use crate::domain::alias::{AliasBook, AliasError};
    pub use crate::domain::fee::{StaticFeeSchedule, TransactionType};
    pub use crate::domain::order::{Order, OrderStatus, OrderType};

    // Errors
    pub use crate::error::SdkError;

    // Network
    pub use crate::network::{DEFAULT_BALANCE_REFRESH, DEFAULT_DATA_SERVICE_URL, DEFAULT_NODE_URL};

    // Session + sources
    pub use crate::session::{Session, SessionGate, SessionState};
    pub use crate::sources::{
        AliasRegistry, AssetRegistry, AssetSearch, BalanceSource, FeeSchedule, NoOrders,
        NoReservations, OrderSource, ReservedSource,
    };

    // Caches
    pub use crate::cache::PollCache;

    // Client + sub-clients
    pub use crate::client::{AssetsClient, WalletClient, WalletClientBuilder};

    // HTTP client
    #[cfg(feature = "http")]
    pub use crate::http::{NodeHttp, RetryConfig, RetryPolicy};
}
