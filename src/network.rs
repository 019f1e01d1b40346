//! Network URL constants and chain-level defaults.

use std::time::Duration;

/// Default node REST API base URL.
pub const DEFAULT_NODE_URL: &str = "https://nodes.wavesnodes.com";

/// Default data-service base URL, used for asset search.
pub const DEFAULT_DATA_SERVICE_URL: &str = "https://api.wavesplatform.com";

/// Identifier of the chain's native asset.
pub const NATIVE_ASSET_ID: &str = "WAVES";

/// Decimal precision of the native asset.
pub const NATIVE_ASSET_PRECISION: u32 = 8;

/// Total native supply, in major units.
pub const NATIVE_ASSET_QUANTITY: u64 = 100_000_000;

/// How long a reconciled balance snapshot stays fresh.
pub const DEFAULT_BALANCE_REFRESH: Duration = Duration::from_millis(2000);
