//! Unified SDK error types.

use crate::shared::AssetId;
use std::sync::Arc;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Asset mismatch: {left} vs {right}")]
    AssetMismatch { left: AssetId, right: AssetId },

    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),

    /// A poll cache refresh failed. Every caller awaiting the same flight
    /// receives a handle to the same cause.
    #[error("Refresh failed: {0}")]
    RefreshFailed(Arc<SdkError>),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// The underlying cause of a failed refresh, or `self` for any other error.
    pub fn root_cause(&self) -> &SdkError {
        match self {
            SdkError::RefreshFailed(inner) => inner.root_cause(),
            other => other,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_nested_refresh_failures() {
        let inner = SdkError::AssetNotFound(AssetId::from("abc"));
        let outer = SdkError::RefreshFailed(Arc::new(SdkError::RefreshFailed(Arc::new(inner))));
        assert!(matches!(outer.root_cause(), SdkError::AssetNotFound(id) if id.as_str() == "abc"));
    }

    #[test]
    fn test_asset_mismatch_message() {
        let err = SdkError::AssetMismatch {
            left: AssetId::from("WAVES"),
            right: AssetId::from("BTC"),
        };
        assert_eq!(err.to_string(), "Asset mismatch: WAVES vs BTC");
    }
}
