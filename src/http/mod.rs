//! HTTP client layer: `NodeHttp` with per-client retry policy.

pub mod client;
pub mod retry;

pub use client::NodeHttp;
pub use retry::{RetryConfig, RetryPolicy};
