//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types (validated, business-logic-ready)
//! - `wire.rs`: Raw serde structs matching node responses
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `client.rs`: Sub-client with caching (assets only)

pub mod alias;
pub mod asset;
pub mod balance;
pub mod fee;
pub mod order;
