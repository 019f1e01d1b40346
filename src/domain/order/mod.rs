//! Order domain: matcher orders and the amounts they lock.

mod convert;
pub mod wire;

pub use convert::orders_from_wire;

use crate::error::SdkError;
use crate::shared::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── OrderType ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OrderType::Buy => write!(f, "buy"),
            OrderType::Sell => write!(f, "sell"),
        }
    }
}

// ─── OrderStatus ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Accepted,
    PartiallyFilled,
    Filled,
    Cancelled,
    NotFound,
}

impl OrderStatus {
    /// Whether an order in this status still locks funds.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Accepted | OrderStatus::PartiallyFilled)
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// A matcher order with amounts in major units.
///
/// `amount` and `filled` are in the amount asset; `price` is the price of one
/// amount-asset token, in the price asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub amount: Money,
    pub filled: Money,
    pub price: Money,
    pub timestamp: DateTime<Utc>,
}

impl Order {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Unfilled part of the order, in the amount asset. Zero once the
    /// matcher reports more filled than ordered.
    pub fn remaining(&self) -> Result<Money, SdkError> {
        Ok(self.amount.sub(&self.filled)?.clamp_non_negative())
    }

    /// Funds the order keeps out of the available balance.
    ///
    /// A sell order locks its unfilled amount of the sold asset. A buy order
    /// locks `remaining × price` of the price asset.
    pub fn locked_amount(&self) -> Result<Money, SdkError> {
        let remaining = self.remaining()?;
        match self.order_type {
            OrderType::Sell => Ok(remaining),
            OrderType::Buy => self.price.checked_mul_amount(remaining.amount()),
        }
    }
}

/// Locked amounts of every open order, one entry per order.
pub fn open_order_money(orders: &[Order]) -> Result<Vec<Money>, SdkError> {
    orders
        .iter()
        .filter(|order| order.is_open())
        .map(Order::locked_amount)
        .collect()
}
