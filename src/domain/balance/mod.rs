//! Balance domain: categorized balances, reconciliation, refresh.

mod convert;
pub mod reconcile;
pub mod refresh;
pub mod wire;

pub use convert::asset_balances_from_wire;
pub use reconcile::{group_money, reconcile, zero_balance};
pub use refresh::BalanceRefresh;

use crate::domain::asset::AssetDescriptor;
use crate::shared::Money;
use serde::{Deserialize, Serialize};

// ─── NativeBalanceDetail ─────────────────────────────────────────────────────

/// Native-asset balance breakdown as reported by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeBalanceDetail {
    pub regular: Money,
    pub available: Money,
    pub leased_out: Money,
    pub leased_in: Money,
}

/// Node view of an account: native balances plus its aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountState {
    pub native: NativeBalanceDetail,
    pub aliases: Vec<String>,
}

// ─── CategorizedBalance ──────────────────────────────────────────────────────

/// How much of one asset the account holds, by category.
///
/// Every field is in `asset` and never negative. Leasing fields are zero for
/// non-native assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedBalance {
    pub asset: AssetDescriptor,
    /// Held amount minus amounts reserved by pending local transactions.
    pub regular: Money,
    /// Regular amount minus amounts locked in open orders.
    pub available: Money,
    pub in_orders: Money,
    pub leased_out: Money,
    pub leased_in: Money,
}

impl CategorizedBalance {
    pub fn asset_id(&self) -> &crate::shared::AssetId {
        &self.asset.id
    }

    /// All five amounts, in declaration order.
    pub fn amounts(&self) -> [&Money; 5] {
        [
            &self.regular,
            &self.available,
            &self.in_orders,
            &self.leased_out,
            &self.leased_in,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.amounts().iter().all(|m| m.is_zero())
    }
}
