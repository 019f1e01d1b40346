//! Fee domain: transaction types and the node's minimal fee table.

use crate::error::SdkError;
use crate::shared::{AssetId, Money};
use crate::sources::FeeSchedule;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Transaction kinds a wallet can broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionType {
    Issue,
    Transfer,
    Reissue,
    Burn,
    Exchange,
    Lease,
    CancelLeasing,
    CreateAlias,
    MassTransfer,
}

impl TransactionType {
    /// Numeric type id used on chain.
    pub fn type_id(&self) -> u8 {
        match self {
            Self::Issue => 3,
            Self::Transfer => 4,
            Self::Reissue => 5,
            Self::Burn => 6,
            Self::Exchange => 7,
            Self::Lease => 8,
            Self::CancelLeasing => 9,
            Self::CreateAlias => 10,
            Self::MassTransfer => 11,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Transfer => "transfer",
            Self::Reissue => "reissue",
            Self::Burn => "burn",
            Self::Exchange => "exchange",
            Self::Lease => "lease",
            Self::CancelLeasing => "cancel-leasing",
            Self::CreateAlias => "create-alias",
            Self::MassTransfer => "mass-transfer",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed fees in native minor units.
#[derive(Debug, Clone)]
pub struct StaticFeeSchedule {
    fees: HashMap<TransactionType, i128>,
}

impl StaticFeeSchedule {
    /// Override the fee of one transaction type (native minor units).
    pub fn with_fee(mut self, tx_type: TransactionType, minor_units: i128) -> Self {
        self.fees.insert(tx_type, minor_units);
        self
    }

    pub fn fee_for(&self, tx_type: TransactionType) -> Result<Money, SdkError> {
        let units = self.fees.get(&tx_type).copied().ok_or_else(|| {
            SdkError::Validation(format!("no fee configured for {}", tx_type))
        })?;
        Money::from_minor_units(
            AssetId::native(),
            crate::network::NATIVE_ASSET_PRECISION,
            units,
        )
    }
}

impl Default for StaticFeeSchedule {
    fn default() -> Self {
        let fees = HashMap::from([
            (TransactionType::Issue, 100_000_000),
            (TransactionType::Transfer, 100_000),
            (TransactionType::Reissue, 100_000_000),
            (TransactionType::Burn, 100_000),
            (TransactionType::Exchange, 300_000),
            (TransactionType::Lease, 100_000),
            (TransactionType::CancelLeasing, 100_000),
            (TransactionType::CreateAlias, 100_000),
            (TransactionType::MassTransfer, 100_000),
        ]);
        Self { fees }
    }
}

#[async_trait]
impl FeeSchedule for StaticFeeSchedule {
    async fn fee(&self, tx_type: TransactionType) -> Result<Money, SdkError> {
        self.fee_for(tx_type)
    }
}

/// Fee of a mass transfer: base fee plus half the base per recipient, rounded
/// up to a whole base unit.
pub fn mass_transfer_fee(base: &Money, recipients: usize) -> Money {
    if base.is_zero() {
        return base.clone();
    }
    let half_base = base.amount() / Decimal::from(2);
    let extra = (half_base * Decimal::from(recipients as u64) / base.amount()).ceil() * base.amount();
    base.clone_with_amount(base.amount() + extra)
}
