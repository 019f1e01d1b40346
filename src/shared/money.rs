//! Exact decimal amounts tied to an asset.
//!
//! All math uses `rust_decimal::Decimal`. Amounts are exposed in major units
//! (`1.5` WAVES) and converted to minor units (`150000000`) only at the node
//! boundary. No async, no network calls.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::SdkError;

/// Largest precision a `Decimal` can represent exactly.
pub const MAX_PRECISION: u32 = 28;

/// An immutable amount of a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    asset_id: AssetId,
    precision: u32,
    amount: Decimal,
}

fn scale_factor(precision: u32) -> Decimal {
    Decimal::from_i128_with_scale(10i128.pow(precision), 0)
}

fn check_precision(precision: u32) -> Result<(), SdkError> {
    if precision > MAX_PRECISION {
        return Err(SdkError::InvalidAmount(format!(
            "precision {} exceeds {}",
            precision, MAX_PRECISION
        )));
    }
    Ok(())
}

impl Money {
    /// Build from an amount already expressed in major units.
    pub fn new(asset_id: AssetId, precision: u32, amount: Decimal) -> Result<Self, SdkError> {
        check_precision(precision)?;
        Ok(Self {
            asset_id,
            precision,
            amount,
        })
    }

    /// Build from integer minor units as reported by the node.
    pub fn from_minor_units(
        asset_id: AssetId,
        precision: u32,
        units: i128,
    ) -> Result<Self, SdkError> {
        check_precision(precision)?;
        let amount = Decimal::try_from_i128_with_scale(units, precision)
            .map_err(|e| SdkError::InvalidAmount(format!("{} minor units: {}", units, e)))?;
        Ok(Self {
            asset_id,
            precision,
            amount,
        })
    }

    pub fn zero(asset_id: AssetId, precision: u32) -> Result<Self, SdkError> {
        Self::new(asset_id, precision, Decimal::ZERO)
    }

    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Amount in major units.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Same asset, new amount.
    pub fn clone_with_amount(&self, amount: Decimal) -> Money {
        Money {
            asset_id: self.asset_id.clone(),
            precision: self.precision,
            amount,
        }
    }

    /// Same asset, amount parsed from a decimal string (e.g. `"0"`, `"12.5"`).
    pub fn clone_with_amount_str(&self, amount: &str) -> Result<Money, SdkError> {
        let parsed = Decimal::from_str(amount)
            .map_err(|e| SdkError::InvalidAmount(format!("'{}': {}", amount, e)))?;
        Ok(self.clone_with_amount(parsed))
    }

    /// A zero amount of the same asset.
    pub fn zero_like(&self) -> Money {
        self.clone_with_amount(Decimal::ZERO)
    }

    /// Amount in integer minor units. Digits beyond the precision are truncated.
    pub fn to_minor_units(&self) -> Result<i128, SdkError> {
        self.amount
            .checked_mul(scale_factor(self.precision))
            .and_then(|scaled| scaled.trunc().to_i128())
            .ok_or_else(|| {
                SdkError::InvalidAmount(format!(
                    "{} does not fit in minor units of {}",
                    self.amount, self.asset_id
                ))
            })
    }

    pub fn add(&self, other: &Money) -> Result<Money, SdkError> {
        self.ensure_same_asset(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| SdkError::InvalidAmount(format!("{} + {} overflows", self, other)))?;
        Ok(self.clone_with_amount(sum))
    }

    pub fn sub(&self, other: &Money) -> Result<Money, SdkError> {
        self.ensure_same_asset(other)?;
        let diff = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| SdkError::InvalidAmount(format!("{} - {} overflows", self, other)))?;
        Ok(self.clone_with_amount(diff))
    }

    /// Multiply by a plain factor, truncating to this asset's precision.
    pub fn checked_mul_amount(&self, factor: Decimal) -> Result<Money, SdkError> {
        let product = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| SdkError::InvalidAmount(format!("{} * {} overflows", self, factor)))?;
        Ok(self.clone_with_amount(
            product.round_dp_with_strategy(self.precision, RoundingStrategy::ToZero),
        ))
    }

    pub fn lt(&self, other: &Money) -> Result<bool, SdkError> {
        self.ensure_same_asset(other)?;
        Ok(self.amount < other.amount)
    }

    pub fn lte(&self, other: &Money) -> Result<bool, SdkError> {
        self.ensure_same_asset(other)?;
        Ok(self.amount <= other.amount)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Negative amounts become zero; everything else is returned unchanged.
    pub fn clamp_non_negative(self) -> Money {
        if self.is_negative() {
            self.zero_like()
        } else {
            self
        }
    }

    fn ensure_same_asset(&self, other: &Money) -> Result<(), SdkError> {
        if self.asset_id != other.asset_id {
            return Err(SdkError::AssetMismatch {
                left: self.asset_id.clone(),
                right: other.asset_id.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.*} {}",
            self.precision as usize, self.amount, self.asset_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn waves(amount: Decimal) -> Money {
        Money::new(AssetId::native(), 8, amount).unwrap()
    }

    fn btc(amount: Decimal) -> Money {
        Money::new(AssetId::from("BTC"), 8, amount).unwrap()
    }

    #[test]
    fn test_from_minor_units() {
        let m = Money::from_minor_units(AssetId::native(), 8, 150_000_000).unwrap();
        assert_eq!(m.amount(), dec!(1.5));
        assert_eq!(m.to_minor_units().unwrap(), 150_000_000);
    }

    #[test]
    fn test_zero_precision_asset() {
        let m = Money::from_minor_units(AssetId::from("NFT"), 0, 3).unwrap();
        assert_eq!(m.amount(), dec!(3));
        assert_eq!(m.to_minor_units().unwrap(), 3);
    }

    #[test]
    fn test_rejects_excessive_precision() {
        assert!(matches!(
            Money::zero(AssetId::native(), 29),
            Err(SdkError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_add_then_sub_round_trips() {
        let cases = [
            (dec!(0), dec!(0)),
            (dec!(1.5), dec!(0.00000001)),
            (dec!(92233720368.54775807), dec!(12345.6789)),
            (dec!(0.1), dec!(0.2)),
        ];
        for (a, b) in cases {
            let a = waves(a);
            let b = waves(b);
            assert_eq!(a.add(&b).unwrap().sub(&b).unwrap(), a);
        }
    }

    #[test]
    fn test_point_one_plus_point_two_is_exact() {
        let sum = waves(dec!(0.1)).add(&waves(dec!(0.2))).unwrap();
        assert_eq!(sum.amount(), dec!(0.3));
    }

    #[test]
    fn test_cross_asset_arithmetic_fails() {
        let err = waves(dec!(1)).add(&btc(dec!(1))).unwrap_err();
        assert!(matches!(err, SdkError::AssetMismatch { .. }));
        assert!(waves(dec!(1)).sub(&btc(dec!(1))).is_err());
        assert!(waves(dec!(1)).lt(&btc(dec!(1))).is_err());
    }

    #[test]
    fn test_comparisons() {
        let one = waves(dec!(1));
        let two = waves(dec!(2));
        assert!(one.lt(&two).unwrap());
        assert!(one.lte(&one).unwrap());
        assert!(!two.lte(&one).unwrap());
    }

    #[test]
    fn test_clone_with_amount_str() {
        let m = waves(dec!(5));
        let zero = m.clone_with_amount_str("0").unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero.asset_id(), m.asset_id());
        assert!(m.clone_with_amount_str("abc").is_err());
    }

    #[test]
    fn test_clamp_non_negative() {
        let negative = waves(dec!(1)).sub(&waves(dec!(3))).unwrap();
        assert!(negative.is_negative());
        assert!(negative.clamp_non_negative().is_zero());
        assert_eq!(waves(dec!(2)).clamp_non_negative().amount(), dec!(2));
    }

    #[test]
    fn test_mul_truncates_to_precision() {
        let usd = Money::new(AssetId::from("USD"), 2, dec!(1.99)).unwrap();
        let product = usd.checked_mul_amount(dec!(0.333)).unwrap();
        assert_eq!(product.amount(), dec!(0.66));
    }

    #[test]
    fn test_display_pads_to_precision() {
        let usd = Money::new(AssetId::from("USD"), 2, dec!(3.5)).unwrap();
        assert_eq!(usd.to_string(), "3.50 USD");
    }
}
