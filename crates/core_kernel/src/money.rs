//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! Currencies are identified by an ISO-like code rather than a closed enum
//! because each organization maintains its own currency list.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;
use thiserror::Error;

/// Scale kept on every stored amount and conversion result.
///
/// Four places absorb exchange-rate products without losing the minor
/// units of any supported currency.
pub const INTERNAL_SCALE: u32 = 4;

const MAX_CODE_LEN: usize = 8;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow during calculation")]
    Overflow,
}

/// An ISO-like currency code, normalized to uppercase
///
/// Codes are short ASCII alphanumeric strings ("USD", "ARS", "USDT").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code
    pub fn new(code: &str) -> Result<Self, MoneyError> {
        let trimmed = code.trim();
        if trimmed.is_empty()
            || trimmed.len() > MAX_CODE_LEN
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(MoneyError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A monetary amount with associated currency
///
/// Money uses rust_decimal for precise arithmetic without floating-point errors.
/// Amounts are stored with [`INTERNAL_SCALE`] decimal places to handle
/// exchange rate calculations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self {
            amount: amount.round_dp(INTERNAL_SCALE),
            currency,
        }
    }

    /// Creates Money from an integer amount in minor units (e.g., cents)
    pub fn from_minor(minor_units: i64, minor_digits: u32, currency: CurrencyCode) -> Self {
        Self::new(Decimal::new(minor_units, minor_digits), currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            currency: self.currency.clone(),
        }
    }

    /// Rounds to the given number of decimal places (half away from zero)
    pub fn round_dp(&self, dp: u32) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
            currency: self.currency.clone(),
        }
    }

    /// Rounds using banker's rounding (round half to even)
    pub fn round_bankers(&self, dp: u32) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven),
            currency: self.currency.clone(),
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(sum, self.currency.clone()))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let diff = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(diff, self.currency.clone()))
    }

    /// Multiplies by a scalar (e.g., a sign or a rate)
    pub fn multiply(&self, factor: Decimal) -> Result<Self, MoneyError> {
        let product = self.amount.checked_mul(factor).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(product, self.currency.clone()))
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient = self.amount.checked_div(divisor).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(quotient, self.currency.clone()))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount.normalize())
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            amount: -self.amount,
            currency: self.currency,
        }
    }
}

/// Exchange rate expressed as functional-currency units per one unit of a
/// foreign currency
///
/// A USD rate of 1000 in an organization whose functional currency is ARS
/// means one dollar is worth one thousand pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// Wraps a raw rate. Non-positive rates are representable so that bad
    /// reference data can be flagged instead of rejected.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the rate as a decimal
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the rate can be used for multiplication and division
    pub fn is_usable(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns the inverse rate, or None when the rate is not usable
    pub fn inverse(&self) -> Option<ExchangeRate> {
        if !self.is_usable() {
            return None;
        }
        Decimal::ONE.checked_div(self.0).map(ExchangeRate)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// A money amount together with the exchange rate captured when the
/// underlying record (payment, cost, quote line) was stored
///
/// The recorded rate takes precedence over the live registry rate so that
/// historical reports do not move when rates are refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyValue {
    pub money: Money,
    pub recorded_rate: Option<ExchangeRate>,
}

impl MoneyValue {
    /// Creates a value without a recorded rate
    pub fn new(money: Money) -> Self {
        Self {
            money,
            recorded_rate: None,
        }
    }

    /// Attaches the rate captured at recording time
    pub fn with_recorded_rate(mut self, rate: ExchangeRate) -> Self {
        self.recorded_rate = Some(rate);
        self
    }

    pub fn amount(&self) -> Decimal {
        self.money.amount()
    }

    pub fn currency(&self) -> &CurrencyCode {
        self.money.currency()
    }
}

impl From<Money> for MoneyValue {
    fn from(money: Money) -> Self {
        Self::new(money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn test_currency_code_normalizes() {
        let code = CurrencyCode::new(" ars ").unwrap();
        assert_eq!(code.as_str(), "ARS");
    }

    #[test]
    fn test_currency_code_rejects_garbage() {
        assert!(CurrencyCode::new("").is_err());
        assert!(CurrencyCode::new("U$D").is_err());
        assert!(CurrencyCode::new("TOOLONGCODE").is_err());
    }

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50), usd());
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), &usd());
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(10050, 2, usd());
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00), usd());
        let b = Money::new(dec!(50.00), usd());

        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(150.00));
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(50.00));
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::new(dec!(100.00), usd());
        let eur = Money::new(dec!(100.00), CurrencyCode::new("EUR").unwrap());

        let result = usd.checked_add(&eur);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_divide_by_zero() {
        let m = Money::new(dec!(10), usd());
        assert_eq!(m.divide(Decimal::ZERO), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_rate_inverse() {
        let rate = ExchangeRate::new(dec!(4));
        assert_eq!(rate.inverse().unwrap().value(), dec!(0.25));
        assert!(ExchangeRate::new(Decimal::ZERO).inverse().is_none());
    }

    #[test]
    fn test_money_value_recorded_rate() {
        let value = MoneyValue::new(Money::new(dec!(1), usd()))
            .with_recorded_rate(ExchangeRate::new(dec!(950)));
        assert_eq!(value.recorded_rate.map(|r| r.value()), Some(dec!(950)));
    }
}
