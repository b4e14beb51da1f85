//! Conversion engine
//!
//! Converts amounts between a native currency, the functional currency and
//! the display currency. Conversions never fail: when no usable rate can be
//! resolved the amount is returned as-is and tagged with the reason.

use core_kernel::{CurrencyCode, ExchangeRate, Money, MoneyValue};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::currency::Currency;
use crate::error::CurrencyError;
use crate::preferences::{CurrencyPreferences, DisplayMode};
use crate::registry::CurrencyRegistry;

/// Why an amount could not be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnconvertedReason {
    /// Neither an override nor a stored rate exists
    MissingRate,
    /// The resolved rate is zero or negative
    NonPositiveRate,
    /// The currency code is not in the registry
    UnknownCurrency,
    /// The organization has currency exchange turned off
    ExchangeDisabled,
    /// The product or quotient does not fit in a decimal
    Overflow,
}

/// Outcome of a single conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionStatus {
    /// Source and target are the same currency
    Identity,
    /// Converted with the given rate
    Converted { rate: ExchangeRate },
    /// Left in the source currency
    Unconverted { reason: UnconvertedReason },
}

impl ConversionStatus {
    pub fn is_reliable(&self) -> bool {
        !matches!(self, ConversionStatus::Unconverted { .. })
    }
}

/// An amount produced by the conversion engine
///
/// When `status` is `Unconverted`, `amount` is the input amount unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub amount: Decimal,
    pub status: ConversionStatus,
}

impl Conversion {
    fn identity(amount: Decimal) -> Self {
        Self {
            amount,
            status: ConversionStatus::Identity,
        }
    }

    fn degraded(amount: Decimal, currency: &CurrencyCode, reason: UnconvertedReason) -> Self {
        warn!(currency = %currency, ?reason, "amount left unconverted");
        Self {
            amount,
            status: ConversionStatus::Unconverted { reason },
        }
    }

    pub fn is_reliable(&self) -> bool {
        self.status.is_reliable()
    }
}

fn resolve_rate(
    currency: &Currency,
    rate: Option<ExchangeRate>,
) -> Result<ExchangeRate, UnconvertedReason> {
    let resolved = rate
        .or(currency.exchange_rate)
        .ok_or(UnconvertedReason::MissingRate)?;
    if !resolved.is_usable() {
        return Err(UnconvertedReason::NonPositiveRate);
    }
    Ok(resolved)
}

/// Converts an amount in `from` into the functional currency
///
/// Uses `rate` when given, otherwise the currency's stored rate. Amounts
/// already in the functional currency pass through unchanged.
pub fn convert_to_functional(
    amount: Decimal,
    from: &Currency,
    rate: Option<ExchangeRate>,
) -> Conversion {
    if from.is_default {
        return Conversion::identity(amount);
    }

    match resolve_rate(from, rate) {
        Ok(rate) => match amount.checked_mul(rate.value()) {
            Some(converted) => Conversion {
                amount: converted,
                status: ConversionStatus::Converted { rate },
            },
            None => Conversion::degraded(amount, &from.code, UnconvertedReason::Overflow),
        },
        Err(reason) => Conversion::degraded(amount, &from.code, reason),
    }
}

/// Converts a functional-currency amount into `to`
///
/// Inverse of [`convert_to_functional`]. A zero or missing rate returns the
/// functional amount unconverted; division by zero is never attempted.
pub fn convert_from_functional(
    functional_amount: Decimal,
    to: &Currency,
    rate: Option<ExchangeRate>,
) -> Conversion {
    if to.is_default {
        return Conversion::identity(functional_amount);
    }

    match resolve_rate(to, rate) {
        Ok(rate) => match functional_amount.checked_div(rate.value()) {
            Some(converted) => Conversion {
                amount: converted,
                status: ConversionStatus::Converted { rate },
            },
            None => Conversion::degraded(functional_amount, &to.code, UnconvertedReason::Overflow),
        },
        Err(reason) => Conversion::degraded(functional_amount, &to.code, reason),
    }
}

/// A value ready for presentation in a given display mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMoney {
    pub money: Money,
    pub status: ConversionStatus,
}

impl DisplayMoney {
    pub fn is_reliable(&self) -> bool {
        self.status.is_reliable()
    }
}

/// Conversion engine bound to one organization's currencies
#[derive(Debug, Clone, Copy)]
pub struct CurrencyConverter<'a> {
    registry: &'a CurrencyRegistry,
    secondary: Option<&'a Currency>,
    exchange_enabled: bool,
}

impl<'a> CurrencyConverter<'a> {
    /// Creates a converter with exchange enabled and no secondary currency
    pub fn new(registry: &'a CurrencyRegistry) -> Self {
        Self {
            registry,
            secondary: None,
            exchange_enabled: true,
        }
    }

    /// Creates a converter honoring the organization's preferences
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences do not match the registry.
    pub fn with_preferences(
        registry: &'a CurrencyRegistry,
        preferences: &CurrencyPreferences,
    ) -> Result<Self, CurrencyError> {
        preferences.check(registry)?;
        Ok(Self {
            registry,
            secondary: preferences
                .secondary_currency_id
                .and_then(|id| registry.get(&id)),
            exchange_enabled: preferences.use_currency_exchange,
        })
    }

    pub fn registry(&self) -> &'a CurrencyRegistry {
        self.registry
    }

    pub fn functional(&self) -> &'a Currency {
        self.registry.functional()
    }

    pub fn secondary(&self) -> Option<&'a Currency> {
        self.secondary
    }

    /// Converts a value into the functional currency, preferring the rate
    /// recorded with the value over the live rate
    pub fn to_functional(&self, value: &MoneyValue) -> Conversion {
        let code = value.currency();
        let Some(currency) = self.registry.by_code(code) else {
            return Conversion::degraded(value.amount(), code, UnconvertedReason::UnknownCurrency);
        };
        if !self.exchange_enabled && !currency.is_default {
            return Conversion::degraded(value.amount(), code, UnconvertedReason::ExchangeDisabled);
        }
        convert_to_functional(value.amount(), currency, value.recorded_rate)
    }

    /// Converts a functional amount into `to` using its live rate
    pub fn from_functional(&self, functional_amount: Decimal, to: &CurrencyCode) -> Conversion {
        let Some(currency) = self.registry.by_code(to) else {
            return Conversion::degraded(functional_amount, to, UnconvertedReason::UnknownCurrency);
        };
        if !self.exchange_enabled && !currency.is_default {
            return Conversion::degraded(functional_amount, to, UnconvertedReason::ExchangeDisabled);
        }
        convert_from_functional(functional_amount, currency, None)
    }

    /// Converts a value for presentation in `mode`
    ///
    /// Secondary mode goes through the functional currency: the recorded
    /// rate brings the value to functional, the live secondary rate takes it
    /// from there. Without a configured secondary currency it behaves like
    /// primary mode.
    pub fn to_display(&self, value: &MoneyValue, mode: DisplayMode) -> DisplayMoney {
        match mode {
            DisplayMode::Mix => DisplayMoney {
                money: value.money.clone(),
                status: ConversionStatus::Identity,
            },
            DisplayMode::Primary => self.display_functional(value),
            DisplayMode::Secondary => {
                let Some(secondary) = self.secondary_or_warn() else {
                    return self.display_functional(value);
                };
                if value.currency() == &secondary.code {
                    return DisplayMoney {
                        money: value.money.clone(),
                        status: ConversionStatus::Identity,
                    };
                }
                let functional = self.to_functional(value);
                if !functional.is_reliable() {
                    return DisplayMoney {
                        money: Money::new(functional.amount, value.currency().clone()),
                        status: functional.status,
                    };
                }
                self.functional_to_display(functional.amount, DisplayMode::Secondary)
            }
        }
    }

    /// Presents an amount that is already in the functional currency
    ///
    /// Mix and primary modes show it as-is; secondary mode converts it.
    pub fn functional_to_display(&self, functional_amount: Decimal, mode: DisplayMode) -> DisplayMoney {
        let functional_code = &self.functional().code;
        let secondary = match mode {
            DisplayMode::Secondary => self.secondary_or_warn(),
            DisplayMode::Mix | DisplayMode::Primary => None,
        };

        match secondary {
            Some(secondary) => {
                let conversion = self.from_functional(functional_amount, &secondary.code);
                let code = if conversion.is_reliable() {
                    secondary.code.clone()
                } else {
                    functional_code.clone()
                };
                DisplayMoney {
                    money: Money::new(conversion.amount, code),
                    status: conversion.status,
                }
            }
            None => DisplayMoney {
                money: Money::new(functional_amount, functional_code.clone()),
                status: ConversionStatus::Identity,
            },
        }
    }

    fn display_functional(&self, value: &MoneyValue) -> DisplayMoney {
        let conversion = self.to_functional(value);
        let code = if conversion.is_reliable() {
            self.functional().code.clone()
        } else {
            value.currency().clone()
        };
        DisplayMoney {
            money: Money::new(conversion.amount, code),
            status: conversion.status,
        }
    }

    fn secondary_or_warn(&self) -> Option<&'a Currency> {
        if self.secondary.is_none() {
            warn!("secondary display requested without a secondary currency, using functional");
        }
        self.secondary
    }
}
