//! Currency registry
//!
//! Holds an organization's currency list and enforces the single
//! functional-currency invariant at construction time.

use std::collections::HashMap;

use core_kernel::{CurrencyCode, CurrencyId, ExchangeRate};
use rust_decimal::Decimal;

use crate::currency::Currency;
use crate::error::CurrencyError;

/// Immutable, validated list of an organization's currencies
///
/// # Invariants
///
/// - At least one currency is present
/// - Exactly one currency is marked as functional (`is_default`)
/// - Codes and ids are unique
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    currencies: Vec<Currency>,
    functional: usize,
    by_code: HashMap<CurrencyCode, usize>,
    by_id: HashMap<CurrencyId, usize>,
}

impl CurrencyRegistry {
    /// Builds a registry from the currencies returned by the data layer
    ///
    /// # Errors
    ///
    /// - `Empty` when no currency is given
    /// - `NoFunctionalCurrency` / `MultipleFunctional` when the default flag
    ///   is not set on exactly one currency
    /// - `DuplicateCode` / `DuplicateId` on repeated entries
    pub fn new(currencies: Vec<Currency>) -> Result<Self, CurrencyError> {
        if currencies.is_empty() {
            return Err(CurrencyError::Empty);
        }

        let mut by_code = HashMap::with_capacity(currencies.len());
        let mut by_id = HashMap::with_capacity(currencies.len());
        let mut defaults = Vec::new();

        for (index, currency) in currencies.iter().enumerate() {
            if by_code.insert(currency.code.clone(), index).is_some() {
                return Err(CurrencyError::DuplicateCode(currency.code.to_string()));
            }
            if by_id.insert(currency.id, index).is_some() {
                return Err(CurrencyError::DuplicateId(currency.id.to_string()));
            }
            if currency.is_default {
                defaults.push(index);
            }
        }

        let functional = match defaults.as_slice() {
            [] => return Err(CurrencyError::NoFunctionalCurrency),
            [single] => *single,
            many => {
                return Err(CurrencyError::MultipleFunctional(
                    many.iter().map(|i| currencies[*i].code.to_string()).collect(),
                ))
            }
        };

        Ok(Self {
            currencies,
            functional,
            by_code,
            by_id,
        })
    }

    /// Returns the functional (default) currency
    pub fn functional(&self) -> &Currency {
        &self.currencies[self.functional]
    }

    /// Returns true if `code` is the functional currency
    pub fn is_functional(&self, code: &CurrencyCode) -> bool {
        &self.functional().code == code
    }

    /// Finds a currency by id
    pub fn get(&self, id: &CurrencyId) -> Option<&Currency> {
        self.by_id.get(id).map(|i| &self.currencies[*i])
    }

    /// Finds a currency by normalized code
    pub fn by_code(&self, code: &CurrencyCode) -> Option<&Currency> {
        self.by_code.get(code).map(|i| &self.currencies[*i])
    }

    /// Finds a currency by a raw, possibly lowercase, code
    pub fn lookup(&self, raw_code: &str) -> Option<&Currency> {
        CurrencyCode::new(raw_code)
            .ok()
            .and_then(|code| self.by_code(&code))
    }

    /// Iterates over currencies in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Returns a copy of this registry with a refreshed live rate
    ///
    /// Values that carry a recorded rate are unaffected by the refresh.
    pub fn with_rate(&self, code: &CurrencyCode, rate: Decimal) -> Result<Self, CurrencyError> {
        let index = *self
            .by_code
            .get(code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))?;

        let mut updated = self.clone();
        updated.currencies[index].exchange_rate = Some(ExchangeRate::new(rate));
        Ok(updated)
    }
}
