//! Currency domain errors

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors raised while building currency reference data
///
/// Conversions never return these; they degrade instead.
#[derive(Debug, Error, PartialEq)]
pub enum CurrencyError {
    /// The registry was built from an empty list
    #[error("Currency list is empty")]
    Empty,

    /// No currency is marked as the functional currency
    #[error("No functional currency configured")]
    NoFunctionalCurrency,

    /// More than one currency is marked as the functional currency
    #[error("Multiple functional currencies configured: {0:?}")]
    MultipleFunctional(Vec<String>),

    /// Two currencies share a code
    #[error("Duplicate currency code: {0}")]
    DuplicateCode(String),

    /// Two currencies share an id
    #[error("Duplicate currency id: {0}")]
    DuplicateId(String),

    /// A referenced currency is not in the registry
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Organization preferences are inconsistent
    #[error("Invalid currency preferences: {0}")]
    InvalidPreferences(String),

    /// Invalid money input
    #[error(transparent)]
    Money(#[from] MoneyError),
}
