//! Finance domain errors

use core_kernel::{MoneyError, TemporalError};
use domain_currency::CurrencyError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the finance domain
///
/// Display paths (aggregation, bucketing) degrade instead of returning
/// these; they come from row validation, invalid requests and export I/O.
#[derive(Debug, Error)]
pub enum FinanceError {
    /// The row references a currency the organization does not have
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// The row carries neither a currency id nor a code
    #[error("Row has no currency")]
    MissingCurrency,

    /// The explicit sign is not +1 or -1
    #[error("Invalid sign: {0}")]
    InvalidSign(Decimal),

    /// The movement type does not map to a sign
    #[error("Unknown movement type: {0}")]
    UnknownMovementType(String),

    /// Neither a sign nor a movement type is present
    #[error("Row has neither a sign nor a movement type")]
    MissingSign,

    /// Money error
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Currency reference data error
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Invalid series request
    #[error(transparent)]
    Temporal(#[from] TemporalError),

    /// CSV encoding error
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Writer error
    #[error("Export I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
