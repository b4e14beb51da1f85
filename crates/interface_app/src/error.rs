//! Application error handling

use core_kernel::{PortError, TemporalError};
use domain_currency::CurrencyError;
use domain_finance::FinanceError;
use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Data source error: {0}")]
    DataSource(#[from] PortError),

    #[error(transparent)]
    Currency(#[from] CurrencyError),

    #[error(transparent)]
    Finance(#[from] FinanceError),

    #[error(transparent)]
    Temporal(#[from] TemporalError),

    #[error("No organization selected")]
    NoOrganization,
}

impl AppError {
    /// Returns true if retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::DataSource(err) if err.is_transient())
    }
}
