//! Organization currency preferences and display modes

use core_kernel::CurrencyId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CurrencyError;
use crate::registry::CurrencyRegistry;

/// Highest number of decimal places an organization may display
pub const MAX_DECIMAL_PLACES: u32 = 8;

/// How amounts are presented to the user
///
/// - `Mix`: every amount in its own currency
/// - `Primary`: everything converted to the functional currency
/// - `Secondary`: everything converted to the organization's secondary currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Mix,
    Primary,
    Secondary,
}

/// Currency settings stored per organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CurrencyPreferences {
    pub default_currency_id: CurrencyId,
    pub secondary_currency_id: Option<CurrencyId>,
    pub use_currency_exchange: bool,
    #[validate(range(max = 8))]
    pub decimal_places: u32,
}

impl CurrencyPreferences {
    /// Preferences matching a registry's functional currency, exchange on,
    /// two decimal places, no secondary currency
    pub fn for_registry(registry: &CurrencyRegistry) -> Self {
        Self {
            default_currency_id: registry.functional().id,
            secondary_currency_id: None,
            use_currency_exchange: true,
            decimal_places: 2,
        }
    }

    /// Sets the secondary currency
    pub fn with_secondary(mut self, id: CurrencyId) -> Self {
        self.secondary_currency_id = Some(id);
        self
    }

    /// Checks the preferences against the registry they will be used with
    ///
    /// # Errors
    ///
    /// Returns `InvalidPreferences` when the decimal places are out of range,
    /// the default currency is not the registry's functional currency, or the
    /// secondary currency is unknown or equal to the default.
    pub fn check(&self, registry: &CurrencyRegistry) -> Result<(), CurrencyError> {
        self.validate()
            .map_err(|e| CurrencyError::InvalidPreferences(e.to_string()))?;

        if self.default_currency_id != registry.functional().id {
            return Err(CurrencyError::InvalidPreferences(format!(
                "default currency {} is not the functional currency {}",
                self.default_currency_id,
                registry.functional().code
            )));
        }

        if let Some(secondary) = self.secondary_currency_id {
            if registry.get(&secondary).is_none() {
                return Err(CurrencyError::UnknownCurrency(secondary.to_string()));
            }
            if secondary == self.default_currency_id {
                return Err(CurrencyError::InvalidPreferences(
                    "secondary currency must differ from the default currency".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Resolves the mode actually used for a requested mode
    ///
    /// Organizations without currency exchange always see native amounts,
    /// and a secondary request without a secondary currency shows the
    /// functional currency.
    pub fn effective_mode(&self, requested: DisplayMode) -> DisplayMode {
        if !self.use_currency_exchange {
            return DisplayMode::Mix;
        }
        match requested {
            DisplayMode::Secondary if self.secondary_currency_id.is_none() => DisplayMode::Primary,
            other => other,
        }
    }
}
