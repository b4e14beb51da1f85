//! Application configuration

use core_kernel::Timezone;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application configuration
///
/// Every field can be set from the environment with the `FINANCE_` prefix,
/// e.g. `FINANCE_TIMEZONE=Europe/Madrid` or `FINANCE_DAILY_BUCKETS=30`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Time zone used when the data source reports none for the organization
    pub timezone: Timezone,
    /// BCP 47 tag selecting number separators
    pub locale: String,
    /// Decimal places used when the organization has no preference stored
    #[validate(range(max = 8))]
    pub decimal_places: u32,
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
    pub log_format: LogFormat,
    /// Days shown by the daily dashboard chart
    #[validate(range(min = 1, max = 366))]
    pub daily_buckets: u32,
    /// Months shown by the monthly dashboard chart
    #[validate(range(min = 1, max = 120))]
    pub monthly_buckets: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone: Timezone::new(chrono_tz::America::Argentina::Buenos_Aires),
            locale: "es-AR".to_string(),
            decimal_places: 2,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            daily_buckets: 14,
            monthly_buckets: 12,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env` and the environment
    ///
    /// Missing variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable cannot be parsed or a value is out
    /// of range.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("FINANCE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.check()?;
        Ok(config)
    }

    /// Validates value ranges
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.timezone.to_string(), "America/Argentina/Buenos_Aires");
        assert_eq!(config.locale, "es-AR");
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.daily_buckets, 14);
        assert_eq!(config.monthly_buckets, 12);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let config = AppConfig {
            decimal_places: 9,
            ..AppConfig::default()
        };
        assert!(matches!(config.check(), Err(AppError::Validation(_))));

        let config = AppConfig {
            daily_buckets: 0,
            ..AppConfig::default()
        };
        assert!(config.check().is_err());
    }
}
