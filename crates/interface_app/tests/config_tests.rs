//! Configuration loading tests
//!
//! Kept in their own test binary because they mutate the process
//! environment.

use interface_app::{AppConfig, AppError, LogFormat};

#[test]
fn test_environment_overrides_and_validation() {
    std::env::set_var("FINANCE_TIMEZONE", "Europe/Madrid");
    std::env::set_var("FINANCE_DAILY_BUCKETS", "30");
    std::env::set_var("FINANCE_LOG_FORMAT", "json");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.timezone.to_string(), "Europe/Madrid");
    assert_eq!(config.daily_buckets, 30);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.monthly_buckets, 12);
    assert_eq!(config.locale, "es-AR");

    std::env::set_var("FINANCE_DECIMAL_PLACES", "12");
    assert!(matches!(AppConfig::from_env(), Err(AppError::Validation(_))));

    std::env::set_var("FINANCE_DECIMAL_PLACES", "2");
    std::env::set_var("FINANCE_TIMEZONE", "Mars/Olympus_Mons");
    assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));

    for key in [
        "FINANCE_TIMEZONE",
        "FINANCE_DAILY_BUCKETS",
        "FINANCE_LOG_FORMAT",
        "FINANCE_DECIMAL_PLACES",
    ] {
        std::env::remove_var(key);
    }
}
