//! Tests for the conversion engine bound to an organization's registry
//!
//! Covers recorded versus live rates, display modes, degraded conversions
//! and formatting of the results.

use core_kernel::{CurrencyCode, ExchangeRate, Money, MoneyValue};
use domain_currency::{
    ConversionStatus, Currency, CurrencyConverter, CurrencyPreferences, CurrencyRegistry,
    DisplayMode, MoneyFormatter, UnconvertedReason,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

fn value(amount: Decimal, currency: &str) -> MoneyValue {
    MoneyValue::new(Money::new(amount, code(currency)))
}

/// ARS functional, USD at 1000, EUR at 1100, BRL without a rate, CLP at zero
fn registry() -> CurrencyRegistry {
    CurrencyRegistry::new(vec![
        Currency::from_catalog(code("ARS")).as_functional(),
        Currency::from_catalog(code("USD")).with_rate(dec!(1000)),
        Currency::from_catalog(code("EUR")).with_rate(dec!(1100)),
        Currency::from_catalog(code("BRL")),
        Currency::from_catalog(code("CLP")).with_rate(dec!(0)),
    ])
    .unwrap()
}

mod to_functional {
    use super::*;

    #[test]
    fn test_live_rate() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);

        let result = converter.to_functional(&value(dec!(100), "USD"));
        assert_eq!(result.amount, dec!(100000));
        assert!(result.is_reliable());
    }

    #[test]
    fn test_recorded_rate_beats_live_rate() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);
        let historical = value(dec!(100), "USD").with_recorded_rate(ExchangeRate::new(dec!(350)));

        assert_eq!(converter.to_functional(&historical).amount, dec!(35000));
    }

    #[test]
    fn test_refreshing_live_rate_leaves_recorded_values_stable() {
        let registry = registry();
        let refreshed = registry.with_rate(&code("USD"), dec!(1500)).unwrap();
        let historical = value(dec!(10), "USD").with_recorded_rate(ExchangeRate::new(dec!(900)));
        let live = value(dec!(10), "USD");

        let before = CurrencyConverter::new(&registry);
        let after = CurrencyConverter::new(&refreshed);

        assert_eq!(before.to_functional(&historical), after.to_functional(&historical));
        assert_eq!(after.to_functional(&live).amount, dec!(15000));
    }

    #[test]
    fn test_zero_rate_without_override_is_unconverted() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);

        let result = converter.to_functional(&value(dec!(5000), "CLP"));
        assert_eq!(result.amount, dec!(5000));
        assert_eq!(
            result.status,
            ConversionStatus::Unconverted { reason: UnconvertedReason::NonPositiveRate }
        );
    }

    #[test]
    fn test_missing_rate_is_unconverted() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);

        let result = converter.to_functional(&value(dec!(20), "BRL"));
        assert_eq!(
            result.status,
            ConversionStatus::Unconverted { reason: UnconvertedReason::MissingRate }
        );
    }

    #[test]
    fn test_unknown_currency_is_unconverted() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);

        let result = converter.to_functional(&value(dec!(7), "JPY"));
        assert_eq!(result.amount, dec!(7));
        assert_eq!(
            result.status,
            ConversionStatus::Unconverted { reason: UnconvertedReason::UnknownCurrency }
        );
    }

    #[test]
    fn test_exchange_disabled() {
        let registry = registry();
        let mut prefs = CurrencyPreferences::for_registry(&registry);
        prefs.use_currency_exchange = false;
        let converter = CurrencyConverter::with_preferences(&registry, &prefs).unwrap();

        let foreign = converter.to_functional(&value(dec!(1), "USD"));
        assert_eq!(
            foreign.status,
            ConversionStatus::Unconverted { reason: UnconvertedReason::ExchangeDisabled }
        );

        let native = converter.to_functional(&value(dec!(1), "ARS"));
        assert_eq!(native.status, ConversionStatus::Identity);
    }
}

mod display {
    use super::*;

    fn prefs_with_usd_secondary(registry: &CurrencyRegistry) -> CurrencyPreferences {
        let usd = registry.lookup("USD").unwrap().id;
        CurrencyPreferences::for_registry(registry).with_secondary(usd)
    }

    #[test]
    fn test_mix_keeps_native_currency() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);

        let shown = converter.to_display(&value(dec!(12), "EUR"), DisplayMode::Mix);
        assert_eq!(shown.money, Money::new(dec!(12), code("EUR")));
        assert!(shown.is_reliable());
    }

    #[test]
    fn test_primary_converts_to_functional() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);

        let shown = converter.to_display(&value(dec!(2), "EUR"), DisplayMode::Primary);
        assert_eq!(shown.money, Money::new(dec!(2200), code("ARS")));
    }

    #[test]
    fn test_secondary_goes_through_functional() {
        let registry = registry();
        let prefs = prefs_with_usd_secondary(&registry);
        let converter = CurrencyConverter::with_preferences(&registry, &prefs).unwrap();

        let shown = converter.to_display(&value(dec!(10), "EUR"), DisplayMode::Secondary);
        assert_eq!(shown.money, Money::new(dec!(11), code("USD")));
        assert!(shown.is_reliable());
    }

    #[test]
    fn test_secondary_same_currency_is_identity() {
        let registry = registry();
        let prefs = prefs_with_usd_secondary(&registry);
        let converter = CurrencyConverter::with_preferences(&registry, &prefs).unwrap();

        let shown = converter.to_display(&value(dec!(10), "USD"), DisplayMode::Secondary);
        assert_eq!(shown.money, Money::new(dec!(10), code("USD")));
        assert_eq!(shown.status, ConversionStatus::Identity);
    }

    #[test]
    fn test_secondary_without_configuration_falls_back_to_primary() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);

        let shown = converter.to_display(&value(dec!(1), "USD"), DisplayMode::Secondary);
        assert_eq!(shown.money, Money::new(dec!(1000), code("ARS")));
    }

    #[test]
    fn test_secondary_with_unconvertible_source_stays_native() {
        let registry = registry();
        let prefs = prefs_with_usd_secondary(&registry);
        let converter = CurrencyConverter::with_preferences(&registry, &prefs).unwrap();

        let shown = converter.to_display(&value(dec!(40), "BRL"), DisplayMode::Secondary);
        assert_eq!(shown.money, Money::new(dec!(40), code("BRL")));
        assert!(!shown.is_reliable());
    }

    #[test]
    fn test_functional_total_in_secondary() {
        let registry = registry();
        let prefs = prefs_with_usd_secondary(&registry);
        let converter = CurrencyConverter::with_preferences(&registry, &prefs).unwrap();

        let shown = converter.functional_to_display(dec!(150000), DisplayMode::Secondary);
        assert_eq!(shown.money, Money::new(dec!(150), code("USD")));
    }

    #[test]
    fn test_formatting_marks_unconverted_as_muted() {
        let registry = registry();
        let converter = CurrencyConverter::new(&registry);
        let formatter = MoneyFormatter::for_tag("es-AR", 2);

        let good = converter.to_display(&value(dec!(1.5), "USD"), DisplayMode::Primary);
        let bad = converter.to_display(&value(dec!(3), "CLP"), DisplayMode::Primary);

        let good = formatter.format_display(&good, &registry);
        let bad = formatter.format_display(&bad, &registry);

        assert_eq!(good.text, "$ 1.500,00");
        assert!(!good.muted);
        assert_eq!(bad.text, "CLP$ 3,00");
        assert!(bad.muted);
    }
}
