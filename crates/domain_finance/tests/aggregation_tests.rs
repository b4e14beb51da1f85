//! Aggregation tests
//!
//! Covers the per-currency breakdown, the functional total, the sign
//! convention and degraded conversions.

use core_kernel::{CurrencyCode, ExchangeRate, Money, MoneyValue};
use domain_currency::{Currency, CurrencyConverter, CurrencyPreferences, CurrencyRegistry};
use domain_finance::{Aggregator, FinancialMovement, MovementKind, Sign};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

fn value(amount: Decimal, currency: &str) -> MoneyValue {
    MoneyValue::new(Money::new(amount, code(currency)))
}

fn registry() -> CurrencyRegistry {
    CurrencyRegistry::new(vec![
        Currency::from_catalog(code("ARS")).as_functional(),
        Currency::from_catalog(code("USD")).with_rate(dec!(1000)),
        Currency::from_catalog(code("EUR")).with_rate(dec!(0)),
    ])
    .unwrap()
}

mod breakdown {
    use super::*;

    #[test]
    fn test_usd_and_ars_scenario() {
        let registry = registry();
        let aggregator = Aggregator::new(CurrencyConverter::new(&registry));
        let values = vec![
            value(dec!(100), "USD").with_recorded_rate(ExchangeRate::new(dec!(1000))),
            value(dec!(50000), "ARS"),
        ];

        let breakdown = aggregator.aggregate(&values);

        assert_eq!(breakdown.total_in_functional, dec!(150000));
        let lines: Vec<(&str, Decimal, Decimal)> = breakdown
            .lines
            .iter()
            .map(|l| (l.currency.as_str(), l.native_amount, l.functional_amount))
            .collect();
        assert_eq!(
            lines,
            vec![("USD", dec!(100), dec!(100000)), ("ARS", dec!(50000), dec!(50000))]
        );
        assert!(breakdown.is_reliable());
    }

    #[test]
    fn test_functional_only_total_is_exact_sum() {
        let registry = registry();
        let aggregator = Aggregator::new(CurrencyConverter::new(&registry));
        let values = vec![
            value(dec!(0.1), "ARS"),
            value(dec!(0.2), "ARS"),
            value(dec!(0.3), "ARS"),
        ];

        let breakdown = aggregator.aggregate(&values);
        assert_eq!(breakdown.total_in_functional, dec!(0.6));
    }

    #[test]
    fn test_unconverted_value_is_flagged() {
        let registry = registry();
        let aggregator = Aggregator::new(CurrencyConverter::new(&registry));
        let values = vec![value(dec!(5), "EUR"), value(dec!(1), "USD")];

        let breakdown = aggregator.aggregate(&values);

        assert_eq!(breakdown.unconverted_count, 1);
        assert!(!breakdown.is_reliable());
        let eur = breakdown.line(&code("EUR")).unwrap();
        assert!(!eur.reliable);
        assert_eq!(eur.functional_amount, dec!(5));
        assert!(breakdown.line(&code("USD")).unwrap().reliable);
        assert_eq!(breakdown.total_in_functional, dec!(1005));
    }

    #[test]
    fn test_negative_lines_sort_last() {
        let registry = registry();
        let aggregator = Aggregator::new(CurrencyConverter::new(&registry));
        let values = vec![value(dec!(-3), "USD"), value(dec!(10), "ARS")];

        let breakdown = aggregator.aggregate(&values);
        assert_eq!(breakdown.lines[0].currency, code("ARS"));
        assert_eq!(breakdown.lines[1].currency, code("USD"));
    }
}

mod movements {
    use super::*;

    #[test]
    fn test_sign_convention_applied_before_summing() {
        let registry = registry();
        let aggregator = Aggregator::new(CurrencyConverter::new(&registry));
        let movements = vec![
            FinancialMovement::of_kind(MovementKind::Income, None, value(dec!(1000), "ARS")),
            FinancialMovement::of_kind(MovementKind::Contribution, None, value(dec!(1), "USD")),
            FinancialMovement::of_kind(MovementKind::Expense, None, value(dec!(300), "ARS")),
            FinancialMovement::of_kind(MovementKind::Withdrawal, None, value(dec!(200), "ARS")),
        ];

        let breakdown = aggregator.aggregate_movements(&movements);

        assert_eq!(breakdown.total_in_functional, dec!(1500));
        assert_eq!(breakdown.line(&code("ARS")).unwrap().native_amount, dec!(500));
    }

    #[test]
    fn test_explicit_negative_sign() {
        let registry = registry();
        let aggregator = Aggregator::new(CurrencyConverter::new(&registry));
        let movements = vec![FinancialMovement::new(None, value(dec!(2), "USD"), Sign::Negative)];

        let breakdown = aggregator.aggregate_movements(&movements);
        assert_eq!(breakdown.total_in_functional, dec!(-2000));
    }

    #[test]
    fn test_exchange_disabled_keeps_native_amounts() {
        let registry = registry();
        let mut prefs = CurrencyPreferences::for_registry(&registry);
        prefs.use_currency_exchange = false;
        let converter = CurrencyConverter::with_preferences(&registry, &prefs).unwrap();
        let movements = vec![FinancialMovement::of_kind(MovementKind::Income, None, value(dec!(2), "USD"))];

        let breakdown = Aggregator::new(converter).aggregate_movements(&movements);
        assert_eq!(breakdown.total_in_functional, dec!(2));
        assert_eq!(breakdown.unconverted_count, 1);
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn functional_only_total_equals_sum(amounts in proptest::collection::vec(-10_000_000i64..10_000_000i64, 0..50)) {
            let registry = registry();
            let aggregator = Aggregator::new(CurrencyConverter::new(&registry));
            let values: Vec<MoneyValue> = amounts
                .iter()
                .map(|minor| value(Decimal::new(*minor, 2), "ARS"))
                .collect();

            let breakdown = aggregator.aggregate(&values);
            let expected: Decimal = amounts.iter().map(|minor| Decimal::new(*minor, 2)).sum();

            prop_assert_eq!(breakdown.total_in_functional, expected);
            prop_assert!(breakdown.lines.len() <= 1);
        }

        #[test]
        fn lines_are_ordered(amounts in proptest::collection::vec((-1_000_000i64..1_000_000i64, 0usize..2usize), 0..30)) {
            let registry = registry();
            let aggregator = Aggregator::new(CurrencyConverter::new(&registry));
            let values: Vec<MoneyValue> = amounts
                .iter()
                .map(|(minor, which)| value(Decimal::new(*minor, 2), ["ARS", "USD"][*which]))
                .collect();

            let breakdown = aggregator.aggregate(&values);
            for pair in breakdown.lines.windows(2) {
                prop_assert!(
                    pair[0].functional_amount > pair[1].functional_amount
                        || (pair[0].functional_amount == pair[1].functional_amount
                            && pair[0].currency < pair[1].currency)
                );
            }
        }
    }
}
