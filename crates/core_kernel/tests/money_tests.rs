//! Unit tests for the Money module
//!
//! Tests cover currency codes, money creation, arithmetic, rounding,
//! exchange rates and recorded-rate money values.

use core_kernel::{CurrencyCode, ExchangeRate, Money, MoneyError, MoneyValue};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

mod currency_code {
    use super::*;

    #[test]
    fn test_lowercase_is_uppercased() {
        assert_eq!(code("usd").as_str(), "USD");
    }

    #[test]
    fn test_codes_order_alphabetically() {
        let mut codes = vec![code("USD"), code("ARS"), code("EUR")];
        codes.sort();
        assert_eq!(codes, vec![code("ARS"), code("EUR"), code("USD")]);
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let json = serde_json::to_string(&code("brl")).unwrap();
        assert_eq!(json, "\"BRL\"");
        let back: CurrencyCode = serde_json::from_str("\"clp\"").unwrap();
        assert_eq!(back, code("CLP"));
    }

    #[test]
    fn test_serde_rejects_invalid_code() {
        let result: Result<CurrencyCode, _> = serde_json::from_str("\"$$\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_whitespace_only_is_invalid() {
        assert!(matches!(
            CurrencyCode::new("   "),
            Err(MoneyError::InvalidCurrencyCode(_))
        ));
    }
}

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), code("USD"));
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_minor_respects_digits() {
        assert_eq!(Money::from_minor(10050, 2, code("USD")).amount(), dec!(100.50));
        assert_eq!(Money::from_minor(10000, 0, code("JPY")).amount(), dec!(10000));
    }

    #[test]
    fn test_zero() {
        let m = Money::zero(code("EUR"));
        assert!(m.is_zero());
        assert!(!m.is_positive());
        assert!(!m.is_negative());
    }

    #[test]
    fn test_display() {
        let m = Money::new(dec!(1500.50), code("ARS"));
        assert_eq!(m.to_string(), "ARS 1500.5");
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::new(dec!(30.00), code("USD"));
        let b = Money::new(dec!(100.00), code("USD"));
        let result = a.checked_sub(&b).unwrap();
        assert_eq!(result.amount(), dec!(-70.00));
        assert!(result.is_negative());
    }

    #[test]
    fn test_checked_sub_currency_mismatch() {
        let a = Money::new(dec!(100.00), code("USD"));
        let b = Money::new(dec!(1.00), code("ARS"));
        assert_eq!(
            a.checked_sub(&b),
            Err(MoneyError::CurrencyMismatch("USD".to_string(), "ARS".to_string()))
        );
    }

    #[test]
    fn test_negation() {
        let m = Money::new(dec!(100.00), code("USD"));
        assert_eq!((-m).amount(), dec!(-100.00));
    }

    #[test]
    fn test_multiply_by_rate() {
        let m = Money::new(dec!(100), code("USD"));
        assert_eq!(m.multiply(dec!(1000)).unwrap().amount(), dec!(100000));
    }

    #[test]
    fn test_multiply_overflow_is_reported() {
        let m = Money::new(Decimal::MAX, code("USD"));
        assert_eq!(m.multiply(dec!(2)), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_divide_by_zero_error() {
        let m = Money::new(dec!(100.00), code("USD"));
        assert!(matches!(m.divide(dec!(0)), Err(MoneyError::DivisionByZero)));
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_dp() {
        let m = Money::new(dec!(100.125), code("USD"));
        assert_eq!(m.round_dp(2).amount(), dec!(100.13));
    }

    #[test]
    fn test_round_dp_negative_midpoint_goes_away_from_zero() {
        let m = Money::new(dec!(-100.125), code("USD"));
        assert_eq!(m.round_dp(2).amount(), dec!(-100.13));
        assert_eq!(m.round_bankers(2).amount(), dec!(-100.12));
    }

    #[test]
    fn test_round_bankers_even() {
        let m = Money::new(dec!(100.125), code("USD"));
        assert_eq!(m.round_bankers(2).amount(), dec!(100.12));
    }

    #[test]
    fn test_round_bankers_odd_rounds_up() {
        let m = Money::new(dec!(100.135), code("USD"));
        assert_eq!(m.round_bankers(2).amount(), dec!(100.14));
    }
}

mod exchange_rate {
    use super::*;

    #[test]
    fn test_usable_only_when_positive() {
        assert!(ExchangeRate::new(dec!(0.0001)).is_usable());
        assert!(!ExchangeRate::new(dec!(0)).is_usable());
        assert!(!ExchangeRate::new(dec!(-5)).is_usable());
    }

    #[test]
    fn test_transparent_serde() {
        let rate: ExchangeRate = serde_json::from_str("\"1050.25\"").unwrap();
        assert_eq!(rate.value(), dec!(1050.25));
    }
}

mod money_value {
    use super::*;

    #[test]
    fn test_from_money_has_no_recorded_rate() {
        let value: MoneyValue = Money::new(dec!(10), code("USD")).into();
        assert!(value.recorded_rate.is_none());
        assert_eq!(value.amount(), dec!(10));
        assert_eq!(value.currency(), &code("USD"));
    }
}
