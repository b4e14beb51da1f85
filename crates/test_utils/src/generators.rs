//! Property-Based Test Generators
//!
//! Proptest strategies producing amounts, rates and movements that respect
//! the fixture registry.

use chrono::{Duration, NaiveDate};
use core_kernel::MoneyValue;
use domain_finance::{FinancialMovement, MovementDate, MovementKind};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::{money, TemporalFixtures};

/// Codes present in the standard fixture registry
pub fn fixture_code_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("ARS"), Just("USD"), Just("EUR")]
}

/// Amounts with two decimal places, either sign
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strictly positive rates with up to four decimal places
pub fn positive_rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64, 0u32..=4u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Money values in fixture currencies, some with a recorded rate
pub fn money_value_strategy() -> impl Strategy<Value = MoneyValue> {
    (amount_strategy(), fixture_code_strategy(), proptest::option::of(positive_rate_strategy())).prop_map(
        |(amount, currency, rate)| {
            let value = money(amount, currency);
            match rate {
                Some(rate) if currency != "ARS" => value.with_recorded_rate(core_kernel::ExchangeRate::new(rate)),
                _ => value,
            }
        },
    )
}

pub fn movement_kind_strategy() -> impl Strategy<Value = MovementKind> {
    prop_oneof![
        Just(MovementKind::Income),
        Just(MovementKind::Contribution),
        Just(MovementKind::Expense),
        Just(MovementKind::Withdrawal),
    ]
}

/// Dates within roughly two years before the fixture "today"
pub fn recent_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..730i64).prop_map(|days_back| TemporalFixtures::today() - Duration::days(days_back))
}

/// Movements in fixture currencies; about one in ten is undated
pub fn movement_strategy() -> impl Strategy<Value = FinancialMovement> {
    (
        movement_kind_strategy(),
        proptest::option::weighted(0.9, recent_date_strategy()),
        money_value_strategy(),
    )
        .prop_map(|(kind, date, value)| FinancialMovement::of_kind(kind, date.map(MovementDate::Day), value))
}
