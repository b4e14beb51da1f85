//! Pre-built Test Fixtures
//!
//! Ready-to-use currencies, registries and dates. An Argentine organization
//! keeps its books in ARS with USD and EUR as foreign currencies, which is
//! the shape most tests need.

use chrono::NaiveDate;
use core_kernel::{CurrencyCode, CurrencyId, Money, MoneyValue, OrganizationId, Timezone};
use domain_currency::{Currency, CurrencyPreferences, CurrencyRegistry};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Parses a currency code, panicking on invalid input
pub fn code(raw: &str) -> CurrencyCode {
    CurrencyCode::new(raw).unwrap()
}

/// Creates a money value without a recorded rate
pub fn money(amount: Decimal, currency: &str) -> MoneyValue {
    MoneyValue::new(Money::new(amount, code(currency)))
}

/// Fixture for currency reference data
pub struct CurrencyFixtures;

impl CurrencyFixtures {
    /// Functional Argentine peso
    pub fn ars() -> Currency {
        Currency::from_catalog(code("ARS"))
            .as_functional()
            .with_id(IdFixtures::ars_id())
    }

    /// US dollar at 1000 ARS
    pub fn usd() -> Currency {
        Currency::from_catalog(code("USD"))
            .with_rate(dec!(1000))
            .with_id(IdFixtures::usd_id())
    }

    /// Euro at 1100 ARS
    pub fn eur() -> Currency {
        Currency::from_catalog(code("EUR"))
            .with_rate(dec!(1100))
            .with_id(IdFixtures::eur_id())
    }

    /// Brazilian real with no rate configured
    pub fn brl_without_rate() -> Currency {
        Currency::from_catalog(code("BRL")).with_id(IdFixtures::brl_id())
    }

    /// Chilean peso with a zero rate
    pub fn clp_zero_rate() -> Currency {
        Currency::from_catalog(code("CLP")).with_rate(Decimal::ZERO)
    }

    /// ARS functional with USD and EUR
    pub fn standard() -> Vec<Currency> {
        vec![Self::ars(), Self::usd(), Self::eur()]
    }

    /// Standard currencies plus ones that cannot be converted
    pub fn with_broken_rates() -> Vec<Currency> {
        let mut currencies = Self::standard();
        currencies.push(Self::brl_without_rate());
        currencies.push(Self::clp_zero_rate());
        currencies
    }
}

/// Fixture for registries and preferences
pub struct RegistryFixtures;

impl RegistryFixtures {
    pub fn standard() -> CurrencyRegistry {
        CurrencyRegistry::new(CurrencyFixtures::standard()).unwrap()
    }

    pub fn with_broken_rates() -> CurrencyRegistry {
        CurrencyRegistry::new(CurrencyFixtures::with_broken_rates()).unwrap()
    }

    /// Default preferences for a registry
    pub fn preferences(registry: &CurrencyRegistry) -> CurrencyPreferences {
        CurrencyPreferences::for_registry(registry)
    }

    /// Preferences with USD as the secondary currency
    pub fn preferences_with_usd(registry: &CurrencyRegistry) -> CurrencyPreferences {
        CurrencyPreferences::for_registry(registry).with_secondary(IdFixtures::usd_id())
    }
}

/// Fixture for calendar data
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn buenos_aires() -> Timezone {
        Timezone::new(chrono_tz::America::Argentina::Buenos_Aires)
    }

    /// The "today" most dashboard tests anchor on (March 14, 2024)
    pub fn today() -> NaiveDate {
        Self::date(2024, 3, 14)
    }

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// Fixture for stable identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn organization_id() -> OrganizationId {
        OrganizationId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001))
    }

    pub fn ars_id() -> CurrencyId {
        CurrencyId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0a85))
    }

    pub fn usd_id() -> CurrencyId {
        CurrencyId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0d5d))
    }

    pub fn eur_id() -> CurrencyId {
        CurrencyId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0e02))
    }

    pub fn brl_id() -> CurrencyId {
        CurrencyId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0b21))
    }
}
