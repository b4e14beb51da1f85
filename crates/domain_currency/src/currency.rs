//! Currency reference data

use core_kernel::{CurrencyCode, CurrencyId, ExchangeRate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Static metadata for a well-known ISO 4217 currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub minor_digits: u32,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { code: "ARS", name: "Argentine Peso", symbol: "$", minor_digits: 2 },
    CatalogEntry { code: "USD", name: "US Dollar", symbol: "US$", minor_digits: 2 },
    CatalogEntry { code: "EUR", name: "Euro", symbol: "€", minor_digits: 2 },
    CatalogEntry { code: "GBP", name: "Pound Sterling", symbol: "£", minor_digits: 2 },
    CatalogEntry { code: "BRL", name: "Brazilian Real", symbol: "R$", minor_digits: 2 },
    CatalogEntry { code: "CLP", name: "Chilean Peso", symbol: "CLP$", minor_digits: 0 },
    CatalogEntry { code: "MXN", name: "Mexican Peso", symbol: "MX$", minor_digits: 2 },
    CatalogEntry { code: "UYU", name: "Uruguayan Peso", symbol: "$U", minor_digits: 2 },
    CatalogEntry { code: "COP", name: "Colombian Peso", symbol: "COL$", minor_digits: 2 },
    CatalogEntry { code: "PEN", name: "Peruvian Sol", symbol: "S/", minor_digits: 2 },
    CatalogEntry { code: "JPY", name: "Yen", symbol: "¥", minor_digits: 0 },
    CatalogEntry { code: "CHF", name: "Swiss Franc", symbol: "CHF", minor_digits: 2 },
    CatalogEntry { code: "CAD", name: "Canadian Dollar", symbol: "C$", minor_digits: 2 },
    CatalogEntry { code: "AUD", name: "Australian Dollar", symbol: "A$", minor_digits: 2 },
];

/// Looks up a currency in the built-in catalog
pub fn catalog_entry(code: &CurrencyCode) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.code == code.as_str())
}

/// A currency as configured by an organization
///
/// `exchange_rate` is the live rate in functional units per one unit of
/// this currency. The functional currency itself needs no rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    pub code: CurrencyCode,
    pub name: String,
    pub symbol: String,
    pub minor_digits: u32,
    pub is_default: bool,
    pub exchange_rate: Option<ExchangeRate>,
}

impl Currency {
    /// Creates a non-default currency without a rate
    pub fn new(code: CurrencyCode, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: CurrencyId::new_v7(),
            code,
            name: name.into(),
            symbol: symbol.into(),
            minor_digits: 2,
            is_default: false,
            exchange_rate: None,
        }
    }

    /// Creates a currency from the built-in catalog
    ///
    /// Codes missing from the catalog use the code itself as name and symbol.
    pub fn from_catalog(code: CurrencyCode) -> Self {
        match catalog_entry(&code) {
            Some(entry) => {
                let mut currency = Self::new(code, entry.name, entry.symbol);
                currency.minor_digits = entry.minor_digits;
                currency
            }
            None => {
                let label = code.to_string();
                Self::new(code, label.clone(), label)
            }
        }
    }

    /// Marks this currency as the organization's functional currency
    pub fn as_functional(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Sets the live exchange rate
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(ExchangeRate::new(rate));
        self
    }

    /// Replaces the generated id with the one stored by the data layer
    pub fn with_id(mut self, id: CurrencyId) -> Self {
        self.id = id;
        self
    }
}
