//! Locale-aware money formatting
//!
//! Produces the strings the presentation layer renders. Separators follow
//! the organization's locale; the number of decimal places comes from the
//! organization's preferences rather than from the currency.

use core_kernel::{CurrencyCode, Money};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use unic_langid::LanguageIdentifier;

use crate::conversion::DisplayMoney;
use crate::registry::CurrencyRegistry;

/// Digit grouping and decimal separators for a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub decimal_separator: char,
    pub group_separator: char,
}

impl NumberLocale {
    /// `1,234.56`
    pub const POINT: NumberLocale = NumberLocale {
        decimal_separator: '.',
        group_separator: ',',
    };

    /// `1.234,56`
    pub const COMMA: NumberLocale = NumberLocale {
        decimal_separator: ',',
        group_separator: '.',
    };

    /// `1 234,56`
    pub const SPACE_COMMA: NumberLocale = NumberLocale {
        decimal_separator: ',',
        group_separator: ' ',
    };

    /// `1'234.56`
    pub const SWISS: NumberLocale = NumberLocale {
        decimal_separator: '.',
        group_separator: '\'',
    };

    /// Resolves separators from a BCP 47 tag such as `es-AR` or `en_US`
    ///
    /// Unparsable or unknown tags fall back to [`NumberLocale::POINT`].
    pub fn from_tag(tag: &str) -> Self {
        let Ok(langid) = tag.trim().parse::<LanguageIdentifier>() else {
            return Self::POINT;
        };
        let region = langid.region.as_ref().map(|r| r.as_str());

        match (langid.language.as_str(), region) {
            ("es", Some("MX" | "US" | "PR" | "DO" | "GT" | "HN" | "NI" | "PA" | "SV")) => Self::POINT,
            ("de" | "it" | "fr", Some("CH")) => Self::SWISS,
            ("es" | "pt" | "de" | "it" | "nl" | "id" | "tr" | "da", _) => Self::COMMA,
            ("fr" | "ru" | "pl" | "cs" | "sv" | "nb" | "fi" | "uk", _) => Self::SPACE_COMMA,
            _ => Self::POINT,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::POINT
    }
}

/// A formatted amount with a hint for muted rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedAmount {
    pub text: String,
    pub currency: CurrencyCode,
    /// True when the amount could not be converted and should be muted
    pub muted: bool,
}

/// Formats amounts with an organization's locale and decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyFormatter {
    locale: NumberLocale,
    decimal_places: u32,
}

impl MoneyFormatter {
    pub fn new(locale: NumberLocale, decimal_places: u32) -> Self {
        Self {
            locale,
            decimal_places,
        }
    }

    /// Builds a formatter from a locale tag
    pub fn for_tag(tag: &str, decimal_places: u32) -> Self {
        Self::new(NumberLocale::from_tag(tag), decimal_places)
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Formats a bare number, e.g. `-1.234,56`
    pub fn format_amount(&self, amount: Decimal) -> String {
        let (negative, digits) = self.split_sign(amount);
        if negative {
            format!("-{digits}")
        } else {
            digits
        }
    }

    /// Formats an amount with a symbol, e.g. `-US$ 1,234.56`
    pub fn format(&self, amount: Decimal, symbol: &str) -> String {
        let (negative, digits) = self.split_sign(amount);
        let sign = if negative { "-" } else { "" };
        format!("{sign}{symbol} {digits}")
    }

    /// Formats money using the symbol from the registry, or the code when
    /// the currency is unknown
    pub fn format_money(&self, money: &Money, registry: &CurrencyRegistry) -> String {
        let symbol = registry
            .by_code(money.currency())
            .map(|c| c.symbol.as_str())
            .unwrap_or_else(|| money.currency().as_str());
        self.format(money.amount(), symbol)
    }

    /// Formats a display value and flags it for muted rendering when it
    /// could not be converted
    pub fn format_display(&self, value: &DisplayMoney, registry: &CurrencyRegistry) -> FormattedAmount {
        FormattedAmount {
            text: self.format_money(&value.money, registry),
            currency: value.money.currency().clone(),
            muted: !value.is_reliable(),
        }
    }

    fn split_sign(&self, amount: Decimal) -> (bool, String) {
        let rounded = amount.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let plain = format!("{:.*}", self.decimal_places as usize, rounded.abs());

        let (integer, fraction) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
        for (i, ch) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(self.locale.group_separator);
            }
            grouped.push(ch);
        }
        if let Some(fraction) = fraction {
            grouped.push(self.locale.decimal_separator);
            grouped.push_str(fraction);
        }
        (negative, grouped)
    }
}
