//! Currency Domain - Registry, Conversion and Display
//!
//! This crate owns everything needed to turn an amount recorded in any of an
//! organization's currencies into something a page can show.
//!
//! # Rates
//!
//! Every non-functional currency carries a rate expressed as functional
//! units per one unit of that currency. Converting to the functional
//! currency multiplies; converting back divides.
//!
//! # Degraded conversions
//!
//! A missing rate, a zero or negative rate, an unknown currency code or a
//! disabled exchange never fail a conversion. The amount comes back
//! unconverted together with an [`UnconvertedReason`] so the UI can mute it.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_currency::{CurrencyConverter, CurrencyRegistry, DisplayMode};
//!
//! let registry = CurrencyRegistry::new(currencies)?;
//! let converter = CurrencyConverter::new(&registry);
//!
//! let shown = converter.to_display(&value, DisplayMode::Primary);
//! if !shown.is_reliable() {
//!     // render muted
//! }
//! ```

pub mod currency;
pub mod registry;
pub mod conversion;
pub mod preferences;
pub mod format;
pub mod error;

pub use currency::{Currency, CatalogEntry, catalog_entry};
pub use registry::CurrencyRegistry;
pub use conversion::{
    convert_to_functional, convert_from_functional, Conversion, ConversionStatus,
    CurrencyConverter, DisplayMoney, UnconvertedReason,
};
pub use preferences::{CurrencyPreferences, DisplayMode};
pub use format::{FormattedAmount, MoneyFormatter, NumberLocale};
pub use error::CurrencyError;
