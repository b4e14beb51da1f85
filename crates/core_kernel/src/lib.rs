//! Core Kernel - Foundational types for the finance core
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic and captured exchange rates
//! - Calendar types for time-zone aware bucketing of dated records
//! - Common identifiers and the data-source error type

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, MoneyValue, CurrencyCode, ExchangeRate, MoneyError, INTERNAL_SCALE};
pub use temporal::{Timezone, DateRange, Granularity, TemporalError};
pub use identifiers::{OrganizationId, ProjectId, CurrencyId, MovementId};
pub use ports::PortError;
