//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! finance core test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built currencies, registries and dates
//! - `builders`: Builder patterns for movement rows and movements
//! - `assertions`: Custom assertion helpers for breakdowns and series
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
