//! Finance Domain - Multi-currency Aggregation and Series
//!
//! This crate folds financial records expressed in heterogeneous currencies
//! into the numbers dashboards and tables show.
//!
//! # Sign convention
//!
//! Payments, costs, contributions and withdrawals are all treated as
//! [`FinancialMovement`]s. The sign is applied before any summation:
//! - Income and contributions are positive
//! - Expenses and withdrawals are negative
//!
//! # Components
//!
//! - [`rows`]: typed rows from the data-access layer and their validation
//! - [`Aggregator`]: per-currency breakdown plus a functional-currency total
//! - [`SeriesBuilder`]: daily or monthly buckets with optional running balance
//! - [`export`]: CSV output of breakdowns and series
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_finance::{rows, Aggregator, SeriesBuilder, SeriesRequest};
//!
//! let ingested = rows::ingest(&rows, &registry);
//! let breakdown = Aggregator::new(converter).aggregate_movements(&ingested.movements);
//!
//! let request = SeriesRequest::last_days(14, tz.today(), tz);
//! let series = SeriesBuilder::new(converter).build(&request, &ingested.movements)?;
//! ```

pub mod movement;
pub mod rows;
pub mod aggregate;
pub mod series;
pub mod export;
pub mod error;

pub use movement::{FinancialMovement, MovementDate, MovementKind, Sign};
pub use rows::{Ingested, MoneyRow, MovementRow, RejectedRow};
pub use aggregate::{Aggregator, Breakdown, BreakdownLine};
pub use series::{Series, SeriesBuilder, SeriesPoint, SeriesRequest};
pub use error::FinanceError;
