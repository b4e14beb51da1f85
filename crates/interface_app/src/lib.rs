//! Application Layer
//!
//! Wires the currency and finance domains into what a page needs.
//!
//! # Architecture
//!
//! - **Config**: environment-driven settings with validated ranges
//! - **Telemetry**: tracing subscriber setup
//! - **Session**: caller-owned selections (organization, project, theme, display mode)
//! - **Display**: formatting, breakdown rendering and series per organization
//! - **Dashboard**: data-source port and the concurrent dashboard loader

pub mod config;
pub mod telemetry;
pub mod session;
pub mod display;
pub mod dashboard;
pub mod error;

pub use config::{AppConfig, LogFormat};
pub use telemetry::init_tracing;
pub use session::{LayoutMode, SessionContext, Theme};
pub use display::{BreakdownView, MoneyDisplayService, OrganizationFinance};
pub use dashboard::{Dashboard, DashboardLoader, Diagnostics, FinanceDataSource, InMemoryDataSource};
pub use error::AppError;
