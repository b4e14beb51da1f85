//! Dashboard loading
//!
//! The finance core performs no I/O. Rows come from a [`FinanceDataSource`]
//! supplied by the caller; [`DashboardLoader`] issues the independent reads
//! concurrently, waits for all of them, then derives everything the
//! dashboard shows in one synchronous pass.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_app::{AppConfig, DashboardLoader, SessionContext};
//! use std::sync::Arc;
//!
//! let loader = DashboardLoader::new(Arc::new(source), AppConfig::from_env()?);
//! let dashboard = loader.load(&session).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use core_kernel::{OrganizationId, PortError, ProjectId, Timezone};
use domain_currency::{Currency, CurrencyPreferences, CurrencyRegistry, DisplayMode};
use domain_finance::{rows, Breakdown, MovementRow, Series};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::display::{BreakdownView, MoneyDisplayService, OrganizationFinance};
use crate::error::AppError;
use crate::session::SessionContext;

/// Read access to one organization's financial rows
///
/// Implementations are expected to enforce tenant isolation; the loader
/// only ever asks for the organization in the session.
#[async_trait]
pub trait FinanceDataSource: Send + Sync {
    /// The organization's currencies, exactly one of them functional
    async fn currencies(&self, organization_id: OrganizationId) -> Result<Vec<Currency>, PortError>;

    /// The organization's stored currency preferences
    async fn preferences(&self, organization_id: OrganizationId) -> Result<CurrencyPreferences, PortError>;

    /// The organization's own time zone, None to use the configured default
    async fn timezone(&self, _organization_id: OrganizationId) -> Result<Option<Timezone>, PortError> {
        Ok(None)
    }

    /// Movement rows, limited to one project when given
    async fn movements(
        &self,
        organization_id: OrganizationId,
        project_id: Option<ProjectId>,
    ) -> Result<Vec<MovementRow>, PortError>;
}

/// Counts of rows that did not make it into the numbers unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub rows_read: usize,
    /// Rows with an unresolvable currency or sign
    pub rows_rejected: usize,
    /// Movements without a usable date, left out of the charts
    pub undated: usize,
    /// Movements whose amount could not be converted
    pub unconverted: usize,
}

/// Everything the finance dashboard renders
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub organization_id: OrganizationId,
    pub project_id: Option<ProjectId>,
    /// Zone the series were bucketed in
    pub timezone: Timezone,
    pub today: NaiveDate,
    pub breakdown: Breakdown,
    pub summary: BreakdownView,
    pub daily: Series,
    pub monthly: Series,
    pub diagnostics: Diagnostics,
}

impl Dashboard {
    /// The effective display mode the summary was rendered in
    pub fn mode(&self) -> DisplayMode {
        self.summary.mode
    }
}

/// Loads and derives dashboards through a data source
#[derive(Clone)]
pub struct DashboardLoader {
    source: Arc<dyn FinanceDataSource>,
    config: AppConfig,
}

impl DashboardLoader {
    pub fn new(source: Arc<dyn FinanceDataSource>, config: AppConfig) -> Self {
        Self { source, config }
    }

    /// Loads the dashboard for the session's organization and project as
    /// of today in the organization's time zone
    ///
    /// # Errors
    ///
    /// Same as [`DashboardLoader::load_at`].
    pub async fn load(&self, session: &SessionContext) -> Result<Dashboard, AppError> {
        self.derive(session, None).await
    }

    /// Loads the dashboard as of a given local date
    ///
    /// # Errors
    ///
    /// Fails when any read fails, when the currencies violate the registry
    /// invariants, or when the stored preferences do not match them. Bad
    /// rows never fail the load; they are counted in the diagnostics.
    pub async fn load_at(&self, session: &SessionContext, today: NaiveDate) -> Result<Dashboard, AppError> {
        self.derive(session, Some(today)).await
    }

    #[instrument(skip(self, session), fields(organization_id = ?session.organization_id(), project_id = ?session.project_id()))]
    async fn derive(&self, session: &SessionContext, today: Option<NaiveDate>) -> Result<Dashboard, AppError> {
        let organization_id = session.require_organization()?;
        let project_id = session.project_id();

        let (currencies, preferences, own_timezone, movement_rows) = tokio::try_join!(
            self.source.currencies(organization_id),
            self.source.preferences(organization_id),
            self.source.timezone(organization_id),
            self.source.movements(organization_id, project_id),
        )?;
        let timezone = own_timezone.unwrap_or(self.config.timezone);
        let today = today.unwrap_or_else(|| timezone.today());
        debug!(
            currencies = currencies.len(),
            rows = movement_rows.len(),
            %timezone,
            "finance rows loaded"
        );

        let registry = CurrencyRegistry::new(currencies)?;
        let finance = OrganizationFinance::new(registry, preferences, timezone, &self.config.locale)?;
        let service = MoneyDisplayService::new(finance);

        let ingested = rows::ingest(&movement_rows, service.finance().registry());
        if !ingested.rejected.is_empty() {
            warn!(rejected = ingested.rejected.len(), "movement rows rejected");
        }

        let breakdown = service.movement_breakdown(&ingested.movements);
        let summary = service.render_breakdown(&breakdown, session.display_mode);
        let daily = service.series(
            &service.daily_request(self.config.daily_buckets, today),
            &ingested.movements,
        )?;
        let monthly = service.series(
            &service.monthly_request(self.config.monthly_buckets, today),
            &ingested.movements,
        )?;

        let diagnostics = Diagnostics {
            rows_read: movement_rows.len(),
            rows_rejected: ingested.rejected.len(),
            undated: ingested.undated(),
            unconverted: breakdown.unconverted_count,
        };
        info!(
            total = %breakdown.total_in_functional,
            lines = breakdown.lines.len(),
            "dashboard computed"
        );

        Ok(Dashboard {
            organization_id,
            project_id,
            timezone,
            today,
            breakdown,
            summary,
            daily,
            monthly,
            diagnostics,
        })
    }
}

#[derive(Debug, Clone)]
struct OrganizationRows {
    currencies: Vec<Currency>,
    preferences: CurrencyPreferences,
    timezone: Option<Timezone>,
    movements: Vec<(Option<ProjectId>, MovementRow)>,
}

/// In-memory data source for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryDataSource {
    organizations: RwLock<HashMap<OrganizationId, OrganizationRows>>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an organization, replacing any previous data for it
    pub async fn seed_organization(
        &self,
        organization_id: OrganizationId,
        currencies: Vec<Currency>,
        preferences: CurrencyPreferences,
    ) {
        self.organizations.write().await.insert(
            organization_id,
            OrganizationRows {
                currencies,
                preferences,
                timezone: None,
                movements: Vec::new(),
            },
        );
    }

    /// Gives an organization its own time zone
    pub async fn set_timezone(&self, organization_id: OrganizationId, timezone: Timezone) -> Result<(), PortError> {
        let mut organizations = self.organizations.write().await;
        let organization = organizations
            .get_mut(&organization_id)
            .ok_or_else(|| PortError::not_found("Organization", organization_id))?;
        organization.timezone = Some(timezone);
        Ok(())
    }

    /// Appends movement rows to an organization
    pub async fn add_movements(
        &self,
        organization_id: OrganizationId,
        project_id: Option<ProjectId>,
        rows: Vec<MovementRow>,
    ) -> Result<(), PortError> {
        let mut organizations = self.organizations.write().await;
        let organization = organizations
            .get_mut(&organization_id)
            .ok_or_else(|| PortError::not_found("Organization", organization_id))?;
        organization
            .movements
            .extend(rows.into_iter().map(|row| (project_id, row)));
        Ok(())
    }
}

#[async_trait]
impl FinanceDataSource for InMemoryDataSource {
    async fn currencies(&self, organization_id: OrganizationId) -> Result<Vec<Currency>, PortError> {
        self.organizations
            .read()
            .await
            .get(&organization_id)
            .map(|org| org.currencies.clone())
            .ok_or_else(|| PortError::not_found("Organization", organization_id))
    }

    async fn preferences(&self, organization_id: OrganizationId) -> Result<CurrencyPreferences, PortError> {
        self.organizations
            .read()
            .await
            .get(&organization_id)
            .map(|org| org.preferences.clone())
            .ok_or_else(|| PortError::not_found("Organization", organization_id))
    }

    async fn timezone(&self, organization_id: OrganizationId) -> Result<Option<Timezone>, PortError> {
        self.organizations
            .read()
            .await
            .get(&organization_id)
            .map(|org| org.timezone)
            .ok_or_else(|| PortError::not_found("Organization", organization_id))
    }

    async fn movements(
        &self,
        organization_id: OrganizationId,
        project_id: Option<ProjectId>,
    ) -> Result<Vec<MovementRow>, PortError> {
        let organizations = self.organizations.read().await;
        let organization = organizations
            .get(&organization_id)
            .ok_or_else(|| PortError::not_found("Organization", organization_id))?;

        Ok(organization
            .movements
            .iter()
            .filter(|(project, _)| project_id.is_none() || *project == project_id)
            .map(|(_, row)| row.clone())
            .collect())
    }
}
