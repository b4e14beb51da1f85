//! Money display service
//!
//! Binds an organization's currencies, preferences, time zone and locale
//! into one place pages ask for formatted amounts, breakdowns and series.

use chrono::NaiveDate;
use core_kernel::{MoneyValue, Timezone};
use domain_currency::{
    CurrencyConverter, CurrencyPreferences, CurrencyRegistry, DisplayMode, FormattedAmount,
    MoneyFormatter,
};
use domain_finance::{Aggregator, Breakdown, FinanceError, FinancialMovement, Series, SeriesBuilder, SeriesRequest};
use serde::Serialize;

use crate::error::AppError;

/// Everything that shapes how one organization's money is shown
#[derive(Debug, Clone)]
pub struct OrganizationFinance {
    registry: CurrencyRegistry,
    preferences: CurrencyPreferences,
    timezone: Timezone,
    formatter: MoneyFormatter,
}

impl OrganizationFinance {
    /// Binds reference data and preferences
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences do not match the registry.
    pub fn new(
        registry: CurrencyRegistry,
        preferences: CurrencyPreferences,
        timezone: Timezone,
        locale: &str,
    ) -> Result<Self, AppError> {
        preferences.check(&registry)?;
        let formatter = MoneyFormatter::for_tag(locale, preferences.decimal_places);
        Ok(Self {
            registry,
            preferences,
            timezone,
            formatter,
        })
    }

    pub fn registry(&self) -> &CurrencyRegistry {
        &self.registry
    }

    pub fn preferences(&self) -> &CurrencyPreferences {
        &self.preferences
    }

    pub fn timezone(&self) -> Timezone {
        self.timezone
    }

    pub fn formatter(&self) -> &MoneyFormatter {
        &self.formatter
    }

    /// Today in the organization's time zone
    pub fn today(&self) -> NaiveDate {
        self.timezone.today()
    }
}

/// A breakdown ready to render
///
/// In mix mode `lines` holds one entry per currency in its own currency.
/// In primary and secondary modes `lines` is empty and only the converted
/// total is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownView {
    pub mode: DisplayMode,
    pub lines: Vec<FormattedAmount>,
    pub total: FormattedAmount,
}

/// Formats amounts and derives aggregates for one organization
#[derive(Debug, Clone)]
pub struct MoneyDisplayService {
    finance: OrganizationFinance,
}

impl MoneyDisplayService {
    pub fn new(finance: OrganizationFinance) -> Self {
        Self { finance }
    }

    pub fn finance(&self) -> &OrganizationFinance {
        &self.finance
    }

    /// A converter honoring the organization's preferences
    pub fn converter(&self) -> CurrencyConverter<'_> {
        CurrencyConverter::with_preferences(&self.finance.registry, &self.finance.preferences)
            .unwrap_or_else(|_| CurrencyConverter::new(&self.finance.registry))
    }

    /// The mode actually used for a requested one
    pub fn effective_mode(&self, requested: DisplayMode) -> DisplayMode {
        self.finance.preferences.effective_mode(requested)
    }

    /// Formats a single value in the requested mode
    pub fn format_value(&self, value: &MoneyValue, mode: DisplayMode) -> FormattedAmount {
        let display = self.converter().to_display(value, self.effective_mode(mode));
        self.finance.formatter.format_display(&display, &self.finance.registry)
    }

    /// Folds values into a per-currency breakdown
    pub fn breakdown<'v, I>(&self, values: I) -> Breakdown
    where
        I: IntoIterator<Item = &'v MoneyValue>,
    {
        Aggregator::new(self.converter()).aggregate(values)
    }

    /// Folds signed movements into a per-currency breakdown
    pub fn movement_breakdown(&self, movements: &[FinancialMovement]) -> Breakdown {
        Aggregator::new(self.converter()).aggregate_movements(movements)
    }

    /// Renders a breakdown for the requested mode
    pub fn render_breakdown(&self, breakdown: &Breakdown, mode: DisplayMode) -> BreakdownView {
        let mode = self.effective_mode(mode);
        let converter = self.converter();
        let formatter = &self.finance.formatter;
        let registry = &self.finance.registry;

        let lines = match mode {
            DisplayMode::Mix => breakdown
                .lines
                .iter()
                .map(|line| {
                    let symbol = registry
                        .by_code(&line.currency)
                        .map(|c| c.symbol.as_str())
                        .unwrap_or_else(|| line.currency.as_str());
                    FormattedAmount {
                        text: formatter.format(line.native_amount, symbol),
                        currency: line.currency.clone(),
                        muted: !line.reliable,
                    }
                })
                .collect(),
            DisplayMode::Primary | DisplayMode::Secondary => Vec::new(),
        };

        let total_display = converter.functional_to_display(breakdown.total_in_functional, mode);
        let mut total = formatter.format_display(&total_display, registry);
        total.muted |= !breakdown.is_reliable();

        BreakdownView { mode, lines, total }
    }

    /// Builds a series in the functional currency
    pub fn series(&self, request: &SeriesRequest, movements: &[FinancialMovement]) -> Result<Series, FinanceError> {
        SeriesBuilder::new(self.converter()).build(request, movements)
    }

    /// Daily buckets ending today in the organization's time zone
    pub fn daily_request(&self, days: u32, today: NaiveDate) -> SeriesRequest {
        SeriesRequest::last_days(days, today, self.finance.timezone)
    }

    /// Monthly buckets ending with the current month, with a running balance
    pub fn monthly_request(&self, months: u32, today: NaiveDate) -> SeriesRequest {
        SeriesRequest::last_months(months, today, self.finance.timezone).with_opening_balance()
    }
}
