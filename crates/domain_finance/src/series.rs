//! Time-bucketed series for dashboard charts
//!
//! Groups dated movements into consecutive calendar buckets in the
//! organization's time zone. Every requested bucket yields a point, empty
//! buckets included, oldest first.

use std::collections::HashMap;

use chrono::NaiveDate;
use core_kernel::{CurrencyCode, Granularity, Timezone};
use domain_currency::CurrencyConverter;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::FinanceError;
use crate::movement::FinancialMovement;

/// What to build: N buckets ending with the bucket containing `anchor`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesRequest {
    pub granularity: Granularity,
    pub buckets: u32,
    /// Usually "today" in the organization's time zone
    pub anchor: NaiveDate,
    pub timezone: Timezone,
    pub cumulative: bool,
    /// Start the running balance from movements dated before the first bucket
    pub include_opening_balance: bool,
}

impl SeriesRequest {
    pub fn new(granularity: Granularity, buckets: u32, anchor: NaiveDate, timezone: Timezone) -> Self {
        Self {
            granularity,
            buckets,
            anchor,
            timezone,
            cumulative: false,
            include_opening_balance: false,
        }
    }

    /// The last `days` calendar days up to and including `today`
    pub fn last_days(days: u32, today: NaiveDate, timezone: Timezone) -> Self {
        Self::new(Granularity::Daily, days, today, timezone)
    }

    /// The last `months` calendar months up to and including the current one
    pub fn last_months(months: u32, today: NaiveDate, timezone: Timezone) -> Self {
        Self::new(Granularity::Monthly, months, today, timezone)
    }

    /// Requests a running balance on every point
    pub fn cumulative(mut self) -> Self {
        self.cumulative = true;
        self
    }

    /// Seeds the running balance with everything before the first bucket
    pub fn with_opening_balance(mut self) -> Self {
        self.cumulative = true;
        self.include_opening_balance = true;
        self
    }
}

/// One bucket of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    /// `YYYY-MM-DD` for daily buckets, `YYYY-MM` for monthly ones
    pub key: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Sum of signed functional amounts in the bucket
    pub value: Decimal,
    /// Running balance, when requested
    pub cumulative: Option<Decimal>,
    pub movement_count: usize,
}

/// A chart-ready series with diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub granularity: Granularity,
    pub currency: CurrencyCode,
    pub points: Vec<SeriesPoint>,
    pub opening_balance: Decimal,
    /// Movements without a usable date
    pub skipped: usize,
    /// Dated movements falling outside the buckets
    pub out_of_range: usize,
    /// Bucketed movements whose amount could not be converted
    pub unconverted: usize,
}

impl Series {
    /// Sum of all bucket values
    pub fn total(&self) -> Decimal {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Opening balance plus every bucket value
    pub fn closing_balance(&self) -> Decimal {
        self.opening_balance + self.total()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.key.as_str()).collect()
    }
}

/// Builds series in one organization's functional currency
#[derive(Debug, Clone, Copy)]
pub struct SeriesBuilder<'a> {
    converter: CurrencyConverter<'a>,
}

impl<'a> SeriesBuilder<'a> {
    pub fn new(converter: CurrencyConverter<'a>) -> Self {
        Self { converter }
    }

    /// Buckets `movements` according to `request`
    ///
    /// Always returns exactly `request.buckets` points. Undated movements
    /// are counted in `skipped`, never propagated as errors.
    ///
    /// # Errors
    ///
    /// Only when the requested window falls outside the supported calendar.
    pub fn build(&self, request: &SeriesRequest, movements: &[FinancialMovement]) -> Result<Series, FinanceError> {
        let mut series = Series {
            granularity: request.granularity,
            currency: self.converter.functional().code.clone(),
            points: Vec::new(),
            opening_balance: Decimal::ZERO,
            skipped: 0,
            out_of_range: 0,
            unconverted: 0,
        };
        if request.buckets == 0 {
            return Ok(series);
        }

        let starts = request.granularity.bucket_starts(request.anchor, request.buckets)?;
        let index: HashMap<NaiveDate, usize> = starts.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        let first = starts[0];

        series.points = starts
            .iter()
            .map(|start| SeriesPoint {
                key: request.granularity.key(*start),
                start: *start,
                end: request.granularity.bucket_end(*start),
                value: Decimal::ZERO,
                cumulative: None,
                movement_count: 0,
            })
            .collect();

        for movement in movements {
            let Some(date) = movement.date else {
                series.skipped += 1;
                continue;
            };
            let local = date.local_date(&request.timezone);
            let bucket = index.get(&request.granularity.bucket_start(local)).copied();

            if bucket.is_none() {
                series.out_of_range += 1;
                if !(request.include_opening_balance && local < first) {
                    continue;
                }
            }

            let conversion = self.converter.to_functional(&movement.signed_value());
            if !conversion.is_reliable() {
                series.unconverted += 1;
            }

            match bucket {
                Some(i) => {
                    let point = &mut series.points[i];
                    point.value = point.value.saturating_add(conversion.amount);
                    point.movement_count += 1;
                }
                None => {
                    series.opening_balance = series.opening_balance.saturating_add(conversion.amount);
                }
            }
        }

        if request.cumulative {
            let mut running = series.opening_balance;
            for point in &mut series.points {
                running = running.saturating_add(point.value);
                point.cumulative = Some(running);
            }
        }

        if series.skipped > 0 {
            debug!(skipped = series.skipped, "undated movements left out of series");
        }

        Ok(series)
    }
}
