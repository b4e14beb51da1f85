//! CSV export of breakdowns and series
//!
//! Amounts are written as plain decimals with at most four places so the
//! files import cleanly into spreadsheets regardless of locale.

use std::io::Write;

use core_kernel::INTERNAL_SCALE;
use rust_decimal::Decimal;

use crate::aggregate::Breakdown;
use crate::error::FinanceError;
use crate::series::Series;

const BREAKDOWN_HEADER: [&str; 5] = ["currency", "native_amount", "functional_amount", "values", "reliable"];
const SERIES_HEADER: [&str; 5] = ["bucket", "start", "end", "value", "cumulative"];

fn format_amount(amount: Decimal) -> String {
    amount.round_dp(INTERNAL_SCALE).normalize().to_string()
}

/// Writes one row per currency line followed by a total row
pub fn write_breakdown_csv(breakdown: &Breakdown, writer: impl Write) -> Result<(), FinanceError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(BREAKDOWN_HEADER)?;
    for line in &breakdown.lines {
        csv.write_record([
            line.currency.to_string(),
            format_amount(line.native_amount),
            format_amount(line.functional_amount),
            line.value_count.to_string(),
            line.reliable.to_string(),
        ])?;
    }
    csv.write_record([
        "TOTAL".to_string(),
        String::new(),
        format_amount(breakdown.total_in_functional),
        breakdown.lines.iter().map(|l| l.value_count).sum::<usize>().to_string(),
        breakdown.is_reliable().to_string(),
    ])?;

    csv.flush()?;
    Ok(())
}

/// Writes one row per bucket, oldest first
///
/// The cumulative column is empty when the series was built without a
/// running balance.
pub fn write_series_csv(series: &Series, writer: impl Write) -> Result<(), FinanceError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(SERIES_HEADER)?;
    for point in &series.points {
        csv.write_record([
            point.key.clone(),
            point.start.format("%Y-%m-%d").to_string(),
            point.end.format("%Y-%m-%d").to_string(),
            format_amount(point.value),
            point.cumulative.map(format_amount).unwrap_or_default(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
