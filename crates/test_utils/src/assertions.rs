//! Custom Test Assertions
//!
//! Assertion helpers for breakdowns and series that print the whole
//! structure on failure.

use domain_finance::{Breakdown, Series};
use rust_decimal::Decimal;

/// Asserts that a breakdown's total is the sum of its lines
///
/// # Panics
///
/// Panics if the totals differ.
pub fn assert_breakdown_consistent(breakdown: &Breakdown) {
    let lines: Decimal = breakdown.lines.iter().map(|l| l.functional_amount).sum();
    assert_eq!(
        lines, breakdown.total_in_functional,
        "Breakdown lines sum to {} but total is {}: {:?}",
        lines, breakdown.total_in_functional, breakdown
    );

    let unreliable_lines = breakdown.lines.iter().filter(|l| !l.reliable).count();
    assert!(
        unreliable_lines <= breakdown.unconverted_count,
        "{} unreliable lines but only {} unconverted values",
        unreliable_lines,
        breakdown.unconverted_count
    );
}

/// Asserts that lines are ordered by functional amount descending, then by code
pub fn assert_breakdown_ordered(breakdown: &Breakdown) {
    for pair in breakdown.lines.windows(2) {
        let ordered = pair[0].functional_amount > pair[1].functional_amount
            || (pair[0].functional_amount == pair[1].functional_amount && pair[0].currency < pair[1].currency);
        assert!(
            ordered,
            "Breakdown lines out of order: {} ({}) before {} ({})",
            pair[0].currency, pair[0].functional_amount, pair[1].currency, pair[1].functional_amount
        );
    }
}

/// Asserts the number of points and that buckets strictly ascend
pub fn assert_series_shape(series: &Series, expected_points: usize) {
    assert_eq!(
        series.points.len(),
        expected_points,
        "Expected {} points, got keys {:?}",
        expected_points,
        series.keys()
    );
    for pair in series.points.windows(2) {
        assert!(
            pair[0].end < pair[1].start,
            "Buckets overlap or are out of order: {} then {}",
            pair[0].key,
            pair[1].key
        );
    }
}

/// Asserts every bucket value, oldest first
pub fn assert_series_values(series: &Series, expected: &[Decimal]) {
    let actual: Vec<Decimal> = series.points.iter().map(|p| p.value).collect();
    assert_eq!(actual, expected, "Series values differ for keys {:?}", series.keys());
}
