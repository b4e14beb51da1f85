//! Multi-currency aggregation
//!
//! Folds money values spanning several currencies into one breakdown line
//! per currency and a single functional-currency total.

use std::collections::BTreeMap;

use core_kernel::{CurrencyCode, MoneyValue};
use domain_currency::CurrencyConverter;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::movement::FinancialMovement;

/// Subtotal for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    pub currency: CurrencyCode,
    pub native_amount: Decimal,
    pub functional_amount: Decimal,
    pub value_count: usize,
    /// False when at least one value in the line could not be converted
    pub reliable: bool,
}

/// Per-currency subtotals plus the functional-currency total
///
/// Derived on every call; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub functional_currency: CurrencyCode,
    pub total_in_functional: Decimal,
    pub lines: Vec<BreakdownLine>,
    pub unconverted_count: usize,
}

impl Breakdown {
    fn empty(functional_currency: CurrencyCode) -> Self {
        Self {
            functional_currency,
            total_in_functional: Decimal::ZERO,
            lines: Vec::new(),
            unconverted_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True when every value was converted with a usable rate
    pub fn is_reliable(&self) -> bool {
        self.unconverted_count == 0
    }

    /// True when all values share one currency
    pub fn single_currency(&self) -> bool {
        self.lines.len() == 1
    }

    /// Returns the line for a currency, if present
    pub fn line(&self, currency: &CurrencyCode) -> Option<&BreakdownLine> {
        self.lines.iter().find(|line| &line.currency == currency)
    }
}

#[derive(Default)]
struct LineAccumulator {
    native: Decimal,
    functional: Decimal,
    count: usize,
    reliable: bool,
}

/// Aggregates money values with one organization's converter
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    converter: CurrencyConverter<'a>,
}

impl<'a> Aggregator<'a> {
    pub fn new(converter: CurrencyConverter<'a>) -> Self {
        Self { converter }
    }

    /// Builds the breakdown of `values`
    ///
    /// Each value is converted on its own, so values of the same currency
    /// recorded at different rates keep their own rates. Values that cannot
    /// be converted contribute their unconverted amount and mark their line
    /// unreliable.
    ///
    /// Lines are ordered by functional amount descending, then by currency
    /// code ascending.
    pub fn aggregate<'v, I>(&self, values: I) -> Breakdown
    where
        I: IntoIterator<Item = &'v MoneyValue>,
    {
        let mut breakdown = Breakdown::empty(self.converter.functional().code.clone());
        let mut groups: BTreeMap<CurrencyCode, LineAccumulator> = BTreeMap::new();

        for value in values {
            let conversion = self.converter.to_functional(value);
            let acc = groups
                .entry(value.currency().clone())
                .or_insert_with(|| LineAccumulator {
                    reliable: true,
                    ..Default::default()
                });

            acc.native = acc.native.saturating_add(value.amount());
            acc.functional = acc.functional.saturating_add(conversion.amount);
            acc.count += 1;
            if !conversion.is_reliable() {
                acc.reliable = false;
                breakdown.unconverted_count += 1;
            }
            breakdown.total_in_functional = breakdown.total_in_functional.saturating_add(conversion.amount);
        }

        breakdown.lines = groups
            .into_iter()
            .map(|(currency, acc)| BreakdownLine {
                currency,
                native_amount: acc.native,
                functional_amount: acc.functional,
                value_count: acc.count,
                reliable: acc.reliable,
            })
            .collect();
        breakdown.lines.sort_by(|a, b| {
            b.functional_amount
                .cmp(&a.functional_amount)
                .then_with(|| a.currency.cmp(&b.currency))
        });

        breakdown
    }

    /// Applies the sign convention to each movement, then aggregates
    pub fn aggregate_movements(&self, movements: &[FinancialMovement]) -> Breakdown {
        let signed: Vec<MoneyValue> = movements.iter().map(FinancialMovement::signed_value).collect();
        self.aggregate(&signed)
    }
}
