//! Data-access boundary
//!
//! Rows arrive from the data layer as loosely shaped records. They are
//! validated here into fully typed values so aggregation and bucketing only
//! ever see [`MoneyValue`]s and [`FinancialMovement`]s.
//!
//! A non-numeric amount fails deserialization and propagates to the caller.
//! Everything else is resolved per row: an unusable row is reported in
//! [`Ingested::rejected`] and a bad date only marks the movement undated.

use core_kernel::{CurrencyId, ExchangeRate, Money, MoneyValue, MovementId};
use domain_currency::{Currency, CurrencyRegistry};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::FinanceError;
use crate::movement::{FinancialMovement, MovementDate, MovementKind, Sign};

/// A plain money record such as a quote line or a cost
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyRow {
    pub amount: Decimal,
    pub currency_id: Option<Uuid>,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<Decimal>,
}

impl MoneyRow {
    /// Resolves the row into a typed money value
    pub fn into_value(&self, registry: &CurrencyRegistry) -> Result<MoneyValue, FinanceError> {
        let currency = resolve_currency(registry, self.currency_id, self.currency_code.as_deref())?;
        Ok(money_value(self.amount, currency, self.exchange_rate))
    }
}

/// A dated payment, cost, contribution or withdrawal
#[derive(Debug, Clone, Deserialize)]
pub struct MovementRow {
    pub id: Option<Uuid>,
    pub amount: Decimal,
    pub currency_id: Option<Uuid>,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub payment_date: Option<String>,
    pub created_at: Option<String>,
    #[serde(alias = "type")]
    pub movement_type: Option<String>,
    /// +1 or -1, sent as an integer, a float or a string
    pub sign: Option<Decimal>,
}

impl MovementRow {
    /// Resolves the row into a typed movement
    ///
    /// The explicit `sign` wins over the movement type, and an unrecognized
    /// type label only matters when there is no explicit sign. The date comes
    /// from `payment_date`, falling back to `created_at`.
    ///
    /// # Errors
    ///
    /// Returns an error when the currency cannot be resolved or no valid
    /// sign can be derived.
    pub fn into_movement(&self, registry: &CurrencyRegistry) -> Result<FinancialMovement, FinanceError> {
        let currency = resolve_currency(registry, self.currency_id, self.currency_code.as_deref())?;

        let kind = self.movement_type.as_deref().and_then(MovementKind::parse);
        let sign = match (self.sign, self.movement_type.as_deref()) {
            (Some(factor), _) => Sign::from_factor(factor).ok_or(FinanceError::InvalidSign(factor))?,
            (None, Some(label)) => kind
                .map(|kind| kind.sign())
                .ok_or_else(|| FinanceError::UnknownMovementType(label.to_string()))?,
            (None, None) => return Err(FinanceError::MissingSign),
        };

        let raw_date = self.payment_date.as_deref().or(self.created_at.as_deref());
        let date = raw_date.and_then(MovementDate::parse);
        if date.is_none() {
            debug!(row_id = ?self.id, raw_date = ?raw_date, "movement has no usable date");
        }

        Ok(FinancialMovement {
            id: self.id.map(MovementId::from_uuid),
            date,
            value: money_value(self.amount, currency, self.exchange_rate),
            sign,
            kind,
        })
    }
}

/// A row the ingestion could not turn into a movement
#[derive(Debug)]
pub struct RejectedRow {
    pub index: usize,
    pub error: FinanceError,
}

/// Result of validating a batch of rows
#[derive(Debug, Default)]
pub struct Ingested {
    pub movements: Vec<FinancialMovement>,
    pub rejected: Vec<RejectedRow>,
}

impl Ingested {
    /// Number of movements without a usable date
    pub fn undated(&self) -> usize {
        self.movements.iter().filter(|m| m.date.is_none()).count()
    }
}

/// Validates a batch of rows, keeping the good ones and reporting the rest
pub fn ingest(rows: &[MovementRow], registry: &CurrencyRegistry) -> Ingested {
    let mut ingested = Ingested {
        movements: Vec::with_capacity(rows.len()),
        rejected: Vec::new(),
    };

    for (index, row) in rows.iter().enumerate() {
        match row.into_movement(registry) {
            Ok(movement) => ingested.movements.push(movement),
            Err(error) => {
                debug!(index, %error, "rejected movement row");
                ingested.rejected.push(RejectedRow { index, error });
            }
        }
    }

    ingested
}

fn resolve_currency<'r>(
    registry: &'r CurrencyRegistry,
    id: Option<Uuid>,
    code: Option<&str>,
) -> Result<&'r Currency, FinanceError> {
    if let Some(currency) = id.and_then(|id| registry.get(&CurrencyId::from_uuid(id))) {
        return Ok(currency);
    }
    if let Some(code) = code {
        return registry
            .lookup(code)
            .ok_or_else(|| FinanceError::UnknownCurrency(code.to_string()));
    }
    match id {
        Some(id) => Err(FinanceError::UnknownCurrency(id.to_string())),
        None => Err(FinanceError::MissingCurrency),
    }
}

fn money_value(amount: Decimal, currency: &Currency, rate: Option<Decimal>) -> MoneyValue {
    let value = MoneyValue::new(Money::new(amount, currency.code.clone()));
    match rate {
        Some(rate) => value.with_recorded_rate(ExchangeRate::new(rate)),
        None => value,
    }
}
