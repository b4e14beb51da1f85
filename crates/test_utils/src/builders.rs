//! Test Data Builders
//!
//! Builders for movement rows and typed movements with sensible defaults.
//! Tests set only the fields they care about.

use chrono::NaiveDate;
use core_kernel::{CurrencyId, ExchangeRate};
use domain_finance::{FinancialMovement, MovementDate, MovementKind, MovementRow};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{money, IdFixtures, TemporalFixtures};

/// Builder for data-access movement rows
pub struct MovementRowBuilder {
    amount: Decimal,
    currency_id: Option<CurrencyId>,
    currency_code: Option<String>,
    exchange_rate: Option<Decimal>,
    payment_date: Option<String>,
    created_at: Option<String>,
    movement_type: Option<String>,
    sign: Option<i64>,
}

impl Default for MovementRowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementRowBuilder {
    /// An ARS income of 1000 paid on the fixture "today"
    pub fn new() -> Self {
        Self {
            amount: dec!(1000),
            currency_id: Some(IdFixtures::ars_id()),
            currency_code: None,
            exchange_rate: None,
            payment_date: Some(TemporalFixtures::today().format("%Y-%m-%d").to_string()),
            created_at: None,
            movement_type: Some("income".to_string()),
            sign: None,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Identifies the currency by id only
    pub fn currency_id(mut self, id: CurrencyId) -> Self {
        self.currency_id = Some(id);
        self.currency_code = None;
        self
    }

    /// Identifies the currency by code only
    pub fn currency_code(mut self, code: &str) -> Self {
        self.currency_id = None;
        self.currency_code = Some(code.to_string());
        self
    }

    pub fn exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.payment_date = Some(date.format("%Y-%m-%d").to_string());
        self
    }

    /// Sets the raw payment date string, valid or not
    pub fn payment_date(mut self, raw: Option<&str>) -> Self {
        self.payment_date = raw.map(str::to_string);
        self
    }

    pub fn created_at(mut self, raw: &str) -> Self {
        self.created_at = Some(raw.to_string());
        self
    }

    pub fn kind(mut self, label: &str) -> Self {
        self.movement_type = Some(label.to_string());
        self
    }

    /// Sets an explicit sign and clears the movement type
    pub fn sign(mut self, sign: i64) -> Self {
        self.sign = Some(sign);
        self.movement_type = None;
        self
    }

    pub fn build(self) -> MovementRow {
        MovementRow {
            id: None,
            amount: self.amount,
            currency_id: self.currency_id.map(|id| *id.as_uuid()),
            currency_code: self.currency_code,
            exchange_rate: self.exchange_rate,
            payment_date: self.payment_date,
            created_at: self.created_at,
            movement_type: self.movement_type,
            sign: self.sign.map(Decimal::from),
        }
    }
}

/// Builder for typed movements
pub struct MovementBuilder {
    kind: MovementKind,
    date: Option<MovementDate>,
    amount: Decimal,
    currency: String,
    recorded_rate: Option<Decimal>,
}

impl Default for MovementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementBuilder {
    /// An ARS income of 1000 on the fixture "today"
    pub fn new() -> Self {
        Self {
            kind: MovementKind::Income,
            date: Some(MovementDate::Day(TemporalFixtures::today())),
            amount: dec!(1000),
            currency: "ARS".to_string(),
            recorded_rate: None,
        }
    }

    pub fn kind(mut self, kind: MovementKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(MovementDate::Day(date));
        self
    }

    pub fn undated(mut self) -> Self {
        self.date = None;
        self
    }

    pub fn amount(mut self, amount: Decimal, currency: &str) -> Self {
        self.amount = amount;
        self.currency = currency.to_string();
        self
    }

    pub fn recorded_rate(mut self, rate: Decimal) -> Self {
        self.recorded_rate = Some(rate);
        self
    }

    pub fn build(self) -> FinancialMovement {
        let mut value = money(self.amount, &self.currency);
        if let Some(rate) = self.recorded_rate {
            value = value.with_recorded_rate(ExchangeRate::new(rate));
        }
        FinancialMovement::of_kind(self.kind, self.date, value)
    }
}
