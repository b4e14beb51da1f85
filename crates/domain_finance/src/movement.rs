//! Signed financial movements

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use core_kernel::{MoneyValue, MovementId, Timezone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Parses an explicit +1 / -1 sign field, in any numeric scale
    pub fn from_factor(factor: Decimal) -> Option<Self> {
        if factor == Decimal::ONE {
            Some(Sign::Positive)
        } else if factor == Decimal::NEGATIVE_ONE {
            Some(Sign::Negative)
        } else {
            None
        }
    }

    pub fn factor(&self) -> Decimal {
        match self {
            Sign::Positive => Decimal::ONE,
            Sign::Negative => Decimal::NEGATIVE_ONE,
        }
    }
}

/// Kind of movement, which implies its sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Income,
    Contribution,
    Expense,
    Withdrawal,
}

impl MovementKind {
    /// Parses the type labels used by the data layer
    ///
    /// Client payments count as income; payments to subcontractors and
    /// material or labor costs count as expenses.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "income" | "payment_received" | "client_payment" => Some(MovementKind::Income),
            "contribution" | "capital_contribution" => Some(MovementKind::Contribution),
            "expense" | "cost" | "payment_made" | "subcontract_payment" | "material" | "labor" => {
                Some(MovementKind::Expense)
            }
            "withdrawal" | "partner_withdrawal" => Some(MovementKind::Withdrawal),
            _ => None,
        }
    }

    pub fn sign(&self) -> Sign {
        match self {
            MovementKind::Income | MovementKind::Contribution => Sign::Positive,
            MovementKind::Expense | MovementKind::Withdrawal => Sign::Negative,
        }
    }
}

/// When a movement happened
///
/// Instants are bucketed by their local date in the organization's time
/// zone; plain dates are already local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementDate {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

impl MovementDate {
    /// Parses the date formats produced by the data layer
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]+HH[:MM]`, offset-less
    /// timestamps (read as UTC) and plain `YYYY-MM-DD` dates. Returns None
    /// for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(MovementDate::Instant(instant.with_timezone(&Utc)));
        }
        if let Ok(instant) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
            return Some(MovementDate::Instant(instant.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(MovementDate::Instant(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(MovementDate::Day)
    }

    /// Returns the calendar date in the given time zone
    pub fn local_date(&self, tz: &Timezone) -> NaiveDate {
        match self {
            MovementDate::Instant(instant) => tz.local_date(*instant),
            MovementDate::Day(day) => *day,
        }
    }
}

/// A dated, signed money movement
///
/// `value` holds the unsigned amount as recorded; the sign is applied by
/// [`FinancialMovement::signed_value`]. A `None` date means the source date
/// was missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialMovement {
    pub id: Option<MovementId>,
    pub date: Option<MovementDate>,
    pub value: MoneyValue,
    pub sign: Sign,
    pub kind: Option<MovementKind>,
}

impl FinancialMovement {
    pub fn new(date: Option<MovementDate>, value: MoneyValue, sign: Sign) -> Self {
        Self {
            id: None,
            date,
            value,
            sign,
            kind: None,
        }
    }

    /// Creates a movement whose sign follows its kind
    pub fn of_kind(kind: MovementKind, date: Option<MovementDate>, value: MoneyValue) -> Self {
        Self {
            id: None,
            date,
            value,
            sign: kind.sign(),
            kind: Some(kind),
        }
    }

    pub fn with_id(mut self, id: MovementId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the value with the sign convention applied
    pub fn signed_value(&self) -> MoneyValue {
        match self.sign {
            Sign::Positive => self.value.clone(),
            Sign::Negative => MoneyValue {
                money: -self.value.money.clone(),
                recorded_rate: self.value.recorded_rate,
            },
        }
    }
}
