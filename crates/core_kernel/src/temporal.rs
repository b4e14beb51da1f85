//! Calendar handling types
//!
//! This module provides the time-zone aware calendar primitives used to
//! group dated financial records:
//! - Timezone: the organization's configured zone
//! - DateRange: an inclusive span of calendar dates
//! - Granularity: daily or monthly buckets and their string keys

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for organization settings
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(s.to_string()))
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Returns the local calendar date of a UTC instant
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }

    /// Returns today's date in this timezone
    pub fn today(&self) -> NaiveDate {
        self.local_date(Utc::now())
    }

    /// Gets the start of day (00:00:00) in this timezone as UTC
    ///
    /// Returns None only when midnight does not exist locally and no later
    /// instant of the day can be resolved.
    pub fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        date.and_hms_opt(0, 0, 0)?
            .and_local_timezone(self.0)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("A series needs at least one bucket")]
    EmptyBucketRange,

    #[error("Date out of supported range: {0}")]
    DateOutOfRange(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Calendar bucket size for time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
}

impl Granularity {
    /// Returns the first date of the bucket containing `date`
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// Returns the last date of the bucket starting at `start`
    pub fn bucket_end(&self, start: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => start,
            Granularity::Monthly => start
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(start),
        }
    }

    /// Returns the display key of the bucket containing `date`
    ///
    /// Daily keys look like `2024-03-09`, monthly keys like `2024-03`.
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            Granularity::Daily => date.format("%Y-%m-%d").to_string(),
            Granularity::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
        }
    }

    /// Returns `count` bucket start dates ending with the bucket that
    /// contains `anchor`, oldest first
    pub fn bucket_starts(&self, anchor: NaiveDate, count: u32) -> Result<Vec<NaiveDate>, TemporalError> {
        if count == 0 {
            return Err(TemporalError::EmptyBucketRange);
        }

        let last = self.bucket_start(anchor);
        let first = self.step_back(last, count - 1)?;

        let mut starts = Vec::with_capacity(count as usize);
        let mut current = first;
        for _ in 0..count {
            starts.push(current);
            current = self.step_forward(current, 1)?;
        }
        Ok(starts)
    }

    fn step_back(&self, start: NaiveDate, steps: u32) -> Result<NaiveDate, TemporalError> {
        let shifted = match self {
            Granularity::Daily => start.checked_sub_days(Days::new(steps as u64)),
            Granularity::Monthly => start.checked_sub_months(Months::new(steps)),
        };
        shifted.ok_or_else(|| TemporalError::DateOutOfRange(start.to_string()))
    }

    fn step_forward(&self, start: NaiveDate, steps: u32) -> Result<NaiveDate, TemporalError> {
        let shifted = match self {
            Granularity::Daily => start.checked_add_days(Days::new(steps as u64)),
            Granularity::Monthly => start.checked_add_months(Months::new(steps)),
        };
        shifted.ok_or_else(|| TemporalError::DateOutOfRange(start.to_string()))
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => f.write_str("daily"),
            Granularity::Monthly => f.write_str("monthly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let tz: Timezone = "America/Argentina/Buenos_Aires".parse().unwrap();
        // 01:30 UTC is still the previous evening in Buenos Aires (UTC-3)
        let instant = Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap();
        assert_eq!(tz.local_date(instant), date(2024, 3, 9));
    }

    #[test]
    fn test_unknown_timezone() {
        let result: Result<Timezone, _> = "Mars/Olympus".parse();
        assert!(matches!(result, Err(TemporalError::UnknownTimezone(_))));
    }

    #[test]
    fn test_monthly_bucket_starts_cross_year() {
        let starts = Granularity::Monthly.bucket_starts(date(2024, 2, 17), 3).unwrap();
        assert_eq!(starts, vec![date(2023, 12, 1), date(2024, 1, 1), date(2024, 2, 1)]);
    }

    #[test]
    fn test_bucket_end_for_february() {
        assert_eq!(Granularity::Monthly.bucket_end(date(2024, 2, 1)), date(2024, 2, 29));
        assert_eq!(Granularity::Daily.bucket_end(date(2024, 2, 1)), date(2024, 2, 1));
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert_eq!(
            Granularity::Daily.bucket_starts(date(2024, 1, 1), 0),
            Err(TemporalError::EmptyBucketRange)
        );
    }

    #[test]
    fn test_date_range_days_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 14)).unwrap();
        assert_eq!(range.days(), 14);
        assert!(range.contains(date(2024, 1, 14)));
    }
}
