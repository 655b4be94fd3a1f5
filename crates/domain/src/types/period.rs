//! Billing periods (one calendar month, UTC)

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{MspDashError, Result};

/// A calendar month addressed by `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub year: i32,
    pub month: u32,
}

impl BillingPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(MspDashError::InvalidInput(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(MspDashError::InvalidInput(format!("year out of range: {year}")));
        }
        Ok(Self { year, month })
    }

    /// The month containing `instant`.
    pub fn containing(instant: DateTime<Utc>) -> Self {
        Self { year: instant.year(), month: instant.month() }
    }

    /// The month before this one, rolling back across the year boundary.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.map_or(31, |next| (next - self.first_day()).num_days() as u32)
    }

    /// Day 1, 00:00:00 UTC.
    pub fn first_instant(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.first_day().and_time(chrono::NaiveTime::MIN))
    }

    /// Last day of the month, 23:59:59 UTC. Inclusive bound.
    pub fn last_instant(self) -> DateTime<Utc> {
        let last_day = self.first_day() + Duration::days(i64::from(self.days_in_month()) - 1);
        let end = last_day.and_hms_opt(23, 59, 59).unwrap_or_default();
        Utc.from_utc_datetime(&end)
    }

    /// Whether `instant` falls within `[first_instant, last_instant]`.
    pub fn contains(self, instant: DateTime<Utc>) -> bool {
        instant >= self.first_instant() && instant <= self.last_instant()
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
