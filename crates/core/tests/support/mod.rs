//! Shared test helpers for `mspdash-core` integration tests.
//!
//! These helpers provide an in-memory store and a pinned clock so billing
//! tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod repositories;

use chrono::{DateTime, TimeZone, Utc};
use mspdash_core::Clock;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        Self(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
