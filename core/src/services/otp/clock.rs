//! Time source for expiry decisions

use chrono::{DateTime, Utc};
use std::fmt;

/// Source of the current time, injectable so expiry can be tested
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
