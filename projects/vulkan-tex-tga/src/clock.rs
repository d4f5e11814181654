//! Wall-clock capability for the 2.0 extension timestamp.
//!
//! The extension area carries the file's creation time in UTC. Writers take
//! the clock as a capability so tests (and reproducible builds) can pin it.

use chrono::{Datelike, Timelike, Utc};

/// A broken-down UTC timestamp as the TGA extension stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaTimestamp {
    pub month: u16,
    pub day: u16,
    pub year: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

/// Source of the extension-area timestamp.
pub trait TgaClock {
    fn utc_now(&self) -> TgaTimestamp;
}

/// The process wall clock, in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TgaClock for SystemClock {
    fn utc_now(&self) -> TgaTimestamp {
        let now = Utc::now();
        TgaTimestamp {
            month: now.month() as u16,
            day: now.day() as u16,
            year: now.year() as u16,
            hour: now.hour() as u16,
            minute: now.minute() as u16,
            second: now.second() as u16,
        }
    }
}

/// A pinned timestamp for deterministic output.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub TgaTimestamp);

impl TgaClock for FixedClock {
    fn utc_now(&self) -> TgaTimestamp {
        self.0
    }
}
