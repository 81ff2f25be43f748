//! Calendar time record
//!
//! The wall-clock value exchanged with real-time-clock drivers. Fields are
//! plain binary numbers; register encodings (BCD, masks) are the driver's
//! concern.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base year for the two-digit `year` field
pub const BASE_YEAR: u16 = 2000;

/// Date and time of day, 24-hour clock
///
/// Drivers forward these values to hardware as-is. Range checking is the
/// caller's job; [`DateTime::is_valid`] is provided for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    /// Seconds (0-59)
    pub seconds: u8,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Hours (0-23)
    pub hours: u8,
    /// Day of week (1-7, 1 = Sunday)
    pub weekday: u8,
    /// Day of month (1-31)
    pub date: u8,
    /// Month (1-12)
    pub month: u8,
    /// Years since 2000 (0-99)
    pub year: u8,
}

impl DateTime {
    /// Create a time record
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        seconds: u8,
        minutes: u8,
        hours: u8,
        weekday: u8,
        date: u8,
        month: u8,
        year: u8,
    ) -> Self {
        Self {
            seconds,
            minutes,
            hours,
            weekday,
            date,
            month,
            year,
        }
    }

    /// Full four-digit year
    pub fn full_year(&self) -> u16 {
        BASE_YEAR + self.year as u16
    }

    /// Check every field against its documented range
    ///
    /// Does not check the day against the month length.
    pub fn is_valid(&self) -> bool {
        self.seconds < 60
            && self.minutes < 60
            && self.hours < 24
            && (1..=7).contains(&self.weekday)
            && (1..=31).contains(&self.date)
            && (1..=12).contains(&self.month)
            && self.year < 100
    }
}
