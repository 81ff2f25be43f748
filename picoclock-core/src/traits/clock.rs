//! Real-time clock trait

use crate::time::DateTime;

/// Trait for battery-backed wall clocks
///
/// Every call is one synchronous bus exchange. Implementations never retry;
/// a failed call returns the bus error and the caller decides what to do.
pub trait RealTimeClock {
    /// Error type for clock transactions
    type Error;

    /// Read the current date and time
    fn read_time(&mut self) -> Result<DateTime, Self::Error>;

    /// Set the date and time
    ///
    /// Values are written as given, without range checks.
    fn write_time(&mut self, time: &DateTime) -> Result<(), Self::Error>;
}
