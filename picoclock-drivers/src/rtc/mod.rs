//! Real-time clock drivers
//!
//! - [`ds3231`] - DS3231 register driver (time, oscillator, temperature)
//! - [`bcd`] - packed BCD codec used by the calendar registers
//! - [`registers`] - register map and time-register encoding
//! - [`temperature`] - on-die temperature decoding

pub mod bcd;
pub mod ds3231;
pub mod registers;
pub mod temperature;

#[cfg(test)]
mod sim;

pub use ds3231::{Ds3231, Ds3231Error};
pub use temperature::Temperature;
