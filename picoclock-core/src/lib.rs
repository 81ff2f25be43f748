//! Board-agnostic types and traits for the picoclock drivers
//!
//! This crate contains the pieces that do not depend on a specific chip:
//!
//! - The [`DateTime`] record exchanged with real-time clocks
//! - Hardware abstraction traits (clock, temperature sensor)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod time;
pub mod traits;

pub use time::DateTime;
