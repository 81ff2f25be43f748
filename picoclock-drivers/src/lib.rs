//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in picoclock-core for the clock hardware:
//!
//! - Real-time clock (DS3231): calendar, oscillator control
//! - Temperature sensor (DS3231 on-die sensor)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod rtc;
