//! Picoclock Hardware Abstraction Layer
//!
//! This crate defines the bus traits the peripheral drivers are written
//! against. Chip HALs plug in either by implementing [`I2cBus`] directly or
//! by wrapping their `embedded-hal` I2C master in [`i2c::EmbeddedHalI2c`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (clock face, main loop)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  picoclock-   │       │  picoclock-   │
//! │   display     │       │   drivers     │
//! └───────────────┘       └───────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picoclock-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::{EmbeddedHalI2c, I2cBus, I2cConfig};
