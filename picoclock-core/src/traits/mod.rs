//! Hardware abstraction traits
//!
//! These traits define the interface between application logic
//! and the peripheral drivers.

pub mod clock;
pub mod sensor;

pub use clock::RealTimeClock;
pub use sensor::{SensorError, TemperatureSensor};
