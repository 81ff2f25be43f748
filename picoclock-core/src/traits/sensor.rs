//! Temperature sensor trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction with the sensor failed
    Bus,
    /// Reading out of expected range
    OutOfRange,
}

/// Trait for temperature sensors
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Returns a fixed-point value with 0.1°C resolution.
    /// For example, 25.5°C is returned as 255.
    ///
    /// Takes `&mut self` because reads go over a shared bus.
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError>;

    /// Read the current temperature in whole degrees Celsius
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        self.read_celsius_x10().map(|t| t / 10)
    }

    /// Check if the sensor reading is valid
    fn is_valid(&mut self) -> bool {
        self.read_celsius_x10().is_ok()
    }
}
