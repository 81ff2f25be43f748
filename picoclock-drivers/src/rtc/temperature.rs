//! DS3231 die temperature decoding
//!
//! The sensor result is a 10-bit two's complement value split across two
//! registers: the integer part in `TEMP_MSB` and two fractional bits in the
//! top of `TEMP_LSB`. One count is 0.25°C.
//!
//! The chip converts on its own every 64 seconds, so a plain read can be up
//! to a minute old. See `Ds3231::start_temperature_conversion` for an
//! explicit refresh.

/// Temperature sample with 0.25°C resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    /// Signed count of quarter degrees
    quarters: i16,
}

impl Temperature {
    /// Degrees Celsius per count
    pub const RESOLUTION: f32 = 0.25;

    /// Decode the raw `TEMP_MSB` / `TEMP_LSB` register pair
    pub fn from_registers(msb: u8, lsb: u8) -> Self {
        // Low 6 bits of the LSB are unused; arithmetic shift keeps the sign
        let raw = i16::from_be_bytes([msb, lsb]);
        Self { quarters: raw >> 6 }
    }

    /// Build a sample from a quarter-degree count
    pub const fn from_quarters(quarters: i16) -> Self {
        Self { quarters }
    }

    /// Raw quarter-degree count
    pub const fn quarters(&self) -> i16 {
        self.quarters
    }

    /// Temperature in degrees Celsius
    pub fn celsius(&self) -> f32 {
        self.quarters as f32 * Self::RESOLUTION
    }

    /// Temperature in tenths of a degree, truncated toward zero
    pub fn celsius_x10(&self) -> i16 {
        (self.quarters as i32 * 10 / 4) as i16
    }
}
