//! I2C bus abstractions
//!
//! Provides the I2C master operations the display and RTC drivers need,
//! plus an adapter for any `embedded-hal` 1.0 blocking I2C implementation.

use embedded_hal::i2c::{I2c, Operation};

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Every call is one complete bus transaction
/// (START ... STOP) and blocks until it finishes.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    /// The bus is not released between the two phases.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write a single prefix byte followed by `data` as one contiguous write
    ///
    /// Lets drivers stream a large buffer behind a control byte without
    /// copying it into a scratch buffer first.
    fn write_prefixed(&mut self, address: u8, prefix: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::write_read(self, address, write_data, read_buf)
    }

    fn write_prefixed(&mut self, address: u8, prefix: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write_prefixed(self, address, prefix, data)
    }
}

/// Adapter exposing an `embedded-hal` I2C master as an [`I2cBus`]
///
/// Bus and pin setup (clock rate, pull-ups, pin muxing) stays with the
/// chip HAL; this only forwards transactions.
#[derive(Debug)]
pub struct EmbeddedHalI2c<I2C> {
    inner: I2C,
}

impl<I2C> EmbeddedHalI2c<I2C> {
    /// Wrap an initialized HAL I2C peripheral
    pub fn new(inner: I2C) -> Self {
        Self { inner }
    }

    /// Give the wrapped peripheral back
    pub fn into_inner(self) -> I2C {
        self.inner
    }
}

impl<I2C: I2c> I2cBus for EmbeddedHalI2c<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner.write_read(address, write_data, read_buf)
    }

    fn write_prefixed(&mut self, address: u8, prefix: u8, data: &[u8]) -> Result<(), Self::Error> {
        // Adjacent write operations go out without a repeated start
        let prefix = [prefix];
        self.inner.transaction(
            address,
            &mut [Operation::Write(&prefix), Operation::Write(data)],
        )
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
