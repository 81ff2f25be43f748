//! DS3231 real-time clock driver (I2C)
//!
//! The DS3231 is a temperature-compensated RTC with a battery-backed
//! calendar, two alarms and an on-die temperature sensor.
//!
//! # I2C Protocol
//!
//! Fixed 7-bit address 0x68. Every access sets the register pointer first:
//! - Write: address byte, register pointer, then data bytes
//! - Read: address byte, register pointer, repeated start, then data bytes
//!
//! The pointer auto-increments, so contiguous registers move in one burst.
//! On every START the chip copies the live time registers into a read buffer,
//! which is why the seven time registers must be read in one transaction:
//! separate reads can straddle a seconds-to-minutes carry.
//!
//! Hours are handled in 24-hour mode only. A clock left in 12-hour mode by
//! other software decodes wrongly; [`Ds3231::is_12_hour_mode`] detects that.

use picoclock_core::traits::{RealTimeClock, SensorError, TemperatureSensor};
use picoclock_core::DateTime;
use picoclock_hal::{I2cBus, I2cConfig};

use super::registers::{self, control, reg, status, HOURS_12H, TIME_LEN};
use super::temperature::Temperature;

/// DS3231 communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ds3231Error<E> {
    /// I2C transaction failed
    Bus(E),
    /// A temperature conversion is already running
    Busy,
}

impl<E> From<E> for Ds3231Error<E> {
    fn from(e: E) -> Self {
        Ds3231Error::Bus(e)
    }
}

/// DS3231 driver
///
/// Holds the bus capability and the device address, nothing else. Every
/// method is one or two independent request/response transactions; nothing
/// is cached and nothing is retried.
#[derive(Debug, Clone, Copy)]
pub struct Ds3231<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Ds3231<I2C> {
    /// Factory I2C address
    pub const DEFAULT_ADDRESS: u8 = 0x68;

    /// Bus speed the chip is brought up with
    pub const RECOMMENDED_BUS: I2cConfig = I2cConfig::STANDARD;

    /// Create a driver at the factory address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, Self::DEFAULT_ADDRESS)
    }

    /// Create a driver at a specific 7-bit address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus> Ds3231<I2C> {
    /// Bring the clock up after the bus is configured
    ///
    /// Makes sure the oscillator runs on battery power.
    pub fn init(&mut self) -> Result<(), Ds3231Error<I2C::Error>> {
        self.enable_oscillator(true)?;

        #[cfg(feature = "defmt")]
        defmt::info!("DS3231 at {=u8:#x} initialized", self.address);

        Ok(())
    }

    /// Read a single register
    pub fn read_register(&mut self, register: u8) -> Result<u8, Ds3231Error<I2C::Error>> {
        let mut value = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut value)?;
        Ok(value[0])
    }

    /// Write a single register
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Ds3231Error<I2C::Error>> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }

    /// Read consecutive registers in one burst, starting at `start`
    pub fn read_registers(
        &mut self,
        start: u8,
        buf: &mut [u8],
    ) -> Result<(), Ds3231Error<I2C::Error>> {
        self.i2c.write_read(self.address, &[start], buf)?;
        Ok(())
    }

    /// Read the calendar in a single 7-byte burst
    pub fn read_time(&mut self) -> Result<DateTime, Ds3231Error<I2C::Error>> {
        let mut raw = [0u8; TIME_LEN];
        self.read_registers(reg::SECONDS, &mut raw)?;
        Ok(registers::decode_time(&raw))
    }

    /// Set the calendar in a single burst write
    ///
    /// Field values are forwarded without range checks.
    pub fn write_time(&mut self, time: &DateTime) -> Result<(), Ds3231Error<I2C::Error>> {
        let mut data = [0u8; TIME_LEN + 1];
        data[0] = reg::SECONDS;
        data[1..].copy_from_slice(&registers::encode_time(time));
        self.i2c.write(self.address, &data)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("DS3231 time set: {}", time);

        Ok(())
    }

    /// Read the die temperature
    ///
    /// Returns the result of the chip's last automatic conversion, which may
    /// be up to 64 seconds old.
    pub fn read_temperature(&mut self) -> Result<Temperature, Ds3231Error<I2C::Error>> {
        let msb = self.read_register(reg::TEMP_MSB)?;
        let lsb = self.read_register(reg::TEMP_LSB)?;
        Ok(Temperature::from_registers(msb, lsb))
    }

    /// Start or stop the oscillator
    ///
    /// The EOSC bit is active low: clearing it runs the oscillator.
    /// Only bit 7 of the control register changes.
    pub fn enable_oscillator(&mut self, enable: bool) -> Result<(), Ds3231Error<I2C::Error>> {
        self.modify_register(reg::CONTROL, |ctrl| {
            if enable {
                ctrl & !control::EOSC
            } else {
                ctrl | control::EOSC
            }
        })
    }

    /// Check the oscillator stop flag
    ///
    /// The flag is sticky: it reports whether the oscillator halted at any
    /// point since it was last cleared, typically after losing both supplies.
    /// This driver never clears it.
    pub fn is_oscillator_stopped(&mut self) -> Result<bool, Ds3231Error<I2C::Error>> {
        let stopped = self.read_register(reg::STATUS)? & status::OSF != 0;

        #[cfg(feature = "defmt")]
        if stopped {
            defmt::warn!("DS3231 oscillator stop flag set, time may be invalid");
        }

        Ok(stopped)
    }

    /// Check whether a temperature conversion is in progress
    pub fn is_busy(&mut self) -> Result<bool, Ds3231Error<I2C::Error>> {
        Ok(self.read_register(reg::STATUS)? & status::BSY != 0)
    }

    /// Trigger a temperature conversion now instead of waiting for the next
    /// automatic one
    ///
    /// Fails with [`Ds3231Error::Busy`] while a conversion is running. The
    /// new value is readable once [`Ds3231::is_busy`] reports `false`.
    pub fn start_temperature_conversion(&mut self) -> Result<(), Ds3231Error<I2C::Error>> {
        if self.is_busy()? {
            return Err(Ds3231Error::Busy);
        }
        self.modify_register(reg::CONTROL, |ctrl| ctrl | control::CONV)
    }

    /// Check whether the hours register is in 12-hour (AM/PM) mode
    pub fn is_12_hour_mode(&mut self) -> Result<bool, Ds3231Error<I2C::Error>> {
        Ok(self.read_register(reg::HOURS)? & HOURS_12H != 0)
    }

    /// Read the crystal aging offset
    pub fn read_aging_offset(&mut self) -> Result<i8, Ds3231Error<I2C::Error>> {
        Ok(self.read_register(reg::AGING)? as i8)
    }

    /// Set the crystal aging offset (positive values slow the clock)
    pub fn set_aging_offset(&mut self, offset: i8) -> Result<(), Ds3231Error<I2C::Error>> {
        self.write_register(reg::AGING, offset as u8)
    }

    /// Enable or disable the 32 kHz output pin
    ///
    /// Writing back the other status bits leaves the alarm and oscillator
    /// stop flags untouched, since those only clear when written as 0.
    pub fn set_32khz_output(&mut self, enable: bool) -> Result<(), Ds3231Error<I2C::Error>> {
        self.modify_register(reg::STATUS, |st| {
            if enable {
                st | status::EN32KHZ
            } else {
                st & !status::EN32KHZ
            }
        })
    }

    /// Read-modify-write of one register
    fn modify_register<F>(&mut self, register: u8, f: F) -> Result<(), Ds3231Error<I2C::Error>>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read_register(register)?;
        self.write_register(register, f(value))
    }
}

impl<I2C: I2cBus> RealTimeClock for Ds3231<I2C> {
    type Error = Ds3231Error<I2C::Error>;

    fn read_time(&mut self) -> Result<DateTime, Self::Error> {
        Ds3231::read_time(self)
    }

    fn write_time(&mut self, time: &DateTime) -> Result<(), Self::Error> {
        Ds3231::write_time(self, time)
    }
}

impl<I2C: I2cBus> TemperatureSensor for Ds3231<I2C> {
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError> {
        self.read_temperature()
            .map(|t| t.celsius_x10())
            .map_err(|_| SensorError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtc::sim::{SimError, SimulatedDs3231};

    fn clock() -> Ds3231<SimulatedDs3231> {
        Ds3231::new(SimulatedDs3231::new())
    }

    #[test]
    fn test_write_then_read_time() {
        let mut rtc = clock();
        let time = DateTime::new(45, 30, 14, 3, 15, 6, 24);

        rtc.write_time(&time).unwrap();
        assert_eq!(rtc.read_time().unwrap(), time);
    }

    #[test]
    fn test_write_time_is_one_burst() {
        let mut rtc = clock();
        rtc.write_time(&DateTime::new(45, 30, 14, 3, 15, 6, 24))
            .unwrap();

        let sim = rtc.release();
        assert_eq!(sim.transactions(), 1);
        assert_eq!(
            sim.last_write(),
            &[0x00, 0x45, 0x30, 0x14, 0x03, 0x15, 0x06, 0x24]
        );
    }

    #[test]
    fn test_read_time_is_one_burst() {
        let mut rtc = clock();
        rtc.read_time().unwrap();

        let sim = rtc.release();
        assert_eq!(sim.transactions(), 1);
        assert_eq!(sim.last_write(), &[reg::SECONDS]);
        assert_eq!(sim.last_read_len(), TIME_LEN);
    }

    #[test]
    fn test_burst_read_never_tears() {
        // 12:30:58, clock advances one second per bus transaction
        let start = DateTime::new(58, 30, 12, 2, 10, 3, 25);
        let mut sim = SimulatedDs3231::new();
        sim.set_time(&start);
        sim.set_ticking(true);
        let mut rtc = Ds3231::new(sim);

        let first = rtc.read_time().unwrap();
        assert_eq!(first, DateTime::new(59, 30, 12, 2, 10, 3, 25));

        let second = rtc.read_time().unwrap();
        assert_eq!(second, DateTime::new(0, 31, 12, 2, 10, 3, 25));
    }

    #[test]
    fn test_register_by_register_read_can_tear() {
        // Shows what the burst read protects against
        let mut sim = SimulatedDs3231::new();
        sim.set_time(&DateTime::new(58, 30, 12, 2, 10, 3, 25));
        sim.set_ticking(true);
        let mut rtc = Ds3231::new(sim);

        let seconds = rtc.read_register(reg::SECONDS).unwrap();
        let minutes = rtc.read_register(reg::MINUTES).unwrap();

        // 12:31:59 never existed during the two reads
        assert_eq!(seconds, 0x59);
        assert_eq!(minutes, 0x31);
    }

    #[test]
    fn test_burst_snapshots_match_clock_across_rollovers() {
        let mut sim = SimulatedDs3231::new();
        sim.set_time(&DateTime::new(50, 59, 23, 7, 31, 12, 99));
        sim.set_ticking(true);
        let mut rtc = Ds3231::new(sim);

        for _ in 0..20 {
            let read = rtc.read_time().unwrap();
            // The sim does not tick again until the next transaction
            let sim = rtc.release();
            assert_eq!(read, sim.now());
            rtc = Ds3231::new(sim);
        }
    }

    #[test]
    fn test_single_register_access() {
        let mut rtc = clock();
        rtc.write_register(reg::AGING, 0x12).unwrap();
        assert_eq!(rtc.read_register(reg::AGING).unwrap(), 0x12);

        let sim = rtc.release();
        assert_eq!(sim.last_write(), &[reg::AGING]);
        assert_eq!(sim.last_read_len(), 1);
    }

    #[test]
    fn test_enable_oscillator_clears_only_bit7() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::CONTROL, 0xFF);
        let mut rtc = Ds3231::new(sim);

        rtc.enable_oscillator(true).unwrap();
        assert_eq!(rtc.read_register(reg::CONTROL).unwrap(), 0x7F);
    }

    #[test]
    fn test_disable_oscillator_sets_only_bit7() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::CONTROL, 0x1C);
        let mut rtc = Ds3231::new(sim);

        rtc.enable_oscillator(false).unwrap();
        assert_eq!(rtc.read_register(reg::CONTROL).unwrap(), 0x9C);
    }

    #[test]
    fn test_oscillator_bit_isolation_all_values() {
        for initial in 0..=255u8 {
            let mut sim = SimulatedDs3231::new();
            sim.set_register(reg::CONTROL, initial);
            let mut rtc = Ds3231::new(sim);

            rtc.enable_oscillator(true).unwrap();
            assert_eq!(rtc.read_register(reg::CONTROL).unwrap(), initial & 0x7F);

            rtc.enable_oscillator(false).unwrap();
            assert_eq!(rtc.read_register(reg::CONTROL).unwrap(), initial | 0x80);
        }
    }

    #[test]
    fn test_init_enables_oscillator() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::CONTROL, control::EOSC | control::INTCN);
        let mut rtc = Ds3231::new(sim);

        rtc.init().unwrap();
        assert_eq!(rtc.read_register(reg::CONTROL).unwrap(), control::INTCN);
    }

    #[test]
    fn test_oscillator_stopped_flag() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::STATUS, status::OSF | status::EN32KHZ);
        let mut rtc = Ds3231::new(sim);

        assert!(rtc.is_oscillator_stopped().unwrap());
        // Querying does not clear it
        assert!(rtc.is_oscillator_stopped().unwrap());

        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::STATUS, status::EN32KHZ);
        let mut rtc = Ds3231::new(sim);
        assert!(!rtc.is_oscillator_stopped().unwrap());
    }

    #[test]
    fn test_read_temperature() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::TEMP_MSB, 0x19);
        sim.set_register(reg::TEMP_LSB, 0x00);
        let mut rtc = Ds3231::new(sim);
        assert_eq!(rtc.read_temperature().unwrap().celsius(), 25.0);

        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::TEMP_MSB, 0xFF);
        sim.set_register(reg::TEMP_LSB, 0xC0);
        let mut rtc = Ds3231::new(sim);
        assert_eq!(rtc.read_temperature().unwrap().celsius(), -0.25);
    }

    #[test]
    fn test_read_temperature_does_not_trigger_conversion() {
        let mut rtc = clock();
        rtc.read_temperature().unwrap();

        let sim = rtc.release();
        assert_eq!(sim.register(reg::CONTROL) & control::CONV, 0);
    }

    #[test]
    fn test_temperature_sensor_trait() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::TEMP_MSB, 0x19);
        sim.set_register(reg::TEMP_LSB, 0x80);
        let mut rtc = Ds3231::new(sim);

        assert_eq!(rtc.read_celsius_x10(), Ok(255));
        assert_eq!(rtc.read_celsius(), Ok(25));
    }

    #[test]
    fn test_start_conversion() {
        let mut rtc = clock();
        rtc.start_temperature_conversion().unwrap();

        let sim = rtc.release();
        assert_ne!(sim.register(reg::CONTROL) & control::CONV, 0);
    }

    #[test]
    fn test_start_conversion_when_busy() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::STATUS, status::BSY);
        let mut rtc = Ds3231::new(sim);

        assert_eq!(rtc.start_temperature_conversion(), Err(Ds3231Error::Busy));
        assert!(rtc.is_busy().unwrap());

        let sim = rtc.release();
        assert_eq!(sim.register(reg::CONTROL) & control::CONV, 0);
    }

    #[test]
    fn test_12_hour_mode_detection() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::HOURS, HOURS_12H | 0x12);
        let mut rtc = Ds3231::new(sim);
        assert!(rtc.is_12_hour_mode().unwrap());

        let mut rtc = clock();
        rtc.write_time(&DateTime::new(0, 0, 21, 1, 1, 1, 0)).unwrap();
        assert!(!rtc.is_12_hour_mode().unwrap());
    }

    #[test]
    fn test_aging_offset() {
        let mut rtc = clock();
        rtc.set_aging_offset(-5).unwrap();
        assert_eq!(rtc.read_aging_offset().unwrap(), -5);

        let sim = rtc.release();
        assert_eq!(sim.register(reg::AGING), 0xFB);
    }

    #[test]
    fn test_32khz_output_keeps_flags() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::STATUS, status::OSF | status::A1F);
        let mut rtc = Ds3231::new(sim);

        rtc.set_32khz_output(true).unwrap();
        let sim = rtc.release();
        assert_eq!(
            sim.register(reg::STATUS),
            status::OSF | status::A1F | status::EN32KHZ
        );

        let mut rtc = Ds3231::new(sim);
        rtc.set_32khz_output(false).unwrap();
        let sim = rtc.release();
        assert_eq!(sim.register(reg::STATUS), status::OSF | status::A1F);
    }

    #[test]
    fn test_bus_error_is_surfaced() {
        let mut sim = SimulatedDs3231::new();
        sim.fail_next();
        let mut rtc = Ds3231::new(sim);

        assert_eq!(rtc.read_time(), Err(Ds3231Error::Bus(SimError::Nack)));
        // No retry happened, the next call goes through
        assert!(rtc.read_time().is_ok());
    }

    #[test]
    fn test_failed_read_skips_write_back() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::CONTROL, 0x80);
        sim.fail_next();
        let mut rtc = Ds3231::new(sim);

        assert!(rtc.enable_oscillator(true).is_err());
        let sim = rtc.release();
        assert_eq!(sim.register(reg::CONTROL), 0x80);
        assert_eq!(sim.transactions(), 1);
    }

    #[test]
    fn test_wrong_address_nacks() {
        let mut rtc = Ds3231::with_address(SimulatedDs3231::new(), 0x57);
        assert_eq!(rtc.address(), 0x57);
        assert_eq!(
            rtc.read_register(reg::SECONDS),
            Err(Ds3231Error::Bus(SimError::Nack))
        );
    }

    #[test]
    fn test_handle_over_borrowed_bus() {
        let mut sim = SimulatedDs3231::new();
        {
            let mut rtc = Ds3231::new(&mut sim);
            rtc.write_time(&DateTime::new(1, 2, 3, 4, 5, 6, 7)).unwrap();
        }
        assert_eq!(sim.now(), DateTime::new(1, 2, 3, 4, 5, 6, 7));
    }

    #[test]
    fn test_recommended_bus() {
        assert_eq!(
            Ds3231::<SimulatedDs3231>::RECOMMENDED_BUS.frequency,
            100_000
        );
    }
}
