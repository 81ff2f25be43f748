//! Simulated DS3231 for driver tests
//!
//! Models the parts of the chip the driver depends on: the register file,
//! the auto-incrementing register pointer, the read buffer latched on START
//! and the write-0-to-clear status flags. The clock can be made to advance
//! one second before every transaction to provoke carries between reads.

use heapless::Vec;
use picoclock_core::DateTime;
use picoclock_hal::I2cBus;

use super::registers::{self, reg, status, TIME_LEN};

const REGISTER_COUNT: usize = reg::TEMP_LSB as usize + 1;

/// Power-on register contents (control: INTCN | RS2 | RS1, status: OSF | EN32kHz)
const POWER_ON_CONTROL: u8 = 0x1C;
const POWER_ON_STATUS: u8 = 0x88;

/// Status bits that can only be cleared by writing 0
const STICKY_FLAGS: u8 = status::OSF | status::A2F | status::A1F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Address not acknowledged
    Nack,
}

#[derive(Debug)]
pub struct SimulatedDs3231 {
    registers: [u8; REGISTER_COUNT],
    /// Copy of the time registers taken at the start of a transaction
    latched: [u8; TIME_LEN],
    pointer: u8,
    ticking: bool,
    fail_next: bool,
    transactions: usize,
    last_write: Vec<u8, 16>,
    last_read_len: usize,
}

impl SimulatedDs3231 {
    pub fn new() -> Self {
        let mut registers = [0u8; REGISTER_COUNT];
        registers[reg::WEEKDAY as usize] = 1;
        registers[reg::DATE as usize] = 0x01;
        registers[reg::MONTH as usize] = 0x01;
        registers[reg::CONTROL as usize] = POWER_ON_CONTROL;
        registers[reg::STATUS as usize] = POWER_ON_STATUS;

        Self {
            registers,
            latched: [0; TIME_LEN],
            pointer: 0,
            ticking: false,
            fail_next: false,
            transactions: 0,
            last_write: Vec::new(),
            last_read_len: 0,
        }
    }

    /// Advance the clock by one second before each transaction
    pub fn set_ticking(&mut self, ticking: bool) {
        self.ticking = ticking;
    }

    /// Make the next transaction fail with a NACK
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    pub fn set_time(&mut self, time: &DateTime) {
        let raw = registers::encode_time(time);
        self.registers[..TIME_LEN].copy_from_slice(&raw);
    }

    /// Current live time
    pub fn now(&self) -> DateTime {
        let mut raw = [0u8; TIME_LEN];
        raw.copy_from_slice(&self.registers[..TIME_LEN]);
        registers::decode_time(&raw)
    }

    pub fn set_register(&mut self, register: u8, value: u8) {
        self.registers[register as usize] = value;
    }

    pub fn register(&self, register: u8) -> u8 {
        self.registers[register as usize]
    }

    /// Number of bus transactions seen, failed ones included
    pub fn transactions(&self) -> usize {
        self.transactions
    }

    /// Bytes of the most recent write phase
    pub fn last_write(&self) -> &[u8] {
        &self.last_write
    }

    /// Length of the most recent read phase
    pub fn last_read_len(&self) -> usize {
        self.last_read_len
    }

    /// START condition: tick, then latch the time registers
    fn begin(&mut self, address: u8) -> Result<(), SimError> {
        self.transactions += 1;
        if self.ticking {
            self.tick();
        }
        if self.fail_next || address != 0x68 {
            self.fail_next = false;
            return Err(SimError::Nack);
        }
        self.latched.copy_from_slice(&self.registers[..TIME_LEN]);
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) {
        self.last_write.clear();
        let _ = self.last_write.extend_from_slice(data);

        let Some((&pointer, payload)) = data.split_first() else {
            return;
        };
        self.pointer = pointer;
        for &value in payload {
            self.store(self.pointer, value);
            self.advance_pointer();
        }
    }

    fn read_bytes(&mut self, buf: &mut [u8]) {
        self.last_read_len = buf.len();
        for byte in buf.iter_mut() {
            let index = self.pointer as usize;
            *byte = if index < TIME_LEN {
                self.latched[index]
            } else {
                self.registers[index]
            };
            self.advance_pointer();
        }
    }

    fn store(&mut self, register: u8, value: u8) {
        let slot = &mut self.registers[register as usize];
        *slot = match register {
            reg::STATUS => {
                let flags = *slot & value & STICKY_FLAGS;
                let busy = *slot & status::BSY;
                flags | busy | (value & !(STICKY_FLAGS | status::BSY))
            }
            // Temperature registers are read-only
            reg::TEMP_MSB | reg::TEMP_LSB => *slot,
            _ => value,
        };
    }

    fn advance_pointer(&mut self) {
        self.pointer = (self.pointer + 1) % REGISTER_COUNT as u8;
    }

    fn tick(&mut self) {
        let mut t = self.now();
        t.seconds += 1;
        if t.seconds == 60 {
            t.seconds = 0;
            t.minutes += 1;
        }
        if t.minutes == 60 {
            t.minutes = 0;
            t.hours += 1;
        }
        if t.hours == 24 {
            t.hours = 0;
            t.weekday = t.weekday % 7 + 1;
            t.date += 1;
        }
        // Every month has 31 days here; enough for carry tests
        if t.date == 32 {
            t.date = 1;
            t.month += 1;
        }
        if t.month == 13 {
            t.month = 1;
            t.year = (t.year + 1) % 100;
        }
        self.set_time(&t);
    }
}

impl I2cBus for SimulatedDs3231 {
    type Error = SimError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.begin(address)?;
        self.write_bytes(data);
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.begin(address)?;
        self.read_bytes(buf);
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.begin(address)?;
        self.write_bytes(write_data);
        self.read_bytes(read_buf);
        Ok(())
    }

    fn write_prefixed(&mut self, address: u8, prefix: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut buf: Vec<u8, 16> = Vec::new();
        let _ = buf.push(prefix);
        let _ = buf.extend_from_slice(data);
        self.write(address, &buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtc::bcd::bin_to_bcd;

    #[test]
    fn test_tick_carries_through_year() {
        let mut sim = SimulatedDs3231::new();
        sim.set_time(&DateTime::new(59, 59, 23, 7, 31, 12, 99));
        sim.tick();
        assert_eq!(sim.now(), DateTime::new(0, 0, 0, 1, 1, 1, 0));
        assert_eq!(sim.register(reg::MONTH), bin_to_bcd(1));
    }

    #[test]
    fn test_status_flags_only_clear() {
        let mut sim = SimulatedDs3231::new();
        sim.set_register(reg::STATUS, status::A1F);
        sim.store(reg::STATUS, status::OSF);
        assert_eq!(sim.register(reg::STATUS), 0);
    }
}
