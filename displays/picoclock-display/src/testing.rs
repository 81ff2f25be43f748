//! Recording I2C bus for driver tests

use picoclock_hal::I2cBus;
use std::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

/// Keeps every write transaction and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Fail every transaction while set
    pub failing: bool,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Second byte of every `[0x00, cmd]` write, in order
    pub fn commands(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(_, w)| w.len() == 2 && w[0] == 0x00)
            .map(|(_, w)| w[1])
            .collect()
    }
}

impl I2cBus for RecordingBus {
    type Error = Nack;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        if self.failing {
            return Err(Nack);
        }
        self.writes.push((address, data.to_vec()));
        Ok(())
    }

    fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), Self::Error> {
        Err(Nack)
    }

    fn write_read(
        &mut self,
        _address: u8,
        _write_data: &[u8],
        _read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        Err(Nack)
    }

    fn write_prefixed(&mut self, address: u8, prefix: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut frame = Vec::with_capacity(data.len() + 1);
        frame.push(prefix);
        frame.extend_from_slice(data);
        self.write(address, &frame)
    }
}
