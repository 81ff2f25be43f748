//! DS3231 register map and time-register codec

use picoclock_core::DateTime;

use super::bcd::{bcd_to_bin, bin_to_bcd};

/// DS3231 register addresses
pub mod reg {
    /// Seconds (BCD, 0-59)
    pub const SECONDS: u8 = 0x00;
    /// Minutes (BCD, 0-59)
    pub const MINUTES: u8 = 0x01;
    /// Hours (BCD) plus 12/24 and AM/PM bits
    pub const HOURS: u8 = 0x02;
    /// Day of week (1-7, binary)
    pub const WEEKDAY: u8 = 0x03;
    /// Day of month (BCD, 1-31)
    pub const DATE: u8 = 0x04;
    /// Month (BCD, 1-12) plus century bit
    pub const MONTH: u8 = 0x05;
    /// Year (BCD, 0-99)
    pub const YEAR: u8 = 0x06;
    /// Alarm 1 seconds
    pub const ALARM1_SECONDS: u8 = 0x07;
    /// Alarm 1 minutes
    pub const ALARM1_MINUTES: u8 = 0x08;
    /// Alarm 1 hours
    pub const ALARM1_HOURS: u8 = 0x09;
    /// Alarm 1 day/date
    pub const ALARM1_DAY: u8 = 0x0A;
    /// Alarm 2 minutes
    pub const ALARM2_MINUTES: u8 = 0x0B;
    /// Alarm 2 hours
    pub const ALARM2_HOURS: u8 = 0x0C;
    /// Alarm 2 day/date
    pub const ALARM2_DAY: u8 = 0x0D;
    /// Control register
    pub const CONTROL: u8 = 0x0E;
    /// Control/status register
    pub const STATUS: u8 = 0x0F;
    /// Aging offset (two's complement)
    pub const AGING: u8 = 0x10;
    /// Temperature integer part (two's complement)
    pub const TEMP_MSB: u8 = 0x11;
    /// Temperature fraction in bits 7:6
    pub const TEMP_LSB: u8 = 0x12;
}

/// Control register bits
pub mod control {
    /// Enable oscillator, active low
    pub const EOSC: u8 = 1 << 7;
    /// Battery-backed square wave enable
    pub const BBSQW: u8 = 1 << 6;
    /// Start a temperature conversion
    pub const CONV: u8 = 1 << 5;
    /// Square wave rate select 2
    pub const RS2: u8 = 1 << 4;
    /// Square wave rate select 1
    pub const RS1: u8 = 1 << 3;
    /// Interrupt control
    pub const INTCN: u8 = 1 << 2;
    /// Alarm 2 interrupt enable
    pub const A2IE: u8 = 1 << 1;
    /// Alarm 1 interrupt enable
    pub const A1IE: u8 = 1 << 0;
}

/// Status register bits
pub mod status {
    /// Oscillator stop flag (sticky)
    pub const OSF: u8 = 1 << 7;
    /// 32 kHz output enable
    pub const EN32KHZ: u8 = 1 << 3;
    /// Temperature conversion in progress
    pub const BSY: u8 = 1 << 2;
    /// Alarm 2 flag
    pub const A2F: u8 = 1 << 1;
    /// Alarm 1 flag
    pub const A1F: u8 = 1 << 0;
}

/// Hours register bit selecting 12-hour mode
pub const HOURS_12H: u8 = 1 << 6;

/// Number of timekeeping registers read/written in one burst
pub const TIME_LEN: usize = 7;

const SECONDS_MASK: u8 = 0x7F;
const MINUTES_MASK: u8 = 0x7F;
const HOURS_MASK: u8 = 0x3F;
const WEEKDAY_MASK: u8 = 0x07;
const DATE_MASK: u8 = 0x3F;
const MONTH_MASK: u8 = 0x1F;

/// Decode the seven timekeeping registers, starting at [`reg::SECONDS`]
///
/// Hours are decoded as 24-hour values.
pub fn decode_time(raw: &[u8; TIME_LEN]) -> DateTime {
    DateTime {
        seconds: bcd_to_bin(raw[0] & SECONDS_MASK),
        minutes: bcd_to_bin(raw[1] & MINUTES_MASK),
        hours: bcd_to_bin(raw[2] & HOURS_MASK),
        // Weekday is stored as a plain 1-7 counter
        weekday: raw[3] & WEEKDAY_MASK,
        date: bcd_to_bin(raw[4] & DATE_MASK),
        month: bcd_to_bin(raw[5] & MONTH_MASK),
        year: bcd_to_bin(raw[6]),
    }
}

/// Encode a time record into the seven timekeeping registers
///
/// Fields are not range checked. The weekday is masked to its 3-bit field.
pub fn encode_time(time: &DateTime) -> [u8; TIME_LEN] {
    [
        bin_to_bcd(time.seconds),
        bin_to_bcd(time.minutes),
        bin_to_bcd(time.hours),
        time.weekday & WEEKDAY_MASK,
        bin_to_bcd(time.date),
        bin_to_bcd(time.month),
        bin_to_bcd(time.year),
    ]
}
