//! Binary-coded decimal conversion
//!
//! The DS3231 keeps its calendar registers in packed BCD: the high nibble
//! holds the tens digit and the low nibble the units digit.

/// Convert a packed BCD byte to binary
///
/// No validation: nibbles above 9 decode arithmetically (`0x1A` -> 20).
pub const fn bcd_to_bin(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Convert a binary value (0-99) to packed BCD
///
/// Values of 100 and above produce a tens nibble above 9; callers own
/// the range check.
pub const fn bin_to_bcd(bin: u8) -> u8 {
    ((bin / 10) << 4) | (bin % 10)
}
