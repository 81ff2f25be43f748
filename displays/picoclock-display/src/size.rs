//! Panel geometries
//!
//! SSD1306 modules come in a few sizes that share the controller but differ
//! in multiplex ratio, COM pin wiring and recommended contrast. Each size is
//! a zero-sized type so the framebuffer can be a plain array of the exact
//! length.

use crate::config::VccMode;

/// Geometry and panel-specific settings of an SSD1306 module
pub trait DisplaySize {
    /// Width in pixels
    const WIDTH: u8;
    /// Height in pixels
    const HEIGHT: u8;
    /// `SET_COM_PINS` argument for this panel's wiring
    const COM_PINS: u8;

    /// Number of 8-pixel pages
    const PAGES: usize = (Self::HEIGHT as usize + 7) / 8;
    /// Framebuffer length in bytes, one byte per column per page
    const BUFFER_LEN: usize = Self::WIDTH as usize * Self::PAGES;

    /// Owned framebuffer storage, exactly `BUFFER_LEN` bytes
    type Buffer: AsRef<[u8]> + AsMut<[u8]>;

    /// Zeroed framebuffer storage
    fn new_buffer() -> Self::Buffer;

    /// Power-on contrast for the given supply
    fn contrast(vcc: VccMode) -> u8;
}

/// 128x64 panel
#[derive(Debug, Clone, Copy)]
pub struct DisplaySize128x64;

impl DisplaySize for DisplaySize128x64 {
    const WIDTH: u8 = 128;
    const HEIGHT: u8 = 64;
    const COM_PINS: u8 = 0x12;

    type Buffer = [u8; 128 * 64 / 8];

    fn new_buffer() -> Self::Buffer {
        [0; 128 * 64 / 8]
    }

    fn contrast(vcc: VccMode) -> u8 {
        match vcc {
            VccMode::External => 0x9F,
            VccMode::SwitchCap => 0xCF,
        }
    }
}

/// 128x32 panel
#[derive(Debug, Clone, Copy)]
pub struct DisplaySize128x32;

impl DisplaySize for DisplaySize128x32 {
    const WIDTH: u8 = 128;
    const HEIGHT: u8 = 32;
    const COM_PINS: u8 = 0x02;

    type Buffer = [u8; 128 * 32 / 8];

    fn new_buffer() -> Self::Buffer {
        [0; 128 * 32 / 8]
    }

    fn contrast(_vcc: VccMode) -> u8 {
        0x8F
    }
}

/// 96x16 panel
#[derive(Debug, Clone, Copy)]
pub struct DisplaySize96x16;

impl DisplaySize for DisplaySize96x16 {
    const WIDTH: u8 = 96;
    const HEIGHT: u8 = 16;
    const COM_PINS: u8 = 0x02;

    type Buffer = [u8; 96 * 16 / 8];

    fn new_buffer() -> Self::Buffer {
        [0; 96 * 16 / 8]
    }

    fn contrast(vcc: VccMode) -> u8 {
        match vcc {
            VccMode::External => 0x10,
            VccMode::SwitchCap => 0xAF,
        }
    }
}
