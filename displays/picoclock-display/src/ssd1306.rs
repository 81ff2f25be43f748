//! SSD1306 OLED Display Driver
//!
//! Driver for SSD1306-based monochrome OLED modules via I2C. All drawing
//! happens in an owned framebuffer; [`Ssd1306::flush`] streams it to the
//! panel in one transfer.
//!
//! The display is best effort: bus errors on command and data writes are
//! logged (with the `defmt` feature) and otherwise ignored, so a missing or
//! flaky panel never stops the caller.

use core::fmt;

use picoclock_hal::{I2cBus, I2cConfig};

use crate::command::{self, cmd, Command, Panel, COMMAND_MODE, DATA_MODE};
use crate::config::{DisplayConfig, VccMode};
use crate::framebuffer::{Color, FrameBuffer};
use crate::raster::Corners;
use crate::size::{DisplaySize, DisplaySize128x64};
use crate::text::TextCursor;

/// SSD1306 OLED driver
pub struct Ssd1306<I2C, S: DisplaySize = DisplaySize128x64> {
    i2c: I2C,
    address: u8,
    vcc: VccMode,
    /// Contrast restored by `dim(false)`
    contrast: u8,
    buffer: FrameBuffer<S>,
    cursor: TextCursor,
}

impl<I2C, S: DisplaySize> Ssd1306<I2C, S> {
    /// Default I2C address (SA0 low)
    pub const DEFAULT_ADDRESS: u8 = 0x3C;

    /// Bus speed the controller is rated for
    pub const RECOMMENDED_BUS: I2cConfig = I2cConfig::FAST;

    /// Create a driver with a cleared framebuffer
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(i2c: I2C, config: DisplayConfig) -> Self {
        Self {
            i2c,
            address: config.address,
            vcc: config.vcc,
            contrast: S::contrast(config.vcc),
            buffer: FrameBuffer::new(),
            cursor: TextCursor::new(),
        }
    }

    /// Give the bus back, dropping the framebuffer
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn width(&self) -> i16 {
        self.buffer.width()
    }

    pub fn height(&self) -> i16 {
        self.buffer.height()
    }

    /// Currently stored contrast
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    pub fn framebuffer(&self) -> &FrameBuffer<S> {
        &self.buffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<S> {
        &mut self.buffer
    }

    /// Clear the frame buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn draw_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.buffer.set_pixel(x, y, color);
    }

    pub fn get_pixel(&self, x: i16, y: i16) -> Option<bool> {
        self.buffer.get_pixel(x, y)
    }

    pub fn draw_hline(&mut self, x: i16, y: i16, w: i16, color: Color) {
        self.buffer.draw_hline(x, y, w, color);
    }

    pub fn draw_vline(&mut self, x: i16, y: i16, h: i16, color: Color) {
        self.buffer.draw_vline(x, y, h, color);
    }

    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        self.buffer.draw_line(x0, y0, x1, y1, color);
    }

    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        self.buffer.draw_rect(x, y, w, h, color);
    }

    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        self.buffer.fill_rect(x, y, w, h, color);
    }

    pub fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) {
        self.buffer.draw_circle(x0, y0, r, color);
    }

    pub fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) {
        self.buffer.fill_circle(x0, y0, r, color);
    }

    pub fn fill_circle_quadrants(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        corners: Corners,
        delta: i16,
        color: Color,
    ) {
        self.buffer
            .fill_circle_quadrants(x0, y0, r, corners, delta, color);
    }

    pub fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: Color) {
        self.buffer.fill_round_rect(x, y, w, h, r, color);
    }

    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor.set_position(x, y);
    }

    pub fn cursor(&self) -> (i16, i16) {
        self.cursor.position()
    }

    /// Text magnification; 0 is treated as 1
    pub fn set_text_size(&mut self, scale: u8) {
        self.cursor.set_scale(scale);
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.cursor.set_color(color);
    }

    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.cursor.set_wrap(wrap);
    }

    /// Render one byte at the cursor; `false` if it has no glyph
    pub fn write_byte(&mut self, c: u8) -> bool {
        self.cursor.write(&mut self.buffer, c)
    }

    /// Render a string at the cursor
    ///
    /// There is no overall result; bytes without a glyph are skipped.
    pub fn print(&mut self, s: &str) {
        self.cursor.print(&mut self.buffer, s);
    }

    /// Render a string, then move to the start of the next line
    pub fn println(&mut self, s: &str) {
        self.print(s);
        self.write_byte(b'\n');
    }

    /// Move the cursor to `(x, y)` and render a string
    pub fn draw_string(&mut self, x: i16, y: i16, s: &str) {
        self.set_cursor(x, y);
        self.print(s);
    }

    fn panel(&self) -> Panel {
        Panel {
            width: S::WIDTH,
            height: S::HEIGHT,
            com_pins: S::COM_PINS,
            contrast: self.contrast,
            vcc: self.vcc,
        }
    }
}

impl<I2C, S> Ssd1306<I2C, S>
where
    I2C: I2cBus,
    S: DisplaySize,
{
    /// Clear the framebuffer and run the power-on sequence
    ///
    /// Resets the stored contrast to the panel default for the configured
    /// supply. The panel RAM is not written until the next flush.
    pub fn init(&mut self) {
        self.buffer.clear();
        self.contrast = S::contrast(self.vcc);
        self.send_sequence(command::INIT_SEQUENCE);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "SSD1306 {}x{} at {=u8:#x} initialized",
            S::WIDTH,
            S::HEIGHT,
            self.address
        );
    }

    /// Send the framebuffer to the panel
    pub fn flush(&mut self) {
        self.send_sequence(command::FLUSH_SEQUENCE);

        if self
            .i2c
            .write_prefixed(self.address, DATA_MODE, self.buffer.as_bytes())
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("SSD1306 frame transfer failed");
        }
    }

    /// Swap lit and dark pixels in hardware; RAM is unchanged
    pub fn invert(&mut self, inverted: bool) {
        self.command(if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        });
    }

    /// Drop contrast to zero, or restore the stored contrast
    pub fn dim(&mut self, dimmed: bool) {
        let level = if dimmed { 0 } else { self.contrast };
        self.command(cmd::SET_CONTRAST);
        self.command(level);
    }

    /// Set and remember the contrast
    pub fn set_contrast(&mut self, contrast: u8) {
        self.contrast = contrast;
        self.command(cmd::SET_CONTRAST);
        self.command(contrast);
    }

    /// Switch the panel on or off; RAM is retained while off
    pub fn set_display_on(&mut self, on: bool) {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF });
    }

    /// Send a command table, one bus write per byte
    pub fn send_sequence(&mut self, sequence: &[Command]) {
        let panel = self.panel();
        for byte in command::sequence_bytes(sequence, &panel) {
            self.command(byte);
        }
    }

    fn command(&mut self, c: u8) {
        if self.i2c.write(self.address, &[COMMAND_MODE, c]).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SSD1306 command {=u8:#x} not acknowledged", c);
        }
    }
}

impl<I2C, S: DisplaySize> fmt::Write for Ssd1306<I2C, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}
