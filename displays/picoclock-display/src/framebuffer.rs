//! Bit-packed monochrome framebuffer
//!
//! The SSD1306 page layout: each byte is a vertical strip of 8 pixels, least
//! significant bit on top, and pages of `WIDTH` bytes are stacked downwards.
//! Pixel `(x, y)` lives in byte `x + (y / 8) * WIDTH`, bit `y & 7`.
//!
//! Public coordinates are `i16`; everything off the panel is clipped away
//! silently. Internally spans are computed in `i32` so clipping arithmetic
//! cannot overflow.

use core::marker::PhantomData;

use crate::size::{DisplaySize, DisplaySize128x64};

/// Drawing color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off
    Clear,
    /// Pixel on
    #[default]
    Set,
    /// Flip the current pixel
    Invert,
}

impl Color {
    /// Apply to the bits of `byte` selected by `mask`
    #[inline]
    fn apply(self, byte: &mut u8, mask: u8) {
        match self {
            Color::Set => *byte |= mask,
            Color::Clear => *byte &= !mask,
            Color::Invert => *byte ^= mask,
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::Set
        } else {
            Color::Clear
        }
    }
}

/// Owned page-organized framebuffer for one panel
pub struct FrameBuffer<S: DisplaySize = DisplaySize128x64> {
    buffer: S::Buffer,
    _size: PhantomData<S>,
}

impl<S: DisplaySize> Default for FrameBuffer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DisplaySize> FrameBuffer<S> {
    /// Create a cleared framebuffer
    pub fn new() -> Self {
        Self {
            buffer: S::new_buffer(),
            _size: PhantomData,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> i16 {
        S::WIDTH as i16
    }

    /// Height in pixels
    pub fn height(&self) -> i16 {
        S::HEIGHT as i16
    }

    /// Raw page bytes, in the order the controller expects them
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    #[cfg(feature = "graphics")]
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut()
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.as_mut().fill(0);
    }

    /// Set, clear or invert one pixel
    pub fn set_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.put(x as i32, y as i32, color);
    }

    /// Read one pixel, `None` off the panel
    pub fn get_pixel(&self, x: i16, y: i16) -> Option<bool> {
        let (x, y) = (x as i32, y as i32);
        if !Self::contains(x, y) {
            return None;
        }
        let byte = self.buffer.as_ref()[Self::index(x, y)];
        Some(byte & (1 << (y & 7)) != 0)
    }

    /// Horizontal line of `w` pixels starting at `(x, y)`
    pub fn draw_hline(&mut self, x: i16, y: i16, w: i16, color: Color) {
        self.hspan(x as i32, y as i32, w as i32, color);
    }

    /// Vertical line of `h` pixels starting at `(x, y)`
    pub fn draw_vline(&mut self, x: i16, y: i16, h: i16, color: Color) {
        self.vspan(x as i32, y as i32, h as i32, color);
    }

    fn contains(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < S::WIDTH as i32 && y < S::HEIGHT as i32
    }

    /// Byte index of an on-panel pixel
    fn index(x: i32, y: i32) -> usize {
        (x + (y / 8) * S::WIDTH as i32) as usize
    }

    pub(crate) fn put(&mut self, x: i32, y: i32, color: Color) {
        if !Self::contains(x, y) {
            return;
        }
        let index = Self::index(x, y);
        color.apply(&mut self.buffer.as_mut()[index], 1 << (y & 7));
    }

    pub(crate) fn hspan(&mut self, mut x: i32, y: i32, mut w: i32, color: Color) {
        let width = S::WIDTH as i32;
        if y < 0 || y >= S::HEIGHT as i32 {
            return;
        }
        if x < 0 {
            w += x;
            x = 0;
        }
        if x + w > width {
            w = width - x;
        }
        if w <= 0 {
            return;
        }

        let start = Self::index(x, y);
        let mask = 1u8 << (y & 7);
        for byte in &mut self.buffer.as_mut()[start..start + w as usize] {
            color.apply(byte, mask);
        }
    }

    pub(crate) fn vspan(&mut self, x: i32, mut y: i32, mut h: i32, color: Color) {
        let height = S::HEIGHT as i32;
        if x < 0 || x >= S::WIDTH as i32 {
            return;
        }
        if y < 0 {
            h += y;
            y = 0;
        }
        if y + h > height {
            h = height - y;
        }
        if h <= 0 {
            return;
        }

        let stride = S::WIDTH as usize;
        let buf = self.buffer.as_mut();
        let mut index = Self::index(x, y);

        // Leading partial page
        let offset = y & 7;
        if offset != 0 {
            let room = 8 - offset;
            let mut mask = !(0xFFu8 >> room);
            if h < room {
                mask &= 0xFF >> (room - h);
            }
            color.apply(&mut buf[index], mask);
            h -= room;
            index += stride;
        }

        // Whole pages
        while h >= 8 {
            color.apply(&mut buf[index], 0xFF);
            h -= 8;
            index += stride;
        }

        // Trailing partial page
        if h > 0 {
            color.apply(&mut buf[index], (1u8 << h) - 1);
        }
    }
}
