//! `embedded-graphics` integration
//!
//! Lets the framebuffer (and the display owning it) act as a draw target
//! for the embedded-graphics primitives, fonts and images.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::framebuffer::{Color, FrameBuffer};
use crate::size::DisplaySize;
use crate::ssd1306::Ssd1306;

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        Color::from(color.is_on())
    }
}

impl<S: DisplaySize> OriginDimensions for FrameBuffer<S> {
    fn size(&self) -> Size {
        Size::new(S::WIDTH as u32, S::HEIGHT as u32)
    }
}

impl<S: DisplaySize> DrawTarget for FrameBuffer<S> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.put(x, y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        self.as_bytes_mut().fill(fill);
        Ok(())
    }
}

impl<I2C, S: DisplaySize> OriginDimensions for Ssd1306<I2C, S> {
    fn size(&self) -> Size {
        self.framebuffer().size()
    }
}

impl<I2C, S: DisplaySize> DrawTarget for Ssd1306<I2C, S> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer_mut().draw_iter(pixels)
    }
}
