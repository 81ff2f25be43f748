//! Text cursor and glyph rendering

use crate::font::{self, ADVANCE, LINE_HEIGHT};
use crate::framebuffer::{Color, FrameBuffer};
use crate::size::DisplaySize;

/// Text drawing state: position, scale, color and wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCursor {
    x: i16,
    y: i16,
    scale: u8,
    color: Color,
    wrap: bool,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            scale: 1,
            color: Color::Set,
            wrap: true,
        }
    }
}

impl TextCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the top-left corner of the next glyph
    pub fn set_position(&mut self, x: i16, y: i16) {
        self.x = x;
        self.y = y;
    }

    pub fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    /// Integer magnification; 0 is treated as 1
    pub fn set_scale(&mut self, scale: u8) {
        self.scale = scale.max(1);
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Wrap to the next line when a glyph would not fit
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Render one byte at the cursor and advance
    ///
    /// `\n` moves to the start of the next line and `\r` to the start of the
    /// current one. Returns `false`, leaving the cursor alone, for bytes the
    /// font has no glyph for.
    pub fn write<S: DisplaySize>(&mut self, fb: &mut FrameBuffer<S>, c: u8) -> bool {
        let scale = self.scale as i16;
        match c {
            b'\n' => {
                self.x = 0;
                self.y = self.y.saturating_add(LINE_HEIGHT * scale);
                true
            }
            b'\r' => {
                self.x = 0;
                true
            }
            _ => {
                let Some(glyph) = font::glyph(c) else {
                    return false;
                };
                self.blit(fb, glyph);

                self.x = self.x.saturating_add(ADVANCE * scale);
                if self.wrap && self.x > fb.width() - ADVANCE * scale {
                    self.x = 0;
                    self.y = self.y.saturating_add(LINE_HEIGHT * scale);
                }
                true
            }
        }
    }

    /// Render every byte of `s`
    ///
    /// Bytes without a glyph (including every byte of a multi-byte UTF-8
    /// character) are skipped.
    pub fn print<S: DisplaySize>(&mut self, fb: &mut FrameBuffer<S>, s: &str) {
        for c in s.bytes() {
            self.write(fb, c);
        }
    }

    fn blit<S: DisplaySize>(&self, fb: &mut FrameBuffer<S>, glyph: &[u8; font::GLYPH_WIDTH]) {
        let (x, y) = (self.x as i32, self.y as i32);
        let scale = self.scale as i32;

        for (i, &column) in glyph.iter().enumerate() {
            let mut bits = column;
            for j in 0..8 {
                if bits & 1 != 0 {
                    let (px, py) = (x + i as i32 * scale, y + j * scale);
                    if scale == 1 {
                        fb.put(px, py, self.color);
                    } else {
                        fb.fill_area(px, py, scale, scale, self.color);
                    }
                }
                bits >>= 1;
            }
        }
    }
}
