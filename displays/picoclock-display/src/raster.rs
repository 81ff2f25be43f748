//! Line, rectangle and circle rasterization
//!
//! Integer-only algorithms drawing through the framebuffer's clipped pixel and
//! span writers, so any shape may lie partly or wholly off the panel.

use core::mem::swap;

use crate::framebuffer::{Color, FrameBuffer};
use crate::size::DisplaySize;

/// Circle halves selected for [`FrameBuffer::fill_circle_quadrants`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Corners(u8);

impl Corners {
    /// Spans right of the centre column
    pub const RIGHT: Self = Self(1);
    /// Spans left of the centre column
    pub const LEFT: Self = Self(2);
    /// Both halves
    pub const BOTH: Self = Self(3);

    fn right(self) -> bool {
        self.0 & Self::RIGHT.0 != 0
    }

    fn left(self) -> bool {
        self.0 & Self::LEFT.0 != 0
    }
}

impl<S: DisplaySize> FrameBuffer<S> {
    /// Line between two points (Bresenham), both ends inclusive
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: Color) {
        let (mut x0, mut y0, mut x1, mut y1) = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            swap(&mut x0, &mut y0);
            swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            swap(&mut x0, &mut x1);
            swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };
        let mut err = dx / 2;

        while x0 <= x1 {
            if steep {
                self.put(y0, x0, color);
            } else {
                self.put(x0, y0, color);
            }
            err -= dy;
            if err < 0 {
                y0 += ystep;
                err += dx;
            }
            x0 += 1;
        }
    }

    /// Rectangle outline
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        let (x, y, w, h) = (x as i32, y as i32, w as i32, h as i32);
        self.hspan(x, y, w, color);
        self.hspan(x, y + h - 1, w, color);
        self.vspan(x, y, h, color);
        self.vspan(x + w - 1, y, h, color);
    }

    /// Filled rectangle
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) {
        self.fill_area(x as i32, y as i32, w as i32, h as i32, color);
    }

    /// Circle outline (midpoint algorithm)
    pub fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) {
        let (x0, y0, r) = (x0 as i32, y0 as i32, r as i32);
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.put(x0, y0 + r, color);
        self.put(x0, y0 - r, color);
        self.put(x0 + r, y0, color);
        self.put(x0 - r, y0, color);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.put(x0 + x, y0 + y, color);
            self.put(x0 - x, y0 + y, color);
            self.put(x0 + x, y0 - y, color);
            self.put(x0 - x, y0 - y, color);
            self.put(x0 + y, y0 + x, color);
            self.put(x0 - y, y0 + x, color);
            self.put(x0 + y, y0 - x, color);
            self.put(x0 - y, y0 - x, color);
        }
    }

    /// Filled circle
    pub fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: Color) {
        let (x0, y0, r) = (x0 as i32, y0 as i32, r as i32);
        self.vspan(x0, y0 - r, 2 * r + 1, color);
        self.quadrant_spans(x0, y0, r, Corners::BOTH, 0, color);
    }

    /// Vertical spans of the selected circle halves, centre column excluded
    ///
    /// Each span is stretched downwards by `delta` pixels, which turns two
    /// half circles into the rounded ends of a taller shape. No pixel is
    /// written twice, so [`Color::Invert`] renders the same shape as
    /// [`Color::Set`].
    pub fn fill_circle_quadrants(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        corners: Corners,
        delta: i16,
        color: Color,
    ) {
        self.quadrant_spans(x0 as i32, y0 as i32, r as i32, corners, delta as i32, color);
    }

    /// Filled rectangle with rounded ends
    ///
    /// The radius is clamped to half the shorter side, so `r = h / 2` on a
    /// wide rectangle gives a pill shape.
    pub fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: Color) {
        let (x, y, w, h) = (x as i32, y as i32, w as i32, h as i32);
        if w <= 0 || h <= 0 {
            return;
        }
        let r = (r as i32).clamp(0, w.min(h) / 2);
        let delta = h - 2 * r - 1;

        self.fill_area(x + r, y, w - 2 * r, h, color);
        self.quadrant_spans(x + w - r - 1, y + r, r, Corners::RIGHT, delta, color);
        self.quadrant_spans(x + r, y + r, r, Corners::LEFT, delta, color);
    }

    pub(crate) fn fill_area(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        // Columns off the panel would be no-ops anyway
        let start = x.max(0);
        let end = (x + w).min(S::WIDTH as i32);
        for column in start..end {
            self.vspan(column, y, h, color);
        }
    }

    fn quadrant_spans(
        &mut self,
        x0: i32,
        y0: i32,
        r: i32,
        corners: Corners,
        delta: i32,
        color: Color,
    ) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;
        let mut px = x;
        let mut py = y;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            // Columns at +-x, skipped once the octants meet
            if x < y + 1 {
                if corners.right() {
                    self.vspan(x0 + x, y0 - y, 2 * y + 1 + delta, color);
                }
                if corners.left() {
                    self.vspan(x0 - x, y0 - y, 2 * y + 1 + delta, color);
                }
            }
            // Columns at +-py, once per distinct y
            if y != py {
                if corners.right() {
                    self.vspan(x0 + py, y0 - px, 2 * px + 1 + delta, color);
                }
                if corners.left() {
                    self.vspan(x0 - py, y0 - px, 2 * px + 1 + delta, color);
                }
                py = y;
            }
            px = x;
        }
    }
}
