//! SSD1306 OLED display support for Picoclock
//!
//! This crate provides:
//! - `FrameBuffer`: bit-packed page framebuffer with line, rectangle and
//!   circle rasterization
//! - `TextCursor` and a 5x7 font for text rendering
//! - `Ssd1306`: I2C driver owning a framebuffer, with the power-on sequence,
//!   frame flush, contrast and inversion control
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │               Ssd1306<I2C, S>            │
//! │  cursor / contrast / command sequences   │
//! └──────────────┬────────────────┬──────────┘
//!                │                │
//!        ┌───────▼───────┐  ┌─────▼──────────┐
//!        │ FrameBuffer<S>│  │ I2cBus (hal)   │
//!        │ raster / text │  │ 0x00 cmd       │
//!        └───────────────┘  │ 0x40 data      │
//!                           └────────────────┘
//! ```
//!
//! Panel geometry is a type parameter (`DisplaySize128x64` by default), so
//! the framebuffer is an array of exactly the right size and nothing is
//! allocated.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod config;
pub mod font;
pub mod framebuffer;
pub mod raster;
pub mod size;
pub mod ssd1306;
pub mod text;

#[cfg(feature = "graphics")]
mod graphics;

#[cfg(test)]
mod testing;

// Re-export key types
pub use config::{DisplayConfig, VccMode};
pub use framebuffer::{Color, FrameBuffer};
pub use raster::Corners;
pub use size::{DisplaySize, DisplaySize128x32, DisplaySize128x64, DisplaySize96x16};
pub use ssd1306::Ssd1306;
pub use text::TextCursor;
