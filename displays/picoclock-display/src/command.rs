//! SSD1306 command set and command sequences
//!
//! Every I2C write to the controller begins with a control byte selecting
//! the command stream ([`COMMAND_MODE`]) or display RAM ([`DATA_MODE`]).
//! Multi-step procedures are described as tables of [`Command`]s whose
//! arguments are resolved against the [`Panel`] they are sent to.

use crate::config::VccMode;

/// Control byte: the following bytes are commands
pub const COMMAND_MODE: u8 = 0x00;
/// Control byte: the following bytes are display RAM data
pub const DATA_MODE: u8 = 0x40;

/// SSD1306 opcodes
pub mod cmd {
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_SEG_REMAP: u8 = 0xA0;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const DISPLAY_ALL_ON: u8 = 0xA5;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_COM_SCAN_INC: u8 = 0xC0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
}

/// Horizontal addressing: the column pointer wraps into the next page
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// Everything a command argument may depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Panel {
    pub width: u8,
    pub height: u8,
    pub com_pins: u8,
    pub contrast: u8,
    pub vcc: VccMode,
}

/// A command argument, fixed or derived from the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Param {
    Byte(u8),
    /// Height - 1
    MultiplexRatio,
    /// Width - 1
    LastColumn,
    ComPins,
    Contrast,
    ChargePump,
    Precharge,
}

impl Param {
    pub fn resolve(self, panel: &Panel) -> u8 {
        match self {
            Param::Byte(value) => value,
            Param::MultiplexRatio => panel.height.wrapping_sub(1),
            Param::LastColumn => panel.width.wrapping_sub(1),
            Param::ComPins => panel.com_pins,
            Param::Contrast => panel.contrast,
            Param::ChargePump => panel.vcc.charge_pump(),
            Param::Precharge => panel.vcc.precharge(),
        }
    }
}

/// One opcode and its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub opcode: u8,
    pub params: &'static [Param],
}

impl Command {
    pub const fn new(opcode: u8) -> Self {
        Self {
            opcode,
            params: &[],
        }
    }

    pub const fn with(opcode: u8, params: &'static [Param]) -> Self {
        Self { opcode, params }
    }

    /// Opcode followed by resolved arguments
    pub fn bytes<'a>(&'a self, panel: &'a Panel) -> impl Iterator<Item = u8> + 'a {
        core::iter::once(self.opcode).chain(self.params.iter().map(move |p| p.resolve(panel)))
    }
}

/// Power-on configuration, ending with the panel switched on
pub const INIT_SEQUENCE: &[Command] = &[
    Command::new(cmd::DISPLAY_OFF),
    Command::with(cmd::SET_CLOCK_DIV, &[Param::Byte(0x80)]),
    Command::with(cmd::SET_MUX_RATIO, &[Param::MultiplexRatio]),
    Command::with(cmd::SET_DISPLAY_OFFSET, &[Param::Byte(0x00)]),
    Command::new(cmd::SET_START_LINE),
    Command::with(cmd::SET_CHARGE_PUMP, &[Param::ChargePump]),
    Command::with(cmd::SET_MEMORY_MODE, &[Param::Byte(MEMORY_MODE_HORIZONTAL)]),
    // Column 127 mapped to SEG0, COM scan bottom up: panel mounted rotated
    Command::new(cmd::SET_SEG_REMAP | 0x01),
    Command::new(cmd::SET_COM_SCAN_DEC),
    Command::with(cmd::SET_COM_PINS, &[Param::ComPins]),
    Command::with(cmd::SET_CONTRAST, &[Param::Contrast]),
    Command::with(cmd::SET_PRECHARGE, &[Param::Precharge]),
    Command::with(cmd::SET_VCOM_DETECT, &[Param::Byte(0x40)]),
    Command::new(cmd::DISPLAY_ALL_ON_RESUME),
    Command::new(cmd::SET_NORMAL),
    Command::new(cmd::DISPLAY_ON),
];

/// Address window covering the whole panel, sent before every frame
pub const FLUSH_SEQUENCE: &[Command] = &[
    Command::with(cmd::SET_PAGE_ADDR, &[Param::Byte(0x00), Param::Byte(0xFF)]),
    Command::with(cmd::SET_COLUMN_ADDR, &[Param::Byte(0x00), Param::LastColumn]),
];

/// All bytes of a sequence, in bus order
pub fn sequence_bytes<'a>(
    sequence: &'a [Command],
    panel: &'a Panel,
) -> impl Iterator<Item = u8> + 'a {
    sequence.iter().flat_map(move |c| c.bytes(panel))
}
