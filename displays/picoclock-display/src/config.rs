//! Display configuration

/// Panel supply configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VccMode {
    /// Panel voltage supplied externally on VCC
    External,
    /// Panel voltage generated by the internal charge pump
    #[default]
    SwitchCap,
}

impl VccMode {
    /// `SET_CHARGE_PUMP` argument
    pub fn charge_pump(self) -> u8 {
        match self {
            VccMode::External => 0x10,
            VccMode::SwitchCap => 0x14,
        }
    }

    /// `SET_PRECHARGE` argument
    pub fn precharge(self) -> u8 {
        match self {
            VccMode::External => 0x22,
            VccMode::SwitchCap => 0xF1,
        }
    }
}

/// SSD1306 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// 7-bit I2C address (0x3C, or 0x3D with SA0 high)
    pub address: u8,
    /// Panel supply
    pub vcc: VccMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: 0x3C,
            vcc: VccMode::SwitchCap,
        }
    }
}
