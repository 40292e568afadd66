use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::result::WiimoteResult;

/// Settings applied to every Wii remote opened by the manager.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WiimoteConfig {
    /// Pace output reports through a background queue, `None` writes directly to the device.
    pub write_queue: Option<WriteQueueConfig>,
    pub ir_sensitivity: IrSensitivity,
    /// Ask for data reports even if nothing changed.
    pub continuous_reporting: bool,
}

impl WiimoteConfig {
    /// # Errors
    ///
    /// Returns `Config` if the JSON does not describe a configuration.
    pub fn from_json_str(json: &str) -> WiimoteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns `Io` if the file could not be read and `Config` if it could not be parsed.
    pub fn load(path: impl AsRef<Path>) -> WiimoteResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteQueueConfig {
    pub min_write_interval_ms: u64,
    pub capacity: usize,
}

impl Default for WriteQueueConfig {
    fn default() -> Self {
        Self {
            min_write_interval_ms: 20,
            capacity: 64,
        }
    }
}

impl WriteQueueConfig {
    #[must_use]
    pub const fn min_write_interval(&self) -> Duration {
        Duration::from_millis(self.min_write_interval_ms)
    }
}

/// Sensitivity of the IR camera, from least (`Level1`) to most (`Level5`) sensitive.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#Sensitivity_Settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IrSensitivity {
    Level1,
    Level2,
    #[default]
    Level3,
    Level4,
    Level5,
}

impl IrSensitivity {
    /// The two sensitivity blocks written to `0xB00000` and `0xB0001A`.
    #[must_use]
    pub const fn blocks(self) -> ([u8; 9], [u8; 2]) {
        match self {
            Self::Level1 => (
                [0x02, 0x00, 0x00, 0x71, 0x01, 0x00, 0x64, 0x00, 0xFE],
                [0xFD, 0x05],
            ),
            Self::Level2 => (
                [0x02, 0x00, 0x00, 0x71, 0x01, 0x00, 0x96, 0x00, 0xB4],
                [0xB3, 0x04],
            ),
            Self::Level3 => (
                [0x02, 0x00, 0x00, 0x71, 0x01, 0x00, 0xAA, 0x00, 0x64],
                [0x63, 0x03],
            ),
            Self::Level4 => (
                [0x02, 0x00, 0x00, 0x71, 0x01, 0x00, 0xC8, 0x00, 0x36],
                [0x35, 0x03],
            ),
            Self::Level5 => (
                [0x07, 0x00, 0x00, 0x71, 0x01, 0x00, 0x72, 0x00, 0x20],
                [0x1F, 0x03],
            ),
        }
    }
}
