#![allow(clippy::module_name_repetitions)]

pub mod accelerometer;
mod bits;
pub mod buttons;
pub mod calibration;
pub mod config;
mod device;
pub mod extensions;
pub mod input;
pub mod ir;
mod manager;
pub mod native;
pub mod output;
mod queue;
pub mod register;
mod result;
pub mod status;

pub const WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE: usize = 32;

/// Nintendo's USB vendor id.
pub const VENDOR_ID: u16 = 0x057E;
pub const PRODUCT_ID_WIIMOTE: u16 = 0x0306;
/// Wii Remote Plus and Wii U Pro Controller.
pub const PRODUCT_ID_WIIMOTE_PLUS: u16 = 0x0330;

pub mod prelude {
    pub use crate::accelerometer::AccelerometerData;
    pub use crate::buttons::{ButtonData, ButtonFlags};
    pub use crate::calibration::{AccelCalibrationStep, AccelerometerCalibration};
    pub use crate::config::{IrSensitivity, WiimoteConfig, WriteQueueConfig};
    pub use crate::device::{DeviceType, ReadStatus, WiimoteDevice};
    pub use crate::extensions::motion_plus::*;
    pub use crate::extensions::{Extension, ExtensionKind};
    pub use crate::ir::{IrData, IrDataType, IrDot, SensorBarDot, SensorBarTracker};
    pub use crate::manager::WiimoteManager;
    pub use crate::native::{HidBackend, HidDeviceInfo, HidLink, NullHidBackend};
    pub use crate::queue::WriteQueue;
    pub use crate::register::ReadResponder;
    pub use crate::result::*;
    pub use crate::status::StatusData;
    pub use crate::{
        PRODUCT_ID_WIIMOTE, PRODUCT_ID_WIIMOTE_PLUS, VENDOR_ID, WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE,
    };
}
