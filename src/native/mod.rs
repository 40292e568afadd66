//! The HID transport a Wii remote is reached through.
//!
//! Platform HID access lives outside of this crate. Implement [`HidBackend`] and [`HidLink`]
//! on top of the HID library of your choice and hand the backend to the
//! [`WiimoteManager`](crate::manager::WiimoteManager).

mod null;

use std::sync::Arc;

use crate::result::WiimoteResult;

pub use null::NullHidBackend;

/// An open HID connection to a single device.
///
/// Closing the connection is dropping the last handle.
pub trait HidLink: Send + Sync {
    /// Sends one output report, the first byte is the report id.
    ///
    /// # Errors
    ///
    /// Returns `Transport` with the code of the underlying library if the write failed.
    fn send(&self, data: &[u8]) -> WiimoteResult<usize>;

    /// Reads one input report without blocking. Returns 0 if no report is available.
    ///
    /// # Errors
    ///
    /// Returns `Transport` with the code of the underlying library if the read failed.
    fn receive(&self, buffer: &mut [u8]) -> WiimoteResult<usize>;

    /// A stable identifier of the device, e.g. its bluetooth address or HID path.
    fn identifier(&self) -> String;
}

/// A HID device found during enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HidDeviceInfo {
    pub path: String,
    pub vendor_id: u16,
    pub product_id: u16,
}

/// Lists and opens HID devices.
pub trait HidBackend {
    fn enumerate(&self, vendor_id: u16, product_id: u16) -> Vec<HidDeviceInfo>;

    /// # Errors
    ///
    /// Returns an error if the device could not be opened.
    fn open(&self, info: &HidDeviceInfo) -> WiimoteResult<Arc<dyn HidLink>>;
}
