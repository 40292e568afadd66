use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::WiimoteConfig;
use crate::device::{DeviceType, WiimoteDevice};
use crate::native::{HidBackend, HidDeviceInfo};
use crate::result::{WiimoteDeviceError, WiimoteResult};
use crate::{PRODUCT_ID_WIIMOTE, PRODUCT_ID_WIIMOTE_PLUS, VENDOR_ID};

/// Manages connections to Wii remotes.
///
/// Devices are keyed by their HID path, scanning again only opens paths that were not seen before.
#[derive(Default)]
pub struct WiimoteManager {
    config: WiimoteConfig,
    devices: HashMap<String, WiimoteDevice>,
}

impl WiimoteManager {
    #[must_use]
    pub fn new(config: WiimoteConfig) -> Self {
        Self {
            config,
            devices: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &WiimoteConfig {
        &self.config
    }

    /// Opens all Wii remotes of `backend` that are not managed yet.
    ///
    /// Returns the paths of the newly opened devices. Devices that fail to open are logged and skipped.
    pub fn find_wiimotes(&mut self, backend: &dyn HidBackend) -> Vec<String> {
        let mut found = Vec::new();

        for product_id in [PRODUCT_ID_WIIMOTE, PRODUCT_ID_WIIMOTE_PLUS] {
            for info in backend.enumerate(VENDOR_ID, product_id) {
                if self.devices.contains_key(&info.path) {
                    continue;
                }
                match self.open(backend, &info) {
                    Ok(device) => {
                        debug!(path = %info.path, identifier = device.identifier(), "Wii remote connected");
                        self.devices.insert(info.path.clone(), device);
                        found.push(info.path);
                    }
                    Err(error) => warn!(%error, path = %info.path, "failed to connect to Wii remote"),
                }
            }
        }

        found
    }

    fn open(&self, backend: &dyn HidBackend, info: &HidDeviceInfo) -> WiimoteResult<WiimoteDevice> {
        if info.vendor_id != VENDOR_ID {
            return Err(WiimoteDeviceError::InvalidVendorID(info.vendor_id).into());
        }
        let device_type = DeviceType::from_product_id(info.product_id)?;
        let link = backend.open(info)?;
        WiimoteDevice::new(link, device_type, &self.config)
    }

    #[must_use]
    pub fn device(&self, path: &str) -> Option<&WiimoteDevice> {
        self.devices.get(path)
    }

    pub fn device_mut(&mut self, path: &str) -> Option<&mut WiimoteDevice> {
        self.devices.get_mut(path)
    }

    pub fn devices_mut(&mut self) -> impl Iterator<Item = (&str, &mut WiimoteDevice)> {
        self.devices
            .iter_mut()
            .map(|(path, device)| (path.as_str(), device))
    }

    /// Paths of the managed devices.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Closes the device, returns false if it was not managed.
    pub fn close(&mut self, path: &str) -> bool {
        let closed = self.devices.remove(path).is_some();
        if closed {
            debug!(path, "Wii remote closed");
        }
        closed
    }

    /// Closes all devices.
    pub fn cleanup(&mut self) {
        self.devices.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::native::HidLink;
    use crate::result::{WiimoteError, WiimoteResult};

    struct SilentLink(String);

    impl HidLink for SilentLink {
        fn send(&self, data: &[u8]) -> WiimoteResult<usize> {
            Ok(data.len())
        }

        fn receive(&self, _buffer: &mut [u8]) -> WiimoteResult<usize> {
            Ok(0)
        }

        fn identifier(&self) -> String {
            self.0.clone()
        }
    }

    struct FakeBackend {
        devices: Vec<HidDeviceInfo>,
    }

    impl HidBackend for FakeBackend {
        fn enumerate(&self, vendor_id: u16, product_id: u16) -> Vec<HidDeviceInfo> {
            self.devices
                .iter()
                .filter(|info| info.vendor_id == vendor_id && info.product_id == product_id)
                .cloned()
                .collect()
        }

        fn open(&self, info: &HidDeviceInfo) -> WiimoteResult<Arc<dyn HidLink>> {
            if info.path == "broken" {
                return Err(WiimoteError::Transport(-1));
            }
            Ok(Arc::new(SilentLink(info.path.clone())))
        }
    }

    fn info(path: &str, product_id: u16) -> HidDeviceInfo {
        HidDeviceInfo {
            path: path.to_string(),
            vendor_id: VENDOR_ID,
            product_id,
        }
    }

    #[test]
    fn test_find_wiimotes_once() {
        let backend = FakeBackend {
            devices: vec![
                info("first", PRODUCT_ID_WIIMOTE),
                info("second", PRODUCT_ID_WIIMOTE_PLUS),
                info("broken", PRODUCT_ID_WIIMOTE),
            ],
        };
        let mut manager = WiimoteManager::new(WiimoteConfig::default());

        let mut found = manager.find_wiimotes(&backend);
        found.sort();

        assert_eq!(found, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(
            manager.device("second").unwrap().device_type(),
            DeviceType::WiimotePlus
        );
        assert!(manager.find_wiimotes(&backend).is_empty());
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_close_and_cleanup() {
        let backend = FakeBackend {
            devices: vec![info("first", PRODUCT_ID_WIIMOTE), info("second", PRODUCT_ID_WIIMOTE)],
        };
        let mut manager = WiimoteManager::new(WiimoteConfig::default());
        manager.find_wiimotes(&backend);

        assert!(manager.close("first"));
        assert!(!manager.close("first"));
        assert!(manager.device("first").is_none());

        manager.cleanup();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_devices_mut() {
        let backend = FakeBackend {
            devices: vec![info("first", PRODUCT_ID_WIIMOTE)],
        };
        let mut manager = WiimoteManager::new(WiimoteConfig::default());
        manager.find_wiimotes(&backend);

        for (path, device) in manager.devices_mut() {
            assert_eq!(path, "first");
            device.send_status_request().unwrap();
            assert!(device.is_expecting_status_report());
        }
    }
}
