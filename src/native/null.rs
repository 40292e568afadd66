use std::sync::{Arc, Once};

use tracing::warn;

use super::{HidBackend, HidDeviceInfo, HidLink};
use crate::result::{WiimoteError, WiimoteResult};

/// Backend for platforms without HID access. Never finds a Wii remote.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHidBackend;

impl HidBackend for NullHidBackend {
    fn enumerate(&self, _vendor_id: u16, _product_id: u16) -> Vec<HidDeviceInfo> {
        static WARNING: Once = Once::new();
        WARNING.call_once(|| {
            warn!("no HID backend available, Wii remotes will not be found");
        });
        Vec::new()
    }

    fn open(&self, _info: &HidDeviceInfo) -> WiimoteResult<Arc<dyn HidLink>> {
        Err(WiimoteError::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_backend_finds_nothing() {
        let backend = NullHidBackend;

        assert!(backend.enumerate(0x057E, 0x0306).is_empty());
        let info = HidDeviceInfo {
            path: "null".to_string(),
            vendor_id: 0x057E,
            product_id: 0x0306,
        };
        assert!(matches!(backend.open(&info), Err(WiimoteError::Disconnected)));
    }
}
