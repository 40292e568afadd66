//! End-to-end tests driving a `WiimoteDevice` through a scripted HID link.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use wiimote_api::input::InputReportType;
use wiimote_api::prelude::*;

#[derive(Default)]
struct ScriptedLink {
    incoming: Mutex<VecDeque<Vec<u8>>>,
    sent: Mutex<Vec<Vec<u8>>>,
}

impl ScriptedLink {
    fn push(&self, frame: &[u8]) {
        self.incoming.lock().unwrap().push_back(frame.to_vec());
    }

    fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

impl HidLink for ScriptedLink {
    fn send(&self, data: &[u8]) -> WiimoteResult<usize> {
        self.sent.lock().unwrap().push(data.to_vec());
        Ok(data.len())
    }

    fn receive(&self, buffer: &mut [u8]) -> WiimoteResult<usize> {
        let Some(frame) = self.incoming.lock().unwrap().pop_front() else {
            return Ok(0);
        };
        buffer[..frame.len()].copy_from_slice(&frame);
        Ok(frame.len())
    }

    fn identifier(&self) -> String {
        "scripted".to_string()
    }
}

struct ScriptedBackend {
    link: Arc<ScriptedLink>,
}

impl HidBackend for ScriptedBackend {
    fn enumerate(&self, vendor_id: u16, product_id: u16) -> Vec<HidDeviceInfo> {
        if product_id != PRODUCT_ID_WIIMOTE {
            return Vec::new();
        }
        vec![HidDeviceInfo {
            path: "/dev/hidraw-test".to_string(),
            vendor_id,
            product_id,
        }]
    }

    fn open(&self, _info: &HidDeviceInfo) -> WiimoteResult<Arc<dyn HidLink>> {
        Ok(Arc::clone(&self.link) as Arc<dyn HidLink>)
    }
}

fn init_tracing() {
    _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn drain(device: &mut WiimoteDevice) -> Vec<ReadStatus> {
    let mut statuses = Vec::new();
    loop {
        match device.read_wiimote_data().unwrap() {
            ReadStatus::NoData => return statuses,
            status => statuses.push(status),
        }
    }
}

#[test]
fn test_buttons_accel_ir12_updates_every_decoder_but_the_extension() {
    init_tracing();
    let link = Arc::new(ScriptedLink::default());
    let backend = ScriptedBackend {
        link: Arc::clone(&link),
    };
    let mut manager = WiimoteManager::new(WiimoteConfig::default());
    let found = manager.find_wiimotes(&backend);
    assert_eq!(found, vec!["/dev/hidraw-test".to_string()]);
    let device = manager.device_mut("/dev/hidraw-test").unwrap();
    let extension_before = device.extension().clone();

    let mut frame = vec![0x33, 0b0001_0000, 0b1000_0100, 0x81, 0x7F, 0xA0];
    frame.extend_from_slice(&[0x40, 0x50, 0b0001_0010]);
    frame.extend_from_slice(&[0x60, 0x50, 0b0000_0011]);
    frame.extend_from_slice(&[0xFF; 6]);
    link.push(&frame);

    assert_eq!(
        drain(device),
        vec![ReadStatus::Report(InputReportType::ButtonsAccelIr12)]
    );

    let buttons = device.buttons();
    assert!(buttons.plus() && buttons.b() && buttons.home());
    assert!(!buttons.a());
    assert_eq!(device.accelerometer().raw(), [4, -4, 128]);
    let dots = device.ir().dots();
    assert_eq!(dots.len(), 4);
    assert_eq!(dots[0].map(|dot| (dot.x, dot.y, dot.size)), Some((0x140, 0x50, Some(2))));
    assert_eq!(dots[1].map(|dot| (dot.x, dot.y, dot.size)), Some((0x60, 0x50, Some(3))));
    assert!(dots[2].is_none() && dots[3].is_none());
    assert_eq!(device.extension(), &extension_before);
}

#[test]
fn test_extension_handshake() {
    init_tracing();
    let link = Arc::new(ScriptedLink::default());
    let mut device = WiimoteDevice::new(
        Arc::clone(&link) as Arc<dyn HidLink>,
        DeviceType::Wiimote,
        &WiimoteConfig::default(),
    )
    .unwrap();
    device
        .send_data_report_mode(InputReportType::ButtonsAccelExt16)
        .unwrap();

    // Extension plugged in
    link.push(&[0x20, 0x00, 0x00, 0b0000_0010, 0x00, 0x00, 0xC8]);
    // Identifier in one 6 byte chunk
    let mut identify = vec![0x21, 0x00, 0x00, 0x50, 0x00, 0xFA];
    identify.extend_from_slice(&[0x01, 0x00, 0xA4, 0x20, 0x01, 0x01]);
    identify.resize(22, 0);
    link.push(&identify);
    // Classic Controller with A pressed
    let mut data = vec![0x35, 0x00, 0x00, 0x80, 0x80, 0x80];
    data.extend_from_slice(&[0x20, 0x20, 0x10, 0x00, 0xFF, 0xEF]);
    data.resize(22, 0);
    link.push(&data);

    let statuses = drain(&mut device);

    assert_eq!(statuses.len(), 3);
    assert_eq!(device.extension().kind(), ExtensionKind::ClassicController);
    let Extension::ClassicController(classic) = device.extension() else {
        panic!("expected a Classic Controller");
    };
    assert!(classic.is_pressed(wiimote_api::extensions::classic::ClassicButtons::A));
    assert_eq!(device.status().battery_level(), 0xC8);

    let sent = link.sent();
    assert_eq!(sent.len(), 5);
    assert_eq!(sent[4], vec![0x17, 0x04, 0xA4, 0x00, 0xFA, 0x00, 0x06]);
}

#[test]
fn test_queued_writes_reach_the_link() {
    init_tracing();
    let link = Arc::new(ScriptedLink::default());
    let config = WiimoteConfig::from_json_str(
        r#"{ "write_queue": { "min_write_interval_ms": 1, "capacity": 4 } }"#,
    )
    .unwrap();
    let mut device =
        WiimoteDevice::new(Arc::clone(&link) as Arc<dyn HidLink>, DeviceType::Wiimote, &config)
            .unwrap();

    device.send_player_led(true, false, false, false).unwrap();
    device.send_status_request().unwrap();
    drop(device);

    assert_eq!(link.sent(), vec![vec![0x11, 0x10], vec![0x15, 0x00]]);
}
