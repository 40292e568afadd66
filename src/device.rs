use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use crate::accelerometer::AccelerometerData;
use crate::bits::be_value;
use crate::buttons::ButtonData;
use crate::calibration::AccelerometerCalibration;
use crate::config::{IrSensitivity, WiimoteConfig};
use crate::extensions::motion_plus::{
    MotionPlusCalibration, MotionPlusMode, MotionPlusType, MOTION_PLUS_CALIBRATION_REGISTER,
    MOTION_PLUS_INIT_REGISTER, MOTION_PLUS_MODE_REGISTER, MOTION_PLUS_PROBE_REGISTER,
};
use crate::extensions::{
    Extension, ExtensionKind, EXTENSION_IDENTIFIER_REGISTER, EXTENSION_INIT_2_REGISTER,
    EXTENSION_INIT_REGISTER,
};
use crate::input::{
    AcknowledgeData, InputReport, InputReportType, MemoryData, StatusReport, WiimoteData,
    MAX_PAYLOAD_SIZE,
};
use crate::ir::{IrData, IrDataType};
use crate::native::HidLink;
use crate::output::{Addressing, OutputReport, PlayerLedFlags, RegisterSpace};
use crate::queue::WriteQueue;
use crate::register::{AppendOutcome, ReadResponder, RegisterIo};
use crate::result::{WiimoteDeviceError, WiimoteError, WiimoteResult};
use crate::status::StatusData;
use crate::{PRODUCT_ID_WIIMOTE, PRODUCT_ID_WIIMOTE_PLUS, WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE};

/// EEPROM address of the factory accelerometer calibration.
const ACCELEROMETER_CALIBRATION_ADDRESS: u32 = 0x0016;
/// Register read error: write-only register or nothing connected.
const READ_ERROR_WRITE_ONLY: u8 = 7;

const IR_CAMERA_CONTROL_REGISTER: u32 = 0xB0_0030;
const IR_SENSITIVITY_BLOCK_1_REGISTER: u32 = 0xB0_0000;
const IR_SENSITIVITY_BLOCK_2_REGISTER: u32 = 0xB0_001A;
const IR_MODE_REGISTER: u32 = 0xB0_0033;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Wiimote,
    /// Wii Remote Plus with a built-in MotionPlus.
    WiimotePlus,
    /// Wii U Pro Controller, shares the product id of the Wii Remote Plus.
    ProController,
}

impl DeviceType {
    /// # Errors
    ///
    /// Returns `InvalidProductID` for products other than the Wii remotes.
    pub const fn from_product_id(product_id: u16) -> Result<Self, WiimoteDeviceError> {
        match product_id {
            PRODUCT_ID_WIIMOTE => Ok(Self::Wiimote),
            PRODUCT_ID_WIIMOTE_PLUS => Ok(Self::WiimotePlus),
            _ => Err(WiimoteDeviceError::InvalidProductID(product_id)),
        }
    }
}

/// Result of processing one input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// The link has no pending report.
    NoData,
    /// The report was decoded.
    Report(InputReportType),
    /// The report type byte is unknown, the report was dropped.
    Unrecognized(u8),
    /// The report is shorter than its type requires, the report was dropped.
    Truncated,
}

/// A `WiimoteDevice` decodes the reports of one Wii remote and sends commands to it.
pub struct WiimoteDevice {
    link: Arc<dyn HidLink>,
    identifier: String,
    write_queue: Option<WriteQueue>,
    device_type: DeviceType,
    report_mode: InputReportType,
    continuous_reporting: bool,
    ir_sensitivity: IrSensitivity,
    rumble: bool,
    register_io: RegisterIo<ReadResponder>,
    expecting_status_report: bool,
    interleaved_first: Option<[u8; MAX_PAYLOAD_SIZE]>,
    expecting_motion_plus_switch: bool,
    motion_plus_type: Option<MotionPlusType>,
    motion_plus_calibration: Option<MotionPlusCalibration>,
    buttons: ButtonData,
    accelerometer: AccelerometerData,
    ir: IrData,
    status: StatusData,
    extension: Extension,
    last_acknowledge: Option<AcknowledgeData>,
}

impl WiimoteDevice {
    /// Wraps an open HID link as a `WiimoteDevice`. Nothing is sent to the Wii remote.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the write queue of the configuration could not be started.
    pub fn new(
        link: Arc<dyn HidLink>,
        device_type: DeviceType,
        config: &WiimoteConfig,
    ) -> WiimoteResult<Self> {
        let write_queue = config
            .write_queue
            .map(|queue_config| WriteQueue::spawn(Arc::clone(&link), queue_config))
            .transpose()?;
        let identifier = link.identifier();

        Ok(Self {
            link,
            identifier,
            write_queue,
            device_type,
            report_mode: InputReportType::Buttons,
            continuous_reporting: config.continuous_reporting,
            ir_sensitivity: config.ir_sensitivity,
            rumble: false,
            register_io: RegisterIo::default(),
            expecting_status_report: false,
            interleaved_first: None,
            expecting_motion_plus_switch: false,
            motion_plus_type: None,
            motion_plus_calibration: None,
            buttons: ButtonData::default(),
            accelerometer: AccelerometerData::default(),
            ir: IrData::default(),
            status: StatusData::default(),
            extension: Extension::None,
            last_acknowledge: None,
        })
    }

    /// Returns the unique identifier of the Wii remote.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub const fn device_type(&self) -> DeviceType {
        self.device_type
    }

    #[must_use]
    pub const fn buttons(&self) -> &ButtonData {
        &self.buttons
    }

    #[must_use]
    pub const fn accelerometer(&self) -> &AccelerometerData {
        &self.accelerometer
    }

    /// Mutable access for recording calibration poses.
    pub fn accelerometer_mut(&mut self) -> &mut AccelerometerData {
        &mut self.accelerometer
    }

    #[must_use]
    pub const fn ir(&self) -> &IrData {
        &self.ir
    }

    /// Mutable access for the sensor bar tracker.
    pub fn ir_mut(&mut self) -> &mut IrData {
        &mut self.ir
    }

    #[must_use]
    pub const fn status(&self) -> &StatusData {
        &self.status
    }

    /// Returns the decoder of the active extension.
    #[must_use]
    pub const fn extension(&self) -> &Extension {
        &self.extension
    }

    pub fn extension_mut(&mut self) -> &mut Extension {
        &mut self.extension
    }

    /// Whether an inactive MotionPlus answered the last probe.
    #[must_use]
    pub const fn motion_plus_attached(&self) -> bool {
        self.motion_plus_type.is_some()
    }

    #[must_use]
    pub const fn motion_plus_type(&self) -> Option<MotionPlusType> {
        self.motion_plus_type
    }

    /// The last data reporting mode sent to the Wii remote.
    #[must_use]
    pub const fn report_mode(&self) -> InputReportType {
        self.report_mode
    }

    #[must_use]
    pub const fn rumble(&self) -> bool {
        self.rumble
    }

    /// The last acknowledgement received from the Wii remote.
    #[must_use]
    pub const fn last_acknowledge(&self) -> Option<AcknowledgeData> {
        self.last_acknowledge
    }

    #[must_use]
    pub const fn is_register_read_pending(&self) -> bool {
        self.register_io.is_pending()
    }

    #[must_use]
    pub const fn is_expecting_status_report(&self) -> bool {
        self.expecting_status_report
    }

    #[must_use]
    pub const fn is_expecting_motion_plus_switch(&self) -> bool {
        self.expecting_motion_plus_switch
    }

    /// Returns the screen position the Wii remote points at, see [`IrData::pointing_position`].
    pub fn pointing_position(&mut self) -> Option<[f32; 2]> {
        let acceleration = self.accelerometer.calibrated();
        self.ir.pointing_position(acceleration)
    }

    /// Drops the open register read, e.g. if the Wii remote never answers it.
    pub fn abandon_register_read(&mut self) -> bool {
        let abandoned = self.register_io.abandon();
        if let Some(transaction) = &abandoned {
            debug!(
                address = transaction.addressing().address(),
                "register read abandoned"
            );
        }
        abandoned.is_some()
    }

    /// Sends the output report to the Wii remote, through the write queue if one is configured.
    ///
    /// # Errors
    ///
    /// Returns the error of the HID link or `QueueFull` if the write queue is full.
    pub fn write(&mut self, output_report: &OutputReport) -> WiimoteResult<()> {
        if let OutputReport::Rumble(rumble) = output_report {
            // Rumble is sent in every output report, so the new value needs to be stored.
            self.rumble = *rumble;
        }
        let (buffer, size) = output_report.to_array(self.rumble);
        let frame = &buffer[..size];
        trace!(frame = ?frame, "output report");

        match &self.write_queue {
            Some(queue) => queue.enqueue(frame),
            None => self.link.send(frame).map(|_| ()),
        }
    }

    /// Reads and processes one report from the Wii remote.
    ///
    /// Call it until it returns `ReadStatus::NoData` to drain the pending reports.
    ///
    /// # Errors
    ///
    /// Returns the error of the HID link.
    pub fn read_wiimote_data(&mut self) -> WiimoteResult<ReadStatus> {
        let mut buffer = [0u8; WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE];
        let size = self.link.receive(&mut buffer)?;
        if size == 0 {
            return Ok(ReadStatus::NoData);
        }
        Ok(self.process_report(&buffer[..size.min(buffer.len())]))
    }

    /// Decodes one input report starting with its type byte and reacts to it.
    pub fn process_report(&mut self, frame: &[u8]) -> ReadStatus {
        let Some(&report_id) = frame.first() else {
            return ReadStatus::NoData;
        };
        trace!(frame = ?frame, "input report");

        let report = match InputReport::try_from(frame) {
            Ok(report) => report,
            Err(WiimoteError::WiimoteDeviceError(WiimoteDeviceError::InvalidData)) => {
                warn!(report_id, "unrecognized input report dropped");
                return ReadStatus::Unrecognized(report_id);
            }
            Err(_) => {
                warn!(report_id, size = frame.len(), "truncated input report dropped");
                return ReadStatus::Truncated;
            }
        };

        let report_type = report.report_type();
        match report {
            InputReport::StatusInformation(status) => self.handle_status(&status),
            InputReport::ReadMemory(memory) => self.handle_register_data(&memory),
            InputReport::Acknowledge(acknowledge) => self.handle_acknowledge(acknowledge),
            InputReport::DataReport(report_type, data) => {
                self.handle_data_report(report_type, &data);
            }
        }
        ReadStatus::Report(report_type)
    }

    fn handle_status(&mut self, report: &StatusReport) {
        self.buttons.interpret(&report.button_bytes());
        let was_connected = self.status.extension_connected();
        self.status.interpret(&report.status_bytes());

        if self.expecting_status_report {
            self.expecting_status_report = false;
            return;
        }

        // Unsolicited status reports are sent when an extension is connected or disconnected.
        // The Wii remote stops sending data reports until the mode is set again.
        debug!(
            extension_connected = self.status.extension_connected(),
            "unsolicited status report"
        );
        let result = self.send_data_report_mode(self.report_mode);
        follow_up("data reporting mode", result);

        let connected = self.status.extension_connected();
        if connected && !was_connected {
            if self.expecting_motion_plus_switch {
                self.expecting_motion_plus_switch = false;
            } else {
                let result = self.activate_extension();
                follow_up("extension activation", result);
            }
            let result = self.request_identify_extension();
            follow_up("extension identification", result);
        } else if !connected && was_connected && !self.expecting_motion_plus_switch {
            debug!(extension = ?self.extension.kind(), "extension disconnected");
            self.extension = Extension::None;
        }
    }

    fn handle_register_data(&mut self, memory: &MemoryData) {
        self.buttons.interpret(&memory.button_bytes());

        let Some(pending) = self.register_io.pending() else {
            warn!("register data received without a pending read, ignored");
            return;
        };
        let address = pending.addressing().address();
        let expected_offset = pending.expected_offset();

        match memory.error_flag() {
            0 => {}
            READ_ERROR_WRITE_ONLY if address == MOTION_PLUS_PROBE_REGISTER => {
                debug!("no inactive MotionPlus found");
                self.motion_plus_type = None;
                self.register_io.abandon();
                return;
            }
            READ_ERROR_WRITE_ONLY => {
                error!(
                    address,
                    "register read failed, register is write-only or nothing is connected"
                );
                self.register_io.abandon();
                return;
            }
            error_flag => {
                warn!(address, error_flag, "register read failed");
                self.register_io.abandon();
                return;
            }
        }

        #[allow(clippy::cast_possible_truncation)] // low 16 bits
        let expected_low = expected_offset as u16;
        if memory.address_offset() != expected_low {
            warn!(
                expected = expected_low,
                reported = memory.address_offset(),
                "register data offset does not match the expected offset"
            );
        }

        if let AppendOutcome::Complete { responder, data } =
            self.register_io.append_data(memory.data())
        {
            self.respond(responder, &data);
        }
    }

    fn respond(&mut self, responder: ReadResponder, data: &[u8]) {
        match responder {
            ReadResponder::IdentifyExtension => {
                let kind = ExtensionKind::identify(data);
                if kind == ExtensionKind::ProController {
                    self.device_type = DeviceType::ProController;
                }
                if kind == ExtensionKind::None {
                    warn!(identifier = be_value(data), "unknown extension identifier");
                } else {
                    debug!(identifier = be_value(data), extension = ?kind, "extension identified");
                }
                if self.extension.switch_to(kind) {
                    self.apply_motion_plus_calibration();
                }
            }
            ReadResponder::IdentifyMotionPlus => {
                self.motion_plus_type = MotionPlusType::detect(data);
                debug!(motion_plus = ?self.motion_plus_type, "MotionPlus probed");
            }
            ReadResponder::AccelerometerCalibration => {
                let parsed = <&[u8; 10]>::try_from(data)
                    .map_err(|_| WiimoteDeviceError::MissingData)
                    .and_then(AccelerometerCalibration::from_factory);
                match parsed {
                    Ok(calibration) => self.accelerometer.set_calibration(calibration),
                    Err(error) => warn!(%error, "invalid accelerometer calibration ignored"),
                }
            }
            ReadResponder::MotionPlusCalibration => {
                let parsed = <&[u8; 32]>::try_from(data)
                    .map_err(|_| WiimoteDeviceError::MissingData)
                    .and_then(MotionPlusCalibration::from_register_block);
                match parsed {
                    Ok(calibration) => {
                        self.motion_plus_calibration = Some(calibration);
                        self.apply_motion_plus_calibration();
                    }
                    Err(error) => warn!(%error, "invalid MotionPlus calibration ignored"),
                }
            }
            ReadResponder::Callback(callback) => callback(data),
        }
    }

    fn apply_motion_plus_calibration(&mut self) {
        if let (Some(calibration), Some(motion_plus)) = (
            self.motion_plus_calibration,
            self.extension.motion_plus_mut(),
        ) {
            motion_plus.set_calibration(calibration);
        }
    }

    fn handle_acknowledge(&mut self, acknowledge: AcknowledgeData) {
        self.buttons.interpret(&acknowledge.button_bytes());
        if acknowledge.error_code() != 0 {
            warn!(
                report_id = acknowledge.report_number(),
                error_code = acknowledge.error_code(),
                "output report failed"
            );
        }
        self.last_acknowledge = Some(acknowledge);
    }

    fn handle_data_report(&mut self, report_type: InputReportType, data: &WiimoteData) {
        if report_type.is_interleaved() {
            self.handle_interleaved(report_type, data);
            return;
        }

        let layout = report_type.layout();
        if let Some(range) = layout.buttons {
            self.buttons.interpret(data.slice(range));
        }
        if let Some(range) = layout.accelerometer {
            self.accelerometer.interpret(data.slice(range));
        }
        if let Some(range) = layout.ir {
            self.ir.interpret(data.slice(range));
        }
        if let Some(range) = layout.extension {
            self.extension.interpret(data.slice(range));
        }
    }

    fn handle_interleaved(&mut self, report_type: InputReportType, data: &WiimoteData) {
        self.buttons.interpret(data.slice(0..2));

        match (report_type, self.interleaved_first) {
            (InputReportType::InterleavedFirst, None) => {
                self.interleaved_first = <[u8; MAX_PAYLOAD_SIZE]>::try_from(data.payload()).ok();
            }
            (InputReportType::InterleavedFirst, Some(_)) => {
                warn!("first interleaved half received twice, the newer one is discarded");
            }
            (_, Some(first)) => {
                self.interleaved_first = None;
                let second = data.payload();
                self.accelerometer
                    .interpret_interleaved(&first[..3], second.get(..3).unwrap_or_default());
                self.ir
                    .interpret_interleaved(&first[3..], second.get(3..).unwrap_or_default());
            }
            (_, None) => {
                warn!("second interleaved half received without the first, discarded");
            }
        }
    }

    /// Enables or disables the rumble motor.
    ///
    /// # Errors
    ///
    /// Returns an error if the report could not be sent.
    pub fn set_rumble(&mut self, rumble: bool) -> WiimoteResult<()> {
        self.write(&OutputReport::Rumble(rumble))
    }

    /// # Errors
    ///
    /// Returns an error if the report could not be sent.
    pub fn send_player_led(
        &mut self,
        led1: bool,
        led2: bool,
        led3: bool,
        led4: bool,
    ) -> WiimoteResult<()> {
        self.write(&OutputReport::PlayerLed(PlayerLedFlags::from_leds(
            led1, led2, led3, led4,
        )))
    }

    /// Selects the data report the Wii remote sends.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReportMode` for report types that are not data reports.
    pub fn send_data_report_mode(&mut self, mode: InputReportType) -> WiimoteResult<()> {
        if !mode.is_data_report() {
            error!(mode = u8::from(mode), "not a data reporting mode");
            return Err(WiimoteError::InvalidReportMode(u8::from(mode)));
        }

        self.report_mode = mode;
        // A first half buffered under the previous mode never gets its partner
        self.interleaved_first = None;
        self.write(&OutputReport::DataReportingMode {
            continuous: self.continuous_reporting,
            mode,
        })
    }

    /// Sends both IR camera enable reports.
    ///
    /// # Errors
    ///
    /// Returns an error if a report could not be sent.
    pub fn send_ir_camera_enable(&mut self, enabled: bool) -> WiimoteResult<()> {
        self.write(&OutputReport::IrCameraEnable(enabled))?;
        self.write(&OutputReport::IrCameraEnable2(enabled))
    }

    /// # Errors
    ///
    /// Returns an error if the report could not be sent.
    pub fn send_speaker_enabled(&mut self, enabled: bool) -> WiimoteResult<()> {
        self.write(&OutputReport::SpeakerEnable(enabled))
    }

    /// # Errors
    ///
    /// Returns an error if the report could not be sent.
    pub fn send_speaker_muted(&mut self, muted: bool) -> WiimoteResult<()> {
        self.write(&OutputReport::SpeakerMute(muted))
    }

    /// Requests a status report. The answer is not treated as an extension change.
    ///
    /// # Errors
    ///
    /// Returns an error if the report could not be sent.
    pub fn send_status_request(&mut self) -> WiimoteResult<()> {
        self.expecting_status_report = true;
        self.write(&OutputReport::StatusRequest)
    }

    /// Starts a register read, `responder` receives the data once all of it arrived.
    ///
    /// # Errors
    ///
    /// Returns `ReadPending` if another read is in progress, or the error of sending the request.
    pub fn send_register_read(
        &mut self,
        addressing: Addressing,
        responder: ReadResponder,
    ) -> WiimoteResult<()> {
        let report = self.register_io.read(addressing, responder)?;
        if let Err(error) = self.write(&report) {
            self.register_io.abandon();
            return Err(error);
        }
        Ok(())
    }

    /// Writes up to 16 bytes to the EEPROM or the control registers.
    ///
    /// # Errors
    ///
    /// Returns `WritePayloadTooLarge` for more than 16 bytes, or the error of sending the report.
    pub fn send_register_write(
        &mut self,
        space: RegisterSpace,
        address: u32,
        data: &[u8],
    ) -> WiimoteResult<()> {
        let report = RegisterIo::<ReadResponder>::write(space, address, data)?;
        self.write(&report)
    }

    pub fn set_ir_sensitivity(&mut self, sensitivity: IrSensitivity) {
        self.ir_sensitivity = sensitivity;
    }

    /// Enables the IR camera and selects the data report carrying `ir_type`.
    ///
    /// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#Initialization
    ///
    /// # Errors
    ///
    /// Returns the error of the first report that could not be sent.
    pub fn setup_ir_camera(&mut self, ir_type: IrDataType) -> WiimoteResult<()> {
        let (block1, block2) = self.ir_sensitivity.blocks();

        self.send_ir_camera_enable(true)?;
        self.send_register_write(RegisterSpace::Control, IR_CAMERA_CONTROL_REGISTER, &[0x08])?;
        self.send_register_write(RegisterSpace::Control, IR_SENSITIVITY_BLOCK_1_REGISTER, &block1)?;
        self.send_register_write(RegisterSpace::Control, IR_SENSITIVITY_BLOCK_2_REGISTER, &block2)?;
        self.send_register_write(RegisterSpace::Control, IR_MODE_REGISTER, &[ir_type.mode()])?;
        self.send_register_write(RegisterSpace::Control, IR_CAMERA_CONTROL_REGISTER, &[0x08])?;
        if ir_type == IrDataType::Full {
            warn!("full IR reporting uses interleaved reports, decoding is not verified on hardware");
        }
        self.send_data_report_mode(ir_type.report_type())
    }

    /// Reads the extension identifier. The decoder is switched once the answer arrives.
    ///
    /// # Errors
    ///
    /// Returns `ReadPending` if another read is in progress, or the error of sending the request.
    pub fn request_identify_extension(&mut self) -> WiimoteResult<()> {
        self.send_register_read(
            Addressing::control_registers(EXTENSION_IDENTIFIER_REGISTER, 6),
            ReadResponder::IdentifyExtension,
        )
    }

    /// Probes for a MotionPlus that is present but not active.
    ///
    /// # Errors
    ///
    /// Returns `ReadPending` if another read is in progress, or the error of sending the request.
    pub fn request_identify_motion_plus(&mut self) -> WiimoteResult<()> {
        self.send_register_read(
            Addressing::control_registers(MOTION_PLUS_PROBE_REGISTER, 6),
            ReadResponder::IdentifyMotionPlus,
        )
    }

    /// Initializes the connected extension without encryption.
    ///
    /// # Errors
    ///
    /// Returns the error of the first report that could not be sent.
    pub fn activate_extension(&mut self) -> WiimoteResult<()> {
        if !self.status.extension_connected() {
            warn!("activating an extension that is not reported as connected");
        }
        self.send_register_write(RegisterSpace::Control, EXTENSION_INIT_REGISTER, &[0x55])?;
        self.send_register_write(RegisterSpace::Control, EXTENSION_INIT_2_REGISTER, &[0x00])
    }

    /// Activates the MotionPlus in `mode`, `Inactive` deactivates it.
    ///
    /// The MotionPlus decoder is selected right away, the Wii remote confirms the switch with a status report.
    ///
    /// # Errors
    ///
    /// Returns the error of the first report that could not be sent.
    pub fn activate_motion_plus(&mut self, mode: MotionPlusMode) -> WiimoteResult<()> {
        let (Some(mode_value), Some(kind)) = (mode.register_value(), motion_plus_kind(mode)) else {
            return self.deactivate_motion_plus();
        };
        if !self.motion_plus_attached() {
            warn!("activating a MotionPlus that was not detected");
        }

        self.send_register_write(RegisterSpace::Control, MOTION_PLUS_INIT_REGISTER, &[0x55])?;
        self.send_register_write(RegisterSpace::Control, MOTION_PLUS_MODE_REGISTER, &[mode_value])?;

        debug!(?mode, "MotionPlus activated");
        self.extension.switch_to(kind);
        self.apply_motion_plus_calibration();
        self.expecting_motion_plus_switch = true;
        Ok(())
    }

    /// Deactivates the MotionPlus. The extension decoder is kept until the next identification.
    ///
    /// # Errors
    ///
    /// Returns an error if the report could not be sent.
    pub fn deactivate_motion_plus(&mut self) -> WiimoteResult<()> {
        self.send_register_write(RegisterSpace::Control, EXTENSION_INIT_REGISTER, &[0x55])
    }

    /// Reads the factory calibration of the accelerometer.
    ///
    /// # Errors
    ///
    /// Returns `ReadPending` if another read is in progress, or the error of sending the request.
    pub fn request_accelerometer_calibration(&mut self) -> WiimoteResult<()> {
        self.send_register_read(
            Addressing::eeprom(ACCELEROMETER_CALIBRATION_ADDRESS, 10),
            ReadResponder::AccelerometerCalibration,
        )
    }

    /// Reads the factory calibration of an active MotionPlus.
    ///
    /// # Errors
    ///
    /// Returns `ReadPending` if another read is in progress, or the error of sending the request.
    pub fn request_motion_plus_calibration(&mut self) -> WiimoteResult<()> {
        self.send_register_read(
            Addressing::control_registers(MOTION_PLUS_CALIBRATION_REGISTER, 32),
            ReadResponder::MotionPlusCalibration,
        )
    }
}

const fn motion_plus_kind(mode: MotionPlusMode) -> Option<ExtensionKind> {
    match mode {
        MotionPlusMode::Inactive => None,
        MotionPlusMode::Active => Some(ExtensionKind::MotionPlus),
        MotionPlusMode::NunchuckPassthrough => Some(ExtensionKind::MotionPlusNunchuck),
        MotionPlusMode::ClassicControllerPassthrough => Some(ExtensionKind::MotionPlusClassic),
    }
}

fn follow_up(command: &str, result: WiimoteResult<()>) {
    if let Err(error) = result {
        error!(%error, command, "follow-up command failed");
    }
}
