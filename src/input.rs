use std::ops::Range;

use crate::buttons::ButtonFlags;
use crate::result::{WiimoteDeviceError, WiimoteError, WiimoteResult};
use crate::WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE;

/// Largest payload of any input report.
pub const MAX_PAYLOAD_SIZE: usize = 21;

/// The type byte of an input report.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#Data_Reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputReportType {
    /// Status information, `0x20`.
    Status,
    /// Result of a register read, `0x21`.
    ReadMemory,
    /// Acknowledgement of an output report, `0x22`.
    Acknowledge,
    /// Core buttons, `0x30`.
    Buttons,
    /// Core buttons and accelerometer, `0x31`.
    ButtonsAccel,
    /// Core buttons with 8 extension bytes, `0x32`.
    ButtonsExt8,
    /// Core buttons and accelerometer with 12 IR bytes, `0x33`.
    ButtonsAccelIr12,
    /// Core buttons with 19 extension bytes, `0x34`.
    ButtonsExt19,
    /// Core buttons and accelerometer with 16 extension bytes, `0x35`.
    ButtonsAccelExt16,
    /// Core buttons with 10 IR bytes and 9 extension bytes, `0x36`.
    ButtonsIr10Ext9,
    /// Core buttons and accelerometer with 10 IR bytes and 6 extension bytes, `0x37`.
    ButtonsAccelIr10Ext6,
    /// 21 extension bytes, `0x3D`.
    Ext21,
    /// First half of the interleaved full IR report, `0x3E`.
    InterleavedFirst,
    /// Second half of the interleaved full IR report, `0x3F`.
    InterleavedSecond,
}

/// Where each part of the controller state is found in a report payload.
///
/// The accelerometer range includes the two button bytes, which carry its low bits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportLayout {
    pub buttons: Option<Range<usize>>,
    pub accelerometer: Option<Range<usize>>,
    pub ir: Option<Range<usize>>,
    pub extension: Option<Range<usize>>,
}

impl InputReportType {
    /// Number of payload bytes following the type byte.
    #[must_use]
    pub const fn payload_size(self) -> usize {
        match self {
            Self::Status => 6,
            Self::ReadMemory => 21,
            Self::Acknowledge => 4,
            Self::Buttons => 2,
            Self::ButtonsAccel => 5,
            Self::ButtonsExt8 => 10,
            Self::ButtonsAccelIr12 => 17,
            Self::ButtonsExt19
            | Self::ButtonsAccelExt16
            | Self::ButtonsIr10Ext9
            | Self::ButtonsAccelIr10Ext6
            | Self::Ext21
            | Self::InterleavedFirst
            | Self::InterleavedSecond => 21,
        }
    }

    /// Whether the type can be selected as data reporting mode.
    #[must_use]
    pub const fn is_data_report(self) -> bool {
        !matches!(self, Self::Status | Self::ReadMemory | Self::Acknowledge)
    }

    #[must_use]
    pub const fn is_interleaved(self) -> bool {
        matches!(self, Self::InterleavedFirst | Self::InterleavedSecond)
    }

    /// Returns the payload ranges of the report. Interleaved reports only expose their buttons,
    /// the rest is only meaningful once both halves are received.
    #[must_use]
    pub fn layout(self) -> ReportLayout {
        let (buttons, accelerometer, ir, extension) = match self {
            Self::Status | Self::ReadMemory | Self::Acknowledge | Self::Buttons => {
                (true, false, None, None)
            }
            Self::ButtonsAccel => (true, true, None, None),
            Self::ButtonsExt8 => (true, false, None, Some(2..10)),
            Self::ButtonsAccelIr12 => (true, true, Some(5..17), None),
            Self::ButtonsExt19 => (true, false, None, Some(2..21)),
            Self::ButtonsAccelExt16 => (true, true, None, Some(5..21)),
            Self::ButtonsIr10Ext9 => (true, false, Some(2..12), Some(12..21)),
            Self::ButtonsAccelIr10Ext6 => (true, true, Some(5..15), Some(15..21)),
            Self::Ext21 => (false, false, None, Some(0..21)),
            Self::InterleavedFirst | Self::InterleavedSecond => (true, false, None, None),
        };
        ReportLayout {
            buttons: buttons.then_some(0..2),
            accelerometer: accelerometer.then_some(0..5),
            ir,
            extension,
        }
    }
}

impl TryFrom<u8> for InputReportType {
    type Error = WiimoteDeviceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0x20 => Self::Status,
            0x21 => Self::ReadMemory,
            0x22 => Self::Acknowledge,
            0x30 => Self::Buttons,
            0x31 => Self::ButtonsAccel,
            0x32 => Self::ButtonsExt8,
            0x33 => Self::ButtonsAccelIr12,
            0x34 => Self::ButtonsExt19,
            0x35 => Self::ButtonsAccelExt16,
            0x36 => Self::ButtonsIr10Ext9,
            0x37 => Self::ButtonsAccelIr10Ext6,
            0x3D => Self::Ext21,
            0x3E => Self::InterleavedFirst,
            0x3F => Self::InterleavedSecond,
            _ => return Err(WiimoteDeviceError::InvalidData),
        })
    }
}

impl From<InputReportType> for u8 {
    fn from(value: InputReportType) -> Self {
        match value {
            InputReportType::Status => 0x20,
            InputReportType::ReadMemory => 0x21,
            InputReportType::Acknowledge => 0x22,
            InputReportType::Buttons => 0x30,
            InputReportType::ButtonsAccel => 0x31,
            InputReportType::ButtonsExt8 => 0x32,
            InputReportType::ButtonsAccelIr12 => 0x33,
            InputReportType::ButtonsExt19 => 0x34,
            InputReportType::ButtonsAccelExt16 => 0x35,
            InputReportType::ButtonsIr10Ext9 => 0x36,
            InputReportType::ButtonsAccelIr10Ext6 => 0x37,
            InputReportType::Ext21 => 0x3D,
            InputReportType::InterleavedFirst => 0x3E,
            InputReportType::InterleavedSecond => 0x3F,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    buttons: [u8; 2],
    flags: u8,
    battery_level: u8,
}

impl StatusReport {
    /// Returns the two raw button bytes.
    #[must_use]
    pub const fn button_bytes(&self) -> [u8; 2] {
        self.buttons
    }

    /// Returns the core button data.
    #[must_use]
    pub const fn buttons(&self) -> ButtonFlags {
        ButtonFlags::from_report_bytes(self.buttons[0], self.buttons[1])
    }

    /// Returns the flag byte followed by the battery level.
    #[must_use]
    pub const fn status_bytes(&self) -> [u8; 2] {
        [self.flags, self.battery_level]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryData {
    buttons: [u8; 2],
    size_error_flags: u8,
    address: [u8; 2],
    data: [u8; 16],
}

impl MemoryData {
    /// Returns the two raw button bytes.
    #[must_use]
    pub const fn button_bytes(&self) -> [u8; 2] {
        self.buttons
    }

    /// Returns the size of the data in bytes.
    #[must_use]
    pub const fn size(&self) -> u8 {
        (self.size_error_flags >> 4) + 1
    }

    /// Returns the error flag.
    ///
    /// Known values:
    /// - 0: No error
    /// - 7: Attempted to read from write-only register or disconnected extension
    /// - 8: Attempted to read from non-existing address
    #[must_use]
    pub const fn error_flag(&self) -> u8 {
        self.size_error_flags & 0x0F
    }

    /// Returns the 2 least significant bytes of the address of the first byte.
    #[must_use]
    pub const fn address_offset(&self) -> u16 {
        u16::from_be_bytes(self.address)
    }

    /// Returns the valid data bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data[..usize::from(self.size())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcknowledgeData {
    buttons: [u8; 2],
    report_number: u8,
    error_code: u8,
}

impl AcknowledgeData {
    /// Returns the two raw button bytes.
    #[must_use]
    pub const fn button_bytes(&self) -> [u8; 2] {
        self.buttons
    }

    /// Returns the output report id that is acknowledged.
    #[must_use]
    pub const fn report_number(&self) -> u8 {
        self.report_number
    }

    /// Returns the error code, 0 on success.
    #[must_use]
    pub const fn error_code(&self) -> u8 {
        self.error_code
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiimoteData {
    data: [u8; MAX_PAYLOAD_SIZE],
    size: usize,
}

impl WiimoteData {
    /// Returns the payload of the report.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Returns the payload bytes in `range`, empty if the range is not part of the payload.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        self.payload().get(range).unwrap_or_default()
    }
}

/// An input report represents the data sent from the Wii remote to the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputReport {
    /// Status information report (ID 0x20).
    ///
    /// Can be requested by sending an output report with ID 0x15 and is automatically
    /// sent when the Extension is connected or disconnected.
    ///
    /// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#0x20:_Status
    StatusInformation(StatusReport),
    /// Read memory data report (ID 0x21).
    ///
    /// Result of a read memory request (output report ID 0x17).
    ///
    /// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#0x21:_Read_Memory_Data
    ReadMemory(MemoryData),
    /// Acknowledge report (ID 0x22).
    ///
    /// Sent as a response to an output report with a corresponding result or error.
    ///
    /// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#0x22:_Acknowledge_output_report.2C_return_function_result
    Acknowledge(AcknowledgeData),
    /// Data report (IDs 0x30-0x3F).
    ///
    /// Contains the data of the buttons, accelerometer, IR and Extension from the Wii remote.
    /// The exact data depends on the report type requested by the output report 0x12.
    /// Defaults to 0x30 which only contains the button data.
    ///
    /// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#Data_Reporting
    DataReport(InputReportType, WiimoteData),
}

impl InputReport {
    #[must_use]
    pub const fn report_type(&self) -> InputReportType {
        match self {
            Self::StatusInformation(_) => InputReportType::Status,
            Self::ReadMemory(_) => InputReportType::ReadMemory,
            Self::Acknowledge(_) => InputReportType::Acknowledge,
            Self::DataReport(report_type, _) => *report_type,
        }
    }

    fn from_payload(report_type: InputReportType, payload: &[u8]) -> Self {
        let buttons = [payload[0], payload[1]];
        match report_type {
            InputReportType::Status => Self::StatusInformation(StatusReport {
                buttons,
                flags: payload[2],
                battery_level: payload[5],
            }),
            InputReportType::ReadMemory => {
                let mut data = [0u8; 16];
                data.copy_from_slice(&payload[5..21]);
                Self::ReadMemory(MemoryData {
                    buttons,
                    size_error_flags: payload[2],
                    address: [payload[3], payload[4]],
                    data,
                })
            }
            InputReportType::Acknowledge => Self::Acknowledge(AcknowledgeData {
                buttons,
                report_number: payload[2],
                error_code: payload[3],
            }),
            _ => {
                let mut data = [0u8; MAX_PAYLOAD_SIZE];
                data[..payload.len()].copy_from_slice(payload);
                Self::DataReport(
                    report_type,
                    WiimoteData {
                        data,
                        size: payload.len(),
                    },
                )
            }
        }
    }
}

impl TryFrom<&[u8; WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE]> for InputReport {
    type Error = WiimoteError;

    fn try_from(value: &[u8; WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE]) -> Result<Self, Self::Error> {
        let slice_without_length: &[u8] = value.as_slice();
        Self::try_from(slice_without_length)
    }
}

impl TryFrom<&[u8]> for InputReport {
    type Error = WiimoteError;

    /// Parses a report starting with its type byte. Bytes after the payload are ignored.
    ///
    /// Unknown report types are `InvalidData`, reports shorter than their type requires `MissingData`.
    fn try_from(value: &[u8]) -> WiimoteResult<Self> {
        let (&id, payload) = value
            .split_first()
            .ok_or(WiimoteDeviceError::MissingData)?;
        let report_type = InputReportType::try_from(id)?;
        let payload = payload
            .get(..report_type.payload_size())
            .ok_or(WiimoteDeviceError::MissingData)?;
        Ok(Self::from_payload(report_type, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusFlags;

    #[test]
    fn test_status_report() {
        let mut data = [0u8; WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE];
        data[0] = 0x20;
        data[1] = 0b0001_0100; // Plus and D-Pad down
        data[2] = 0b0000_0100; // B
        data[3] = 0b0010_0101; // Status (battery low, speaker, led 2)

        data[6] = 24; // Battery level

        let report = InputReport::try_from(&data).unwrap();

        let InputReport::StatusInformation(status) = report else {
            panic!("expected status report, got {report:?}");
        };
        assert_eq!(
            status.buttons(),
            ButtonFlags::DOWN | ButtonFlags::PLUS | ButtonFlags::B
        );
        assert_eq!(
            StatusFlags::from_bits_retain(status.status_bytes()[0]),
            StatusFlags::BATTERY_LOW | StatusFlags::SPEAKER_ENABLED | StatusFlags::LED_2
        );
        assert_eq!(status.status_bytes()[1], 24);
    }

    #[test]
    fn test_read_memory_report() {
        let mut data = [0u8; WIIMOTE_DEFAULT_REPORT_BUFFER_SIZE];
        data[0] = 0x21;
        data[1] = 0b0000_0000; // no button
        data[2] = 0b1000_0000; // Home
        data[3] = 0xF7; // Size and error flags
        data[4] = 0x12; // Address
        data[5] = 0xAB; // Address
        data[6..22].copy_from_slice(b"1234567890123456"); // Data

        let report = InputReport::try_from(&data).unwrap();

        let InputReport::ReadMemory(memory) = report else {
            panic!("expected read memory report, got {report:?}");
        };
        assert_eq!(memory.button_bytes(), [0x00, 0x80]);
        assert_eq!(memory.size(), 16);
        assert_eq!(memory.error_flag(), 7);
        assert_eq!(memory.address_offset(), 0x12AB);
        assert_eq!(memory.data(), b"1234567890123456");
    }

    #[test]
    fn test_acknowledge_report() {
        let data: &[u8] = &[
            0x22,
            0b0000_0000, // no button
            0b0000_0000, // no button
            0x12,        // report number
            0xAB,        // error code
        ];

        let report = InputReport::try_from(data).unwrap();

        let InputReport::Acknowledge(acknowledge) = report else {
            panic!("expected acknowledge report, got {report:?}");
        };
        assert_eq!(acknowledge.button_bytes(), [0, 0]);
        assert_eq!(acknowledge.report_number(), 0x12);
        assert_eq!(acknowledge.error_code(), 0xAB);
    }

    #[test]
    fn test_buttons_mode_0x30() {
        let data: &[u8] = &[
            0x30,
            0b0000_0001, // D-Pad left
            0b0000_0010, // One
        ];

        let report = InputReport::try_from(data).unwrap();

        let InputReport::DataReport(InputReportType::Buttons, payload) = report else {
            panic!("expected 0x30 data report, got {report:?}");
        };
        assert_eq!(payload.payload(), &[0b0000_0001u8, 0b0000_0010]);
    }

    #[test]
    fn test_unknown_and_truncated_reports() {
        assert!(matches!(
            InputReport::try_from(&[0x3A, 0, 0][..]),
            Err(WiimoteError::WiimoteDeviceError(WiimoteDeviceError::InvalidData))
        ));
        assert!(matches!(
            InputReport::try_from(&[0x33, 0, 0, 0][..]),
            Err(WiimoteError::WiimoteDeviceError(WiimoteDeviceError::MissingData))
        ));
        assert!(matches!(
            InputReport::try_from(&[][..]),
            Err(WiimoteError::WiimoteDeviceError(WiimoteDeviceError::MissingData))
        ));
    }

    #[test]
    fn test_report_type_table() {
        for id in (0x20..=0x22).chain(0x30..=0x37).chain(0x3D..=0x3F) {
            let report_type = InputReportType::try_from(id).unwrap();
            assert_eq!(u8::from(report_type), id);
            assert!(report_type.payload_size() <= MAX_PAYLOAD_SIZE);
        }
        assert_eq!(InputReportType::ButtonsAccelIr12.payload_size(), 17);
        assert!(!InputReportType::Status.is_data_report());
        assert!(InputReportType::Ext21.is_data_report());
    }

    #[test]
    fn test_layouts_fit_payload() {
        for id in (0x30..=0x37).chain(0x3D..=0x3F) {
            let report_type = InputReportType::try_from(id).unwrap();
            let layout = report_type.layout();
            let size = report_type.payload_size();
            for range in [layout.buttons, layout.accelerometer, layout.ir, layout.extension]
                .into_iter()
                .flatten()
            {
                assert!(range.end <= size, "{report_type:?} {range:?}");
            }
        }
        assert_eq!(
            InputReportType::ButtonsAccelIr10Ext6.layout(),
            ReportLayout {
                buttons: Some(0..2),
                accelerometer: Some(0..5),
                ir: Some(5..15),
                extension: Some(15..21),
            }
        );
    }
}
