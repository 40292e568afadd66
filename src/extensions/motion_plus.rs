use crate::bits::{field, is_set, with_low_bits};
use crate::calibration::normalize;
use crate::extensions::classic::ClassicControllerData;
use crate::extensions::nunchuck::NunchuckData;
use crate::result::WiimoteDeviceError;

/// Control register receiving the initialization byte of the MotionPlus.
pub const MOTION_PLUS_INIT_REGISTER: u32 = 0xA6_00F0;
/// Control register receiving the mode byte that activates the MotionPlus.
pub const MOTION_PLUS_MODE_REGISTER: u32 = 0xA6_00FE;
/// Identifier of a MotionPlus that is present but not activated.
pub const MOTION_PLUS_PROBE_REGISTER: u32 = 0xA6_00FA;
/// Start of the two 16 byte factory calibration blocks (fast, then slow).
pub const MOTION_PLUS_CALIBRATION_REGISTER: u32 = 0xA6_0020;

// Empirical scale of the raw gyroscope readings
const DEGREES_PER_UNIT: f32 = 0.05;
const FAST_MODE_MULTIPLIER: f32 = 2000.0 / 440.0;
const DEFAULT_ZERO_VALUE: i32 = 8063;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPlusMode {
    Inactive,
    Active,
    NunchuckPassthrough,
    ClassicControllerPassthrough,
}

impl MotionPlusMode {
    /// The byte written to the mode register to activate the mode, `None` for `Inactive`.
    #[must_use]
    pub const fn register_value(self) -> Option<u8> {
        match self {
            Self::Inactive => None,
            Self::Active => Some(0x04),
            Self::NunchuckPassthrough => Some(0x05),
            Self::ClassicControllerPassthrough => Some(0x07),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPlusType {
    External,
    Builtin,
}

impl MotionPlusType {
    /// Matches the identifier read from the probe register of an inactive MotionPlus.
    ///
    /// Byte 4 is 0x00 after power up and holds the last mode after a deactivation,
    /// byte 0 differs between the external MotionPlus and the one built into the Wii Remote Plus.
    /// The masking is reverse engineered and not verified for every hardware revision.
    #[must_use]
    pub fn detect(identifier: &[u8]) -> Option<Self> {
        match *identifier {
            [0x00, 0x00, 0xA6, 0x20, _, 0x05] => Some(Self::External),
            [_, 0x00, 0xA6, 0x20, _, 0x05] => Some(Self::Builtin),
            _ => None,
        }
    }
}

/// Factory calibration of the MotionPlus gyroscopes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MotionPlusCalibration {
    fast: MotionPlusCalibrationData,
    slow: MotionPlusCalibrationData,
}

impl MotionPlusCalibration {
    /// Parses the two calibration blocks read from `0xA60020`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidChecksum` if the CRC-32 stored in the last two bytes of both blocks does not match.
    pub fn from_register_block(data: &[u8; 32]) -> Result<Self, WiimoteDeviceError> {
        let mut hasher = crc32fast::Hasher::new();
        let mut checksum = [0u8; 4];
        let mut parts = [[0u8; 16]; 2];

        for (index, part) in parts.iter_mut().enumerate() {
            part.copy_from_slice(&data[index * 16..(index + 1) * 16]);
            hasher.update(&part[0..14]);
            checksum[index * 2..index * 2 + 2].copy_from_slice(&part[14..16]);
        }

        if hasher.finalize() != u32::from_be_bytes(checksum) {
            return Err(WiimoteDeviceError::InvalidChecksum);
        }

        Ok(Self {
            fast: MotionPlusCalibrationData::from(parts[0]),
            slow: MotionPlusCalibrationData::from(parts[1]),
        })
    }

    /// Converts the raw gyroscope values to degrees per second (yaw, roll, pitch).
    #[must_use]
    pub fn angular_velocity(&self, data: &MotionPlusData) -> [f64; 3] {
        // https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers/Wii_Motion_Plus#Data_Format
        const UNIT_PER_DEG_PER_S: f64 = 8192.0 / 595.0;
        const HIGH_SPEED_MULTIPLIER: f64 = 2000.0 / 440.0;

        let [yaw, roll, pitch] = data.raw();
        let [yaw_slow, roll_slow, pitch_slow] = data.slow();
        let axes = [
            (yaw, yaw_slow, Axis::Yaw),
            (roll, roll_slow, Axis::Roll),
            (pitch, pitch_slow, Axis::Pitch),
        ];

        axes.map(|(value, slow, axis)| {
            let calibration = if slow { &self.slow } else { &self.fast };
            // At high speed raw values are small with the same deg/s to reach higher values on top
            let mode_multiplier = if slow { 1.0 } else { HIGH_SPEED_MULTIPLIER };
            let (zero, scale) = calibration.axis(axis);
            let degrees = f64::from(calibration.degrees_div_6) * 6.0;

            let normalized: f64 = normalize(value, 14, zero, scale, 16);
            normalized * degrees * mode_multiplier / UNIT_PER_DEG_PER_S
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Yaw,
    Roll,
    Pitch,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct MotionPlusCalibrationData {
    yaw_zero_value: u16,
    roll_zero_value: u16,
    pitch_zero_value: u16,
    yaw_scale: u16,
    roll_scale: u16,
    pitch_scale: u16,
    degrees_div_6: u8,
}

impl MotionPlusCalibrationData {
    const fn axis(&self, axis: Axis) -> (u16, u16) {
        match axis {
            Axis::Yaw => (self.yaw_zero_value, self.yaw_scale),
            Axis::Roll => (self.roll_zero_value, self.roll_scale),
            Axis::Pitch => (self.pitch_zero_value, self.pitch_scale),
        }
    }
}

impl From<[u8; 16]> for MotionPlusCalibrationData {
    fn from(value: [u8; 16]) -> Self {
        Self {
            yaw_zero_value: u16::from_be_bytes([value[0], value[1]]),
            roll_zero_value: u16::from_be_bytes([value[2], value[3]]),
            pitch_zero_value: u16::from_be_bytes([value[4], value[5]]),
            yaw_scale: u16::from_be_bytes([value[6], value[7]]),
            roll_scale: u16::from_be_bytes([value[8], value[9]]),
            pitch_scale: u16::from_be_bytes([value[10], value[11]]),
            degrees_div_6: value[12],
        }
    }
}

/// The extension plugged into a MotionPlus running in a pass-through mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughData {
    Nunchuck(NunchuckData),
    ClassicController(ClassicControllerData),
}

/// MotionPlus state.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers/Wii_Motion_Plus
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPlusData {
    mode: MotionPlusMode,
    yaw: u16,
    roll: u16,
    pitch: u16,
    yaw_slow: bool,
    roll_slow: bool,
    pitch_slow: bool,
    extension_connected: bool,
    zero: [i32; 3],
    calibration: Option<MotionPlusCalibration>,
    passthrough: Option<PassthroughData>,
}

impl Default for MotionPlusData {
    fn default() -> Self {
        Self::new(MotionPlusMode::Active)
    }
}

impl MotionPlusData {
    #[must_use]
    pub fn new(mode: MotionPlusMode) -> Self {
        let mut data = Self {
            mode: MotionPlusMode::Inactive,
            yaw: 0,
            roll: 0,
            pitch: 0,
            yaw_slow: false,
            roll_slow: false,
            pitch_slow: false,
            extension_connected: false,
            zero: [DEFAULT_ZERO_VALUE; 3],
            calibration: None,
            passthrough: None,
        };
        data.set_mode(mode);
        data
    }

    #[must_use]
    pub const fn mode(&self) -> MotionPlusMode {
        self.mode
    }

    /// Switches the pass-through mode. Zero values and calibration are kept,
    /// the embedded extension is replaced only if its kind changes.
    pub fn set_mode(&mut self, mode: MotionPlusMode) {
        self.passthrough = match (mode, self.passthrough) {
            (MotionPlusMode::NunchuckPassthrough, Some(PassthroughData::Nunchuck(nunchuck))) => {
                Some(PassthroughData::Nunchuck(nunchuck))
            }
            (MotionPlusMode::NunchuckPassthrough, _) => {
                Some(PassthroughData::Nunchuck(NunchuckData::default()))
            }
            (
                MotionPlusMode::ClassicControllerPassthrough,
                Some(PassthroughData::ClassicController(classic)),
            ) => Some(PassthroughData::ClassicController(classic)),
            (MotionPlusMode::ClassicControllerPassthrough, _) => Some(
                PassthroughData::ClassicController(ClassicControllerData::default()),
            ),
            (MotionPlusMode::Active | MotionPlusMode::Inactive, _) => None,
        };
        self.mode = mode;
    }

    /// Decodes a MotionPlus frame or, in pass-through mode, a frame of the embedded extension.
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        let [b0, b1, b2, b3, b4, b5, ..] = *data else {
            self.reset_readings();
            return false;
        };

        // https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers/Wii_Motion_Plus#Nunchuck_pass-through_mode
        // Bit 1 of Byte 5 is used to determine which type of report is received:
        // it is 1 when it contains MotionPlus Data and 0 when it contains extension data.
        if !is_set(b5, 0b10) {
            self.extension_connected = is_set(b4, 0b01);
            return match self.passthrough.as_mut() {
                Some(PassthroughData::Nunchuck(nunchuck)) => nunchuck.interpret_passthrough(data),
                Some(PassthroughData::ClassicController(classic)) => {
                    classic.interpret_passthrough(data)
                }
                None => false,
            };
        }

        self.yaw = with_low_bits(field(b3, 2, 6), b0, 8);
        self.roll = with_low_bits(field(b4, 2, 6), b1, 8);
        self.pitch = with_low_bits(field(b5, 2, 6), b2, 8);
        self.yaw_slow = is_set(b3, 0b10);
        self.pitch_slow = is_set(b3, 0b01);
        self.roll_slow = is_set(b4, 0b10);
        self.extension_connected = is_set(b4, 0b01);
        true
    }

    fn reset_readings(&mut self) {
        self.yaw = 0;
        self.roll = 0;
        self.pitch = 0;
        self.yaw_slow = false;
        self.roll_slow = false;
        self.pitch_slow = false;
        self.extension_connected = false;
    }

    /// Uses the current readings as the rest position of the gyroscopes.
    pub fn set_zero_values(&mut self) {
        self.zero = self.raw().map(i32::from);
    }

    /// Returns the raw 14 bit readings (yaw, roll, pitch).
    #[must_use]
    pub const fn raw(&self) -> [u16; 3] {
        [self.yaw, self.roll, self.pitch]
    }

    /// Returns whether each axis (yaw, roll, pitch) is in slow mode.
    #[must_use]
    pub const fn slow(&self) -> [bool; 3] {
        [self.yaw_slow, self.roll_slow, self.pitch_slow]
    }

    #[must_use]
    pub const fn zero_values(&self) -> [i32; 3] {
        self.zero
    }

    #[must_use]
    pub const fn extension_connected(&self) -> bool {
        self.extension_connected
    }

    /// Returns the rotation speed in degrees per second (yaw, roll, pitch) relative to the zero values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn speed(&self) -> [f32; 3] {
        let mut speed = [0.0; 3];
        for (axis, ((raw, zero), slow)) in self
            .raw()
            .iter()
            .zip(self.zero)
            .zip(self.slow())
            .enumerate()
        {
            let multiplier = if slow { 1.0 } else { FAST_MODE_MULTIPLIER };
            speed[axis] = (i32::from(*raw) - zero) as f32 * DEGREES_PER_UNIT * multiplier;
        }
        speed
    }

    #[must_use]
    pub fn yaw_speed(&self) -> f32 {
        self.speed()[0]
    }

    #[must_use]
    pub fn roll_speed(&self) -> f32 {
        self.speed()[1]
    }

    #[must_use]
    pub fn pitch_speed(&self) -> f32 {
        self.speed()[2]
    }

    #[must_use]
    pub const fn calibration(&self) -> Option<&MotionPlusCalibration> {
        self.calibration.as_ref()
    }

    pub fn set_calibration(&mut self, calibration: MotionPlusCalibration) {
        self.calibration = Some(calibration);
    }

    /// Returns the angular velocity using the factory calibration, if it was read.
    #[must_use]
    pub fn angular_velocity(&self) -> Option<[f64; 3]> {
        self.calibration
            .as_ref()
            .map(|calibration| calibration.angular_velocity(self))
    }

    /// Returns the extension plugged into the MotionPlus in pass-through mode.
    #[must_use]
    pub const fn passthrough(&self) -> Option<&PassthroughData> {
        self.passthrough.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motion_plus_frame(yaw: u16, roll: u16, pitch: u16, slow: [bool; 3]) -> [u8; 6] {
        let [yaw_slow, roll_slow, pitch_slow] = slow.map(u8::from);
        [
            (yaw & 0xFF) as u8,
            (roll & 0xFF) as u8,
            (pitch & 0xFF) as u8,
            ((yaw >> 8) as u8) << 2 | yaw_slow << 1 | pitch_slow,
            ((roll >> 8) as u8) << 2 | roll_slow << 1,
            ((pitch >> 8) as u8) << 2 | 0b10,
        ]
    }

    #[test]
    fn test_raw_values() {
        let mut motion_plus = MotionPlusData::default();

        let frame = motion_plus_frame(0x1F7F, 0x2000, 0x0123, [true, false, true]);
        assert!(motion_plus.interpret(&frame));

        assert_eq!(motion_plus.raw(), [0x1F7F, 0x2000, 0x0123]);
        assert_eq!(motion_plus.slow(), [true, false, true]);
        assert!(!motion_plus.extension_connected());
    }

    #[test]
    fn test_speed_from_default_zero() {
        let mut motion_plus = MotionPlusData::default();

        motion_plus.interpret(&motion_plus_frame(8063 + 20, 8063, 8063 - 20, [true, false, true]));

        let [yaw, roll, pitch] = motion_plus.speed();
        assert!((yaw - 1.0).abs() < 1e-5);
        assert!(roll.abs() < 1e-5);
        assert!((pitch + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fast_mode_multiplier() {
        let mut motion_plus = MotionPlusData::default();

        motion_plus.interpret(&motion_plus_frame(8063 + 20, 8063, 8063, [false, true, true]));

        assert!((motion_plus.yaw_speed() - 2000.0 / 440.0).abs() < 1e-4);
    }

    #[test]
    fn test_set_zero_values() {
        let mut motion_plus = MotionPlusData::default();
        motion_plus.interpret(&motion_plus_frame(8000, 8100, 8200, [true; 3]));

        motion_plus.set_zero_values();

        assert_eq!(motion_plus.zero_values(), [8000, 8100, 8200]);
        assert_eq!(motion_plus.raw(), [8000, 8100, 8200]);
        assert_eq!(motion_plus.speed(), [0.0, 0.0, 0.0]);
        motion_plus.interpret(&motion_plus_frame(8000, 8100, 8200, [true; 3]));
        assert_eq!(motion_plus.speed(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_nunchuck_passthrough_frame() {
        let mut motion_plus = MotionPlusData::new(MotionPlusMode::NunchuckPassthrough);

        // Z pressed, C released, byte 5 bit 1 clear marks extension data
        assert!(motion_plus.interpret(&[100, 120, 0x80, 0x80, 0x81, 0b0000_1000]));

        let Some(PassthroughData::Nunchuck(nunchuck)) = motion_plus.passthrough() else {
            panic!("expected nunchuck pass-through data");
        };
        assert_eq!(nunchuck.stick(), [100, 120]);
        assert!(nunchuck.z());
        assert!(!nunchuck.c());
        assert!(motion_plus.extension_connected());
    }

    #[test]
    fn test_extension_frame_without_passthrough() {
        let mut motion_plus = MotionPlusData::default();

        assert!(!motion_plus.interpret(&[0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_set_mode_keeps_zero_values() {
        let mut motion_plus = MotionPlusData::default();
        motion_plus.interpret(&motion_plus_frame(8000, 8100, 8200, [true; 3]));
        motion_plus.set_zero_values();

        motion_plus.set_mode(MotionPlusMode::ClassicControllerPassthrough);

        assert_eq!(motion_plus.zero_values(), [8000, 8100, 8200]);
        assert!(matches!(
            motion_plus.passthrough(),
            Some(PassthroughData::ClassicController(_))
        ));
    }

    #[test]
    fn test_detect_motion_plus() {
        assert_eq!(
            MotionPlusType::detect(&[0x00, 0x00, 0xA6, 0x20, 0x00, 0x05]),
            Some(MotionPlusType::External)
        );
        assert_eq!(
            MotionPlusType::detect(&[0x01, 0x00, 0xA6, 0x20, 0x04, 0x05]),
            Some(MotionPlusType::Builtin)
        );
        assert_eq!(
            MotionPlusType::detect(&[0x00, 0x00, 0xA4, 0x20, 0x00, 0x00]),
            None
        );
    }

    #[test]
    fn test_calibration_checksum() {
        let mut data = [0u8; 32];
        data[0..2].copy_from_slice(&0x8000u16.to_be_bytes());
        data[6..8].copy_from_slice(&0xC000u16.to_be_bytes());
        data[12] = 100;
        data.copy_within(0..16, 16);

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&data[0..14]);
        hasher.update(&data[16..30]);
        let checksum = hasher.finalize().to_be_bytes();
        data[14..16].copy_from_slice(&checksum[0..2]);
        data[30..32].copy_from_slice(&checksum[2..4]);

        let calibration = MotionPlusCalibration::from_register_block(&data).unwrap();
        let mut motion_plus = MotionPlusData::default();
        motion_plus.set_calibration(calibration);
        // 0x2800 << 2 is halfway between zero (0x8000) and scale (0xC000) for yaw
        motion_plus.interpret(&motion_plus_frame(0x2800, 0x2000, 0x2000, [true; 3]));
        let [yaw, _, _] = motion_plus.angular_velocity().unwrap();
        assert!((yaw - 0.5 * 600.0 * 595.0 / 8192.0).abs() < 1e-6);

        data[31] ^= 0xFF;
        assert_eq!(
            MotionPlusCalibration::from_register_block(&data),
            Err(WiimoteDeviceError::InvalidChecksum)
        );
    }
}
