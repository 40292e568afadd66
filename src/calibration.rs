use crate::bits::{field, with_low_bits};
use crate::result::WiimoteDeviceError;

/// Offset subtracted from the 10 bit accelerometer readings so that 0 is the center of the range.
pub const ACCELEROMETER_CENTER: i32 = 0x200;

#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)] // Numbers will not be that large
pub fn normalize<TValue, TResult>(
    value: TValue,
    value_bits: usize,
    zero: TValue,
    max: TValue,
    calibration_bits: usize,
) -> TResult
where
    TValue: std::ops::Shl<usize, Output = TValue> + Into<TResult> + Copy,
    TResult: std::ops::Sub<Output = TResult> + std::ops::Div<Output = TResult> + Copy,
{
    let missing_calibration_bits =
        isize::max(0, value_bits as isize - calibration_bits as isize) as usize;
    let missing_value_bits =
        isize::max(0, calibration_bits as isize - value_bits as isize) as usize;

    let value = value << missing_value_bits;
    let zero = zero << missing_calibration_bits;
    let max = max << missing_calibration_bits;

    (Into::<TResult>::into(value) - Into::<TResult>::into(zero))
        / (Into::<TResult>::into(max) - Into::<TResult>::into(zero))
}

pub fn inverse_lerp(a: f32, b: f32, t: f32) -> f32 {
    (t - a) / (b - a)
}

/// Maps `value` from `[min, max]` to `[0, 1]`, clamping values outside the range.
pub fn unit_range(value: f32, min: f32, max: f32) -> f32 {
    inverse_lerp(min, max, value).clamp(0.0, 1.0)
}

/// The three orientations the Wii remote is held in while calibrating the accelerometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelCalibrationStep {
    /// Lying flat, A button facing the ceiling.
    AButtonUp = 0,
    /// Standing on the IR camera, extension port facing the ceiling.
    ExpansionUp = 1,
    /// Lying on its right side, left side facing the ceiling.
    LeftSideUp = 2,
}

/// Raw centred accelerometer readings captured in each calibration pose.
///
/// The zero point of each axis is the mean of the two poses in which that axis is perpendicular
/// to gravity, the remaining pose gives the reading at 1g.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelerometerCalibration {
    poses: [[i32; 3]; 3],
}

impl Default for AccelerometerCalibration {
    fn default() -> Self {
        Self {
            poses: [[-20, -16, 83], [-20, 80, -20], [84, -20, -12]],
        }
    }
}

impl AccelerometerCalibration {
    #[must_use]
    pub const fn from_poses(poses: [[i32; 3]; 3]) -> Self {
        Self { poses }
    }

    /// Parses the factory calibration stored at EEPROM offset `0x0016`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidChecksum` when the stored checksum does not match the data.
    pub fn from_factory(data: &[u8; 10]) -> Result<Self, WiimoteDeviceError> {
        // https://www.wiibrew.org/wiki/Wiimote#EEPROM_Memory
        // The four bytes starting at 0x0016 store the calibrated zero offsets for the accelerometer
        // (high 8 bits of X,Y,Z in the first three bytes, low 2 bits packed in the fourth byte as --XXYYZZ).
        // The four bytes at 0x001A store the force of gravity on those axes.
        let checksum = data[..9]
            .iter()
            .fold(0x55u8, |sum, byte| sum.wrapping_add(*byte));
        if checksum != data[9] {
            return Err(WiimoteDeviceError::InvalidChecksum);
        }

        let axis = |high: u8, low: u8, shift: u32| -> i32 {
            i32::from(with_low_bits(high, field(low, shift, 2), 2)) - ACCELEROMETER_CENTER
        };
        let zero = [
            axis(data[0], data[3], 4),
            axis(data[1], data[3], 2),
            axis(data[2], data[3], 0),
        ];
        let gravity = [
            axis(data[4], data[7], 4),
            axis(data[5], data[7], 2),
            axis(data[6], data[7], 0),
        ];

        Ok(Self {
            poses: [
                [zero[0], zero[1], gravity[2]],
                [zero[0], gravity[1], zero[2]],
                [gravity[0], zero[1], zero[2]],
            ],
        })
    }

    #[must_use]
    pub const fn poses(&self) -> &[[i32; 3]; 3] {
        &self.poses
    }

    pub fn set_pose(&mut self, step: AccelCalibrationStep, raw: [i32; 3]) {
        self.poses[step as usize] = raw;
    }

    /// Returns the reading of each axis when it is perpendicular to gravity.
    #[must_use]
    pub fn zero_points(&self) -> [f32; 3] {
        let [a_up, expansion_up, left_up] = self.poses;
        #[allow(clippy::cast_precision_loss)]
        let mean = |a: i32, b: i32| (a + b) as f32 / 2.0;
        [
            mean(a_up[0], expansion_up[0]),
            mean(a_up[1], left_up[1]),
            mean(expansion_up[2], left_up[2]),
        ]
    }

    /// Returns the reading of each axis when it points away from gravity.
    #[must_use]
    pub const fn gravity_points(&self) -> [i32; 3] {
        let [a_up, expansion_up, left_up] = self.poses;
        [left_up[0], expansion_up[1], a_up[2]]
    }

    /// Converts a raw centred reading to acceleration in g.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn calibrated(&self, raw: [i32; 3]) -> [f32; 3] {
        let zero = self.zero_points();
        let gravity = self.gravity_points();
        let mut calibrated = [0.0; 3];
        for axis in 0..3 {
            let range = gravity[axis] as f32 - zero[axis];
            if range != 0.0 {
                calibrated[axis] = (raw[axis] as f32 - zero[axis]) / range;
            }
        }
        calibrated
    }
}
