use crate::bits::{field, is_pressed_active_low, with_low_bits};
use crate::calibration::inverse_lerp;

const NEUTRAL_STICK: [u8; 2] = [128, 128];

// Generally the analog stick returns values in the range 35-228 for X and 27-220 for Y
const STICK_MIN: [f32; 2] = [35.0, 27.0];
const STICK_RANGE: f32 = 193.0;

/// Nunchuck extension state.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers/Nunchuck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NunchuckData {
    stick: [u8; 2],
    accelerometer: [u16; 3],
    c: bool,
    z: bool,
}

impl Default for NunchuckData {
    fn default() -> Self {
        Self {
            stick: NEUTRAL_STICK,
            accelerometer: [0; 3],
            c: false,
            z: false,
        }
    }
}

impl NunchuckData {
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        let [sx, sy, ax, ay, az, flags, ..] = *data else {
            *self = Self::default();
            return false;
        };

        self.stick = [sx, sy];
        self.accelerometer = [
            with_low_bits(ax, field(flags, 2, 2), 2),
            with_low_bits(ay, field(flags, 4, 2), 2),
            with_low_bits(az, field(flags, 6, 2), 2),
        ];
        self.c = is_pressed_active_low(flags, 0b10);
        self.z = is_pressed_active_low(flags, 0b01);
        true
    }

    /// Decodes a frame of a Nunchuck plugged into a MotionPlus in pass-through mode.
    /// The accelerometer loses its least significant bit in this mode.
    pub(crate) fn interpret_passthrough(&mut self, data: &[u8]) -> bool {
        let [sx, sy, ax, ay, az, flags, ..] = *data else {
            *self = Self::default();
            return false;
        };

        // https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers/Wii_Motion_Plus#Nunchuck_pass-through_mode
        let az = (az & 0xFE) | field(flags, 7, 1);
        let flags = field(flags, 6, 1) << 7
            | field(flags, 5, 1) << 5
            | field(flags, 4, 1) << 3
            | field(flags, 3, 1) << 1
            | field(flags, 2, 1);
        self.interpret(&[sx, sy, ax, ay, az, flags])
    }

    /// Returns the raw stick position, roughly centred at 128.
    #[must_use]
    pub const fn stick(&self) -> [u8; 2] {
        self.stick
    }

    /// Returns the stick position mapped to approximately `[0, 1]`.
    #[must_use]
    pub fn stick_01(&self) -> [f32; 2] {
        [0, 1].map(|axis| {
            inverse_lerp(
                STICK_MIN[axis],
                STICK_MIN[axis] + STICK_RANGE,
                f32::from(self.stick[axis]),
            )
        })
    }

    /// Returns the raw 10 bit accelerometer readings.
    #[must_use]
    pub const fn accelerometer(&self) -> [u16; 3] {
        self.accelerometer
    }

    #[must_use]
    pub const fn c(&self) -> bool {
        self.c
    }

    #[must_use]
    pub const fn z(&self) -> bool {
        self.z
    }
}
