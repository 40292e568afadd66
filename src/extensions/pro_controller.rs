use crate::bits::{field, is_pressed_active_low, with_low_bits};
use crate::calibration::inverse_lerp;
use crate::extensions::classic::ClassicButtons;

// Empirical stick ranges
const LEFT_STICK_MIN: [f32; 2] = [803.0, 843.0];
const LEFT_STICK_MAX: [f32; 2] = [3225.0, 3291.0];
const RIGHT_STICK_MIN: [f32; 2] = [852.0, 810.0];
const RIGHT_STICK_MAX: [f32; 2] = [3169.0, 3315.0];

const NEUTRAL_STICK: [u16; 2] = [2048, 2048];

/// Wii U Pro Controller state. The controller identifies as an extension of a Wii Remote Plus.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wii_U_Pro_Controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProControllerData {
    left_stick: [u16; 2],
    right_stick: [u16; 2],
    buttons: ClassicButtons,
    left_stick_button: bool,
    right_stick_button: bool,
}

impl Default for ProControllerData {
    fn default() -> Self {
        Self {
            left_stick: NEUTRAL_STICK,
            right_stick: NEUTRAL_STICK,
            buttons: ClassicButtons::empty(),
            left_stick_button: false,
            right_stick_button: false,
        }
    }
}

impl ProControllerData {
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        let [lx, lx_high, rx, rx_high, ly, ly_high, ry, ry_high, b8, b9, b10, ..] = *data else {
            *self = Self::default();
            return false;
        };

        let stick = |low: u8, high: u8| with_low_bits(field(high, 0, 4), low, 8);
        self.left_stick = [stick(lx, lx_high), stick(ly, ly_high)];
        self.right_stick = [stick(rx, rx_high), stick(ry, ry_high)];
        self.buttons = ClassicButtons::from_active_low(b8, b9);
        self.left_stick_button = is_pressed_active_low(b10, 0b10);
        self.right_stick_button = is_pressed_active_low(b10, 0b01);
        true
    }

    /// Returns the raw 12 bit left stick position.
    #[must_use]
    pub const fn left_stick(&self) -> [u16; 2] {
        self.left_stick
    }

    /// Returns the raw 12 bit right stick position.
    #[must_use]
    pub const fn right_stick(&self) -> [u16; 2] {
        self.right_stick
    }

    #[must_use]
    pub fn left_stick_01(&self) -> [f32; 2] {
        stick_01(self.left_stick, LEFT_STICK_MIN, LEFT_STICK_MAX)
    }

    #[must_use]
    pub fn right_stick_01(&self) -> [f32; 2] {
        stick_01(self.right_stick, RIGHT_STICK_MIN, RIGHT_STICK_MAX)
    }

    #[must_use]
    pub const fn buttons(&self) -> ClassicButtons {
        self.buttons
    }

    #[must_use]
    pub const fn is_pressed(&self, button: ClassicButtons) -> bool {
        self.buttons.contains(button)
    }

    #[must_use]
    pub const fn left_stick_button(&self) -> bool {
        self.left_stick_button
    }

    #[must_use]
    pub const fn right_stick_button(&self) -> bool {
        self.right_stick_button
    }
}

fn stick_01(stick: [u16; 2], min: [f32; 2], max: [f32; 2]) -> [f32; 2] {
    [0, 1].map(|axis| inverse_lerp(min[axis], max[axis], f32::from(stick[axis])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticks() {
        let mut pro = ProControllerData::default();

        let data = [0x23, 0xF3, 0x54, 0x03, 0x4B, 0x03, 0x2A, 0x03, 0xFF, 0xFF, 0xFF];
        assert!(pro.interpret(&data));

        assert_eq!(pro.left_stick(), [803, 843]);
        assert_eq!(pro.right_stick(), [852, 810]);
        assert_eq!(pro.left_stick_01(), [0.0, 0.0]);
        assert_eq!(pro.right_stick_01(), [0.0, 0.0]);
        assert_eq!(pro.buttons(), ClassicButtons::empty());
    }

    #[test]
    fn test_buttons_and_stick_clicks() {
        let mut pro = ProControllerData::default();

        let data = [0, 0, 0, 0, 0, 0, 0, 0, 0b1101_1111, 0b1111_0111, 0b1111_1101];
        assert!(pro.interpret(&data));

        assert_eq!(pro.buttons(), ClassicButtons::L | ClassicButtons::X);
        assert!(pro.left_stick_button());
        assert!(!pro.right_stick_button());
    }

    #[test]
    fn test_short_data_resets() {
        let mut pro = ProControllerData::default();

        assert!(!pro.interpret(&[0; 10]));

        assert_eq!(pro, ProControllerData::default());
    }
}
