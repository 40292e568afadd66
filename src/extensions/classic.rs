use bitflags::bitflags;

use crate::bits::field;

bitflags! {
    /// Buttons of the Classic Controller as the `u16` of bytes 4 (high) and 5 (low).
    /// Set flags are pressed buttons, the wire format is active-low.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ClassicButtons: u16 {
        const DPAD_UP = 1 << 0;
        const DPAD_LEFT = 1 << 1;
        const ZR = 1 << 2;
        const X = 1 << 3;
        const A = 1 << 4;
        const Y = 1 << 5;
        const B = 1 << 6;
        const ZL = 1 << 7;

        const R = 1 << 9;
        const PLUS = 1 << 10;
        const HOME = 1 << 11;
        const MINUS = 1 << 12;
        const L = 1 << 13;
        const DPAD_DOWN = 1 << 14;
        const DPAD_RIGHT = 1 << 15;
    }
}

impl ClassicButtons {
    /// Decodes the two active-low button bytes shared by the Classic Controller and the Wii U Pro Controller.
    #[must_use]
    pub const fn from_active_low(high: u8, low: u8) -> Self {
        Self::from_bits_truncate(!u16::from_be_bytes([high, low]))
    }
}

/// Classic Controller (and Classic Controller Pro) extension state.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers/Classic_Controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicControllerData {
    left_stick: [u8; 2],
    right_stick: [u8; 2],
    left_trigger: u8,
    right_trigger: u8,
    buttons: ClassicButtons,
}

impl Default for ClassicControllerData {
    fn default() -> Self {
        Self {
            left_stick: [32, 32],
            right_stick: [16, 16],
            left_trigger: 0,
            right_trigger: 0,
            buttons: ClassicButtons::empty(),
        }
    }
}

impl ClassicControllerData {
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        let [b0, b1, b2, b3, b4, b5, ..] = *data else {
            *self = Self::default();
            return false;
        };

        self.left_stick = [field(b0, 0, 6), field(b1, 0, 6)];
        self.right_stick = [
            field(b0, 6, 2) << 3 | field(b1, 6, 2) << 1 | field(b2, 7, 1),
            field(b2, 0, 5),
        ];
        self.left_trigger = field(b2, 5, 2) << 3 | field(b3, 5, 3);
        self.right_trigger = field(b3, 0, 5);
        self.buttons = ClassicButtons::from_active_low(b4, b5);
        true
    }

    /// Decodes a frame of a Classic Controller plugged into a MotionPlus in pass-through mode.
    /// The left stick loses its least significant bit in this mode.
    pub(crate) fn interpret_passthrough(&mut self, data: &[u8]) -> bool {
        let [b0, b1, b2, b3, b4, b5, ..] = *data else {
            *self = Self::default();
            return false;
        };

        // https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers/Wii_Motion_Plus#Classic_Controller_pass-through_mode
        // D-pad up and left move to bit 0 of bytes 0 and 1.
        let b5 = (b5 & 0xFC) | field(b1, 0, 1) << 1 | field(b0, 0, 1);
        self.interpret(&[b0 & 0xFE, b1 & 0xFE, b2, b3, b4 | 0x01, b5])
    }

    /// Returns the raw left stick position, 6 bits per axis.
    #[must_use]
    pub const fn left_stick(&self) -> [u8; 2] {
        self.left_stick
    }

    /// Returns the raw right stick position, 5 bits per axis.
    #[must_use]
    pub const fn right_stick(&self) -> [u8; 2] {
        self.right_stick
    }

    #[must_use]
    pub fn left_stick_01(&self) -> [f32; 2] {
        self.left_stick.map(|value| f32::from(value) / 63.0)
    }

    #[must_use]
    pub fn right_stick_01(&self) -> [f32; 2] {
        self.right_stick.map(|value| f32::from(value) / 31.0)
    }

    /// Analog position of the left trigger, 5 bits.
    #[must_use]
    pub const fn left_trigger(&self) -> u8 {
        self.left_trigger
    }

    /// Analog position of the right trigger, 5 bits.
    #[must_use]
    pub const fn right_trigger(&self) -> u8 {
        self.right_trigger
    }

    #[must_use]
    pub const fn buttons(&self) -> ClassicButtons {
        self.buttons
    }

    #[must_use]
    pub const fn is_pressed(&self, button: ClassicButtons) -> bool {
        self.buttons.contains(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_released_controller() {
        let mut classic = ClassicControllerData::default();

        assert!(classic.interpret(&[0x3F, 0x00, 0x00, 0x00, 0xFF, 0xFF]));

        assert_eq!(classic.left_stick(), [63, 0]);
        assert_eq!(classic.buttons(), ClassicButtons::empty());
        assert_eq!(classic.left_stick_01(), [1.0, 0.0]);
    }

    #[test]
    fn test_right_stick_and_triggers() {
        let mut classic = ClassicControllerData::default();

        // RX = 0b10101, RY = 0b01010, LT = 0b11001, RT = 0b00111
        assert!(classic.interpret(&[0b1000_0000, 0b1000_0000, 0b1110_1010, 0b0010_0111, 0xFF, 0xFF]));

        assert_eq!(classic.right_stick(), [0b10101, 0b01010]);
        assert_eq!(classic.left_trigger(), 0b11001);
        assert_eq!(classic.right_trigger(), 0b00111);
    }

    #[test]
    fn test_active_low_buttons() {
        let mut classic = ClassicControllerData::default();

        classic.interpret(&[0, 0, 0, 0, 0b0111_1111, 0b1110_1110]);

        assert_eq!(
            classic.buttons(),
            ClassicButtons::DPAD_RIGHT | ClassicButtons::A | ClassicButtons::DPAD_UP
        );
    }

    #[test]
    fn test_passthrough_dpad() {
        let mut classic = ClassicControllerData::default();

        // D-pad up pressed (byte 0 bit 0 clear), left released
        assert!(classic.interpret_passthrough(&[0x20, 0x01, 0, 0, 0xFE, 0xFC]));

        assert_eq!(classic.left_stick(), [0x20, 0x00]);
        assert_eq!(classic.buttons(), ClassicButtons::DPAD_UP);
    }

    #[test]
    fn test_short_data_resets() {
        let mut classic = ClassicControllerData::default();
        classic.interpret(&[0, 0, 0, 0, 0, 0]);

        assert!(!classic.interpret(&[0; 4]));

        assert_eq!(classic, ClassicControllerData::default());
    }
}
