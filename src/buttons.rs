use bitflags::bitflags;

bitflags! {
    /// The core buttons of the Wii remote as the little-endian `u16` of the two button bytes.
    ///
    /// Bits 5 and 6 of both bytes carry accelerometer data and are never set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonFlags: u16 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const UP = 1 << 3;
        const PLUS = 1 << 4;

        const TWO = 1 << 8;
        const ONE = 1 << 9;
        const B = 1 << 10;
        const A = 1 << 11;
        const MINUS = 1 << 12;

        const HOME = 1 << 15;
    }
}

impl ButtonFlags {
    /// Decodes the two button bytes present at the start of most input reports.
    #[must_use]
    pub const fn from_report_bytes(first: u8, second: u8) -> Self {
        Self::from_bits_truncate(u16::from_le_bytes([first, second]))
    }

    /// Encodes the flags back into the two button bytes.
    #[must_use]
    pub const fn to_report_bytes(self) -> [u8; 2] {
        self.bits().to_le_bytes()
    }
}

/// Core button state of the Wii remote.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#Buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonData {
    flags: ButtonFlags,
}

impl ButtonData {
    /// Decodes exactly two button bytes. Any other length releases all buttons.
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        if let [first, second] = *data {
            self.flags = ButtonFlags::from_report_bytes(first, second);
            true
        } else {
            self.flags = ButtonFlags::empty();
            false
        }
    }

    #[must_use]
    pub const fn flags(&self) -> ButtonFlags {
        self.flags
    }

    #[must_use]
    pub const fn is_pressed(&self, button: ButtonFlags) -> bool {
        self.flags.contains(button)
    }

    #[must_use]
    pub const fn d_left(&self) -> bool {
        self.is_pressed(ButtonFlags::LEFT)
    }

    #[must_use]
    pub const fn d_right(&self) -> bool {
        self.is_pressed(ButtonFlags::RIGHT)
    }

    #[must_use]
    pub const fn d_up(&self) -> bool {
        self.is_pressed(ButtonFlags::UP)
    }

    #[must_use]
    pub const fn d_down(&self) -> bool {
        self.is_pressed(ButtonFlags::DOWN)
    }

    #[must_use]
    pub const fn a(&self) -> bool {
        self.is_pressed(ButtonFlags::A)
    }

    #[must_use]
    pub const fn b(&self) -> bool {
        self.is_pressed(ButtonFlags::B)
    }

    #[must_use]
    pub const fn one(&self) -> bool {
        self.is_pressed(ButtonFlags::ONE)
    }

    #[must_use]
    pub const fn two(&self) -> bool {
        self.is_pressed(ButtonFlags::TWO)
    }

    #[must_use]
    pub const fn plus(&self) -> bool {
        self.is_pressed(ButtonFlags::PLUS)
    }

    #[must_use]
    pub const fn minus(&self) -> bool {
        self.is_pressed(ButtonFlags::MINUS)
    }

    #[must_use]
    pub const fn home(&self) -> bool {
        self.is_pressed(ButtonFlags::HOME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_decode() {
        let mut buttons = ButtonData::default();

        assert!(buttons.interpret(&[0b0001_0100, 0b0000_0100]));

        assert_eq!(
            buttons.flags(),
            ButtonFlags::DOWN | ButtonFlags::PLUS | ButtonFlags::B
        );
        assert!(buttons.d_down() && buttons.plus() && buttons.b());
        assert!(!buttons.a());
    }

    #[test]
    fn test_accelerometer_bits_ignored() {
        let mut buttons = ButtonData::default();

        assert!(buttons.interpret(&[0b0110_0000, 0b0110_1000]));

        assert_eq!(buttons.flags(), ButtonFlags::A);
    }

    #[test]
    fn test_wrong_length_releases_buttons() {
        let mut buttons = ButtonData::default();
        buttons.interpret(&[0xFF, 0xFF]);

        assert!(!buttons.interpret(&[0xFF]));

        assert_eq!(buttons.flags(), ButtonFlags::empty());
    }

    #[test]
    fn test_home_is_high_bit() {
        let mut buttons = ButtonData::default();

        buttons.interpret(&[0x00, 0x80]);

        assert!(buttons.home());
        assert_eq!(ButtonFlags::HOME.to_report_bytes(), [0x00, 0x80]);
    }
}
