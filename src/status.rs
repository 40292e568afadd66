use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StatusFlags: u8 {
        const BATTERY_LOW = 0b0000_0001;
        const EXTENSION_CONTROLLER_CONNECTED = 0b0000_0010;
        const SPEAKER_ENABLED = 0b0000_0100;
        const IR_CAMERA_ENABLED = 0b0000_1000;
        const LED_1 = 0b0001_0000;
        const LED_2 = 0b0010_0000;
        const LED_3 = 0b0100_0000;
        const LED_4 = 0b1000_0000;
    }
}

/// Status information of the Wii remote, refreshed by every `0x20` report.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#0x20:_Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusData {
    flags: StatusFlags,
    battery_level: u8,
}

impl StatusData {
    /// Decodes the flag byte and the battery level byte.
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        if let [flags, battery_level] = *data {
            self.flags = StatusFlags::from_bits_retain(flags);
            self.battery_level = battery_level;
            true
        } else {
            *self = Self::default();
            false
        }
    }

    /// Returns the status flags.
    #[must_use]
    pub const fn flags(&self) -> StatusFlags {
        self.flags
    }

    /// Returns the battery level.
    #[must_use]
    pub const fn battery_level(&self) -> u8 {
        self.battery_level
    }

    #[must_use]
    pub const fn battery_low(&self) -> bool {
        self.flags.contains(StatusFlags::BATTERY_LOW)
    }

    #[must_use]
    pub const fn extension_connected(&self) -> bool {
        self.flags.contains(StatusFlags::EXTENSION_CONTROLLER_CONNECTED)
    }

    #[must_use]
    pub const fn speaker_enabled(&self) -> bool {
        self.flags.contains(StatusFlags::SPEAKER_ENABLED)
    }

    #[must_use]
    pub const fn ir_enabled(&self) -> bool {
        self.flags.contains(StatusFlags::IR_CAMERA_ENABLED)
    }

    /// Returns which of the four player LEDs are lit.
    #[must_use]
    pub const fn leds(&self) -> [bool; 4] {
        [
            self.flags.contains(StatusFlags::LED_1),
            self.flags.contains(StatusFlags::LED_2),
            self.flags.contains(StatusFlags::LED_3),
            self.flags.contains(StatusFlags::LED_4),
        ]
    }
}
