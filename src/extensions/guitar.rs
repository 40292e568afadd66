use bitflags::bitflags;

use crate::bits::field;
use crate::calibration::unit_range;

/// Touch bar reading when no slider is touched.
const SLIDER_RELEASED: u8 = 0x0F;
const SLIDER_MIN: f32 = 4.0;
const SLIDER_MAX: f32 = 31.0;

bitflags! {
    /// Guitar buttons as the `u16` of bytes 4 (high) and 5 (low).
    /// Set flags are pressed buttons, the wire format is active-low.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GuitarButtons: u16 {
        const STRUM_UP = 1 << 0;
        const YELLOW = 1 << 3;
        const GREEN = 1 << 4;
        const BLUE = 1 << 5;
        const RED = 1 << 6;
        const ORANGE = 1 << 7;

        const PLUS = 1 << 10;
        const MINUS = 1 << 12;
        const STRUM_DOWN = 1 << 14;
    }
}

impl GuitarButtons {
    pub const FRETS: Self = Self::GREEN
        .union(Self::RED)
        .union(Self::YELLOW)
        .union(Self::BLUE)
        .union(Self::ORANGE);
}

/// Guitar Hero guitar extension state.
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers/Guitar_Hero_(Wii)_Guitars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuitarData {
    stick: [u8; 2],
    slider: Option<u8>,
    whammy: u8,
    buttons: GuitarButtons,
}

impl Default for GuitarData {
    fn default() -> Self {
        Self {
            stick: [32, 32],
            slider: None,
            whammy: 0,
            buttons: GuitarButtons::empty(),
        }
    }
}

impl GuitarData {
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        let [b0, b1, b2, b3, b4, b5, ..] = *data else {
            *self = Self::default();
            return false;
        };

        self.stick = [field(b0, 0, 6), field(b1, 0, 6)];
        // Guitars without a touch bar (Guitar Hero 3) report 0xFF, otherwise only the low 5 bits are the slider
        self.slider = (b2 != 0xFF).then(|| field(b2, 0, 5));
        self.whammy = field(b3, 0, 5);
        self.buttons = GuitarButtons::from_bits_truncate(!u16::from_be_bytes([b4, b5]));
        true
    }

    /// Returns the raw 6 bit stick position.
    #[must_use]
    pub const fn stick(&self) -> [u8; 2] {
        self.stick
    }

    #[must_use]
    pub fn stick_01(&self) -> [f32; 2] {
        self.stick.map(|value| f32::from(value) / 63.0)
    }

    #[must_use]
    pub const fn has_slider(&self) -> bool {
        self.slider.is_some()
    }

    /// Returns the raw touch bar reading, `None` for guitars without a touch bar.
    #[must_use]
    pub const fn slider(&self) -> Option<u8> {
        self.slider
    }

    /// Returns the touch bar position in `[0, 1]`, `None` if the guitar has no touch bar
    /// or it is not touched.
    #[must_use]
    pub fn slider_01(&self) -> Option<f32> {
        self.slider
            .filter(|value| *value != SLIDER_RELEASED)
            .map(|value| unit_range(f32::from(value), SLIDER_MIN, SLIDER_MAX))
    }

    /// Returns the 5 bit whammy bar position.
    #[must_use]
    pub const fn whammy(&self) -> u8 {
        self.whammy
    }

    #[must_use]
    pub const fn buttons(&self) -> GuitarButtons {
        self.buttons
    }

    #[must_use]
    pub const fn is_pressed(&self, button: GuitarButtons) -> bool {
        self.buttons.contains(button)
    }

    #[must_use]
    pub const fn frets(&self) -> GuitarButtons {
        self.buttons.intersection(GuitarButtons::FRETS)
    }
}
