//! IR camera decoding and sensor bar tracking.
//!
//! WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#IR_Camera

use std::f32::consts::FRAC_PI_2;

use crate::bits::{field, with_low_bits};
use crate::input::InputReportType;

pub const IR_CAMERA_WIDTH: u16 = 1023;
pub const IR_CAMERA_HEIGHT: u16 = 767;

/// Number of dots the IR camera tracks at the same time.
pub const IR_DOT_COUNT: usize = 4;

/// The data format of the IR camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrDataType {
    /// 10 bytes, position only.
    Basic,
    /// 12 bytes, position and size.
    Extended,
    /// 36 bytes split over two interleaved reports, with bounding box and intensity.
    Full,
}

impl IrDataType {
    /// The value written to the mode register `0xB00033`.
    #[must_use]
    pub const fn mode(self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::Extended => 3,
            Self::Full => 5,
        }
    }

    /// The data reporting mode carrying this format.
    #[must_use]
    pub const fn report_type(self) -> InputReportType {
        match self {
            Self::Basic => InputReportType::ButtonsAccelIr10Ext6,
            Self::Extended => InputReportType::ButtonsAccelIr12,
            Self::Full => InputReportType::InterleavedFirst,
        }
    }
}

/// Bounding box of a dot in the full reporting format, 7 bits per coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: u8,
    pub y_min: u8,
    pub x_max: u8,
    pub y_max: u8,
}

/// A single dot seen by the IR camera.
///
/// Fields that the selected reporting format does not provide are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrDot {
    pub x: u16,
    pub y: u16,
    pub size: Option<u8>,
    pub bounding_box: Option<BoundingBox>,
    pub intensity: Option<u8>,
}

impl IrDot {
    #[must_use]
    pub const fn at(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            size: None,
            bounding_box: None,
            intensity: None,
        }
    }

    /// Decodes the 3 byte extended format, also the start of the full format.
    fn from_extended(data: [u8; 3]) -> Option<Self> {
        if data == [0xFF; 3] {
            return None;
        }
        Some(Self {
            size: Some(field(data[2], 0, 4)),
            ..Self::at(
                with_low_bits(field(data[2], 4, 2), data[0], 8),
                with_low_bits(field(data[2], 6, 2), data[1], 8),
            )
        })
    }

    /// Decodes the 9 byte full format.
    fn from_full(data: &[u8; 9]) -> Option<Self> {
        let mut dot = Self::from_extended([data[0], data[1], data[2]])?;
        dot.bounding_box = Some(BoundingBox {
            x_min: data[3] & 0x7F,
            y_min: data[4] & 0x7F,
            x_max: data[5] & 0x7F,
            y_max: data[6] & 0x7F,
        });
        dot.intensity = Some(data[8]);
        Some(dot)
    }
}

/// A dot returned by the sensor bar tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorBarDot {
    pub x: f32,
    pub y: f32,
    /// The slot of the dot in the IR dot table, `None` if the position was predicted.
    pub index: Option<usize>,
}

/// Keeps track of the two dots of the sensor bar between updates.
///
/// The Wii remote reports dots in consistent slots, so dots that randomly pop in and out can be
/// ruled out by following the slots of the sensor bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorBarTracker {
    indices: [Option<usize>; 2],
    last_separation: [f32; 2],
}

impl SensorBarTracker {
    #[must_use]
    pub const fn indices(&self) -> [Option<usize>; 2] {
        self.indices
    }

    /// The last known distance from the primary to the secondary dot.
    #[must_use]
    pub const fn last_separation(&self) -> [f32; 2] {
        self.last_separation
    }

    /// Returns the two dots most likely belonging to the sensor bar.
    ///
    /// With `predict`, a sensor bar dot outside of the field of view is placed using the last known
    /// separation of the two dots.
    pub fn update(
        &mut self,
        dots: &[Option<IrDot>; IR_DOT_COUNT],
        predict: bool,
    ) -> Option<[SensorBarDot; 2]> {
        for tracked in 0..2 {
            let still_visible = self.indices[tracked].is_some_and(|index| dots[index].is_some());
            if still_visible {
                continue;
            }
            let other = self.indices[1 - tracked];
            self.indices[tracked] =
                (0..IR_DOT_COUNT).find(|index| Some(*index) != other && dots[*index].is_some());
        }

        // The first index is the primary one the separation is measured from
        if self.indices[0].is_none() && self.indices[1].is_some() {
            self.indices = [self.indices[1], None];
            self.last_separation = self.last_separation.map(|value| -value);
        }

        let visible = |index: usize| dots[index].map(|dot| sensor_bar_dot(dot, index));
        match self.indices {
            [Some(primary), Some(secondary)] => {
                let (primary, secondary) = (visible(primary)?, visible(secondary)?);
                self.last_separation = [secondary.x - primary.x, secondary.y - primary.y];
                Some([primary, secondary])
            }
            [Some(primary), None] if predict => {
                let primary = visible(primary)?;
                let predicted = SensorBarDot {
                    x: primary.x + self.last_separation[0],
                    y: primary.y + self.last_separation[1],
                    index: None,
                };
                Some([primary, predicted])
            }
            _ => {
                self.last_separation = [0.0; 2];
                None
            }
        }
    }
}

fn sensor_bar_dot(dot: IrDot, index: usize) -> SensorBarDot {
    SensorBarDot {
        x: f32::from(dot.x),
        y: f32::from(dot.y),
        index: Some(index),
    }
}

/// The IR dots reported by the IR camera and the sensor bar tracker following them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IrData {
    dots: [Option<IrDot>; IR_DOT_COUNT],
    tracker: SensorBarTracker,
}

impl IrData {
    /// Decodes the basic (10 bytes) or extended (12 bytes) format.
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        match data.len() {
            10 => {
                let [first, second] = Self::basic_pair(&data[0..5]);
                let [third, fourth] = Self::basic_pair(&data[5..10]);
                self.dots = [first, second, third, fourth];
                true
            }
            12 => {
                for (dot, chunk) in self.dots.iter_mut().zip(data.chunks_exact(3)) {
                    *dot = IrDot::from_extended([chunk[0], chunk[1], chunk[2]]);
                }
                true
            }
            _ => {
                self.dots = [None; IR_DOT_COUNT];
                false
            }
        }
    }

    /// Decodes the full format split over two interleaved reports, 18 bytes each.
    /// The first half holds dots 0 and 1, the second half dots 2 and 3.
    pub fn interpret_interleaved(&mut self, first: &[u8], second: &[u8]) -> bool {
        if first.len() != 18 || second.len() != 18 {
            self.dots = [None; IR_DOT_COUNT];
            return false;
        }

        let chunks = first.chunks_exact(9).chain(second.chunks_exact(9));
        for (dot, chunk) in self.dots.iter_mut().zip(chunks) {
            *dot = <&[u8; 9]>::try_from(chunk)
                .ok()
                .and_then(IrDot::from_full);
        }
        true
    }

    /// Two dots packed in 5 bytes: `x1 y1 [y1 hi|x1 hi|y2 hi|x2 hi] x2 y2`.
    fn basic_pair(data: &[u8]) -> [Option<IrDot>; 2] {
        let high = data[2];
        let first = if data[0] == 0xFF && data[1] == 0xFF && high & 0xF0 == 0xF0 {
            None
        } else {
            Some(IrDot::at(
                with_low_bits(field(high, 4, 2), data[0], 8),
                with_low_bits(field(high, 6, 2), data[1], 8),
            ))
        };
        let second = if data[3] == 0xFF && data[4] == 0xFF && high & 0x0F == 0x0F {
            None
        } else {
            Some(IrDot::at(
                with_low_bits(field(high, 0, 2), data[3], 8),
                with_low_bits(field(high, 2, 2), data[4], 8),
            ))
        };
        [first, second]
    }

    #[must_use]
    pub const fn dots(&self) -> &[Option<IrDot>; IR_DOT_COUNT] {
        &self.dots
    }

    #[must_use]
    pub const fn tracker(&self) -> &SensorBarTracker {
        &self.tracker
    }

    /// Returns the two dots most likely belonging to the sensor bar.
    pub fn probable_sensor_bar(&mut self, predict: bool) -> Option<[SensorBarDot; 2]> {
        self.tracker.update(&self.dots, predict)
    }

    /// Returns the midpoint of the sensor bar in camera space, `[0, 1]` on both axes
    /// unless a predicted dot lies outside of the camera.
    pub fn midpoint(&mut self, predict: bool) -> Option<[f32; 2]> {
        let [first, second] = self.probable_sensor_bar(predict)?;
        Some([
            (first.x + second.x) / (2.0 * f32::from(IR_CAMERA_WIDTH)),
            (first.y + second.y) / (2.0 * f32::from(IR_CAMERA_HEIGHT)),
        ])
    }

    /// Returns the screen position the Wii remote points at, `[0, 1]` on both axes with Y pointing down.
    ///
    /// The roll of the Wii remote is cancelled using the calibrated acceleration, assuming
    /// the two dots of the sensor bar are level.
    pub fn pointing_position(&mut self, calibrated_acceleration: [f32; 3]) -> Option<[f32; 2]> {
        let [x, y] = self.midpoint(true)?;
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (1.0 - x - 0.5, y - 0.5);

        let rotation = calibrated_acceleration[2].atan2(calibrated_acceleration[0]) - FRAC_PI_2;
        let (sin, cos) = rotation.sin_cos();
        let rotated_x = x.mul_add(cos, y * sin);
        let rotated_y = (-x).mul_add(sin, y * cos);

        Some([rotated_x + 0.5, 1.0 - (rotated_y + 0.5)])
    }
}
