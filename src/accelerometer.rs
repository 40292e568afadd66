use crate::bits::{field, with_low_bits};
use crate::calibration::{AccelCalibrationStep, AccelerometerCalibration, ACCELEROMETER_CENTER};

/// Accelerometer state of the Wii remote.
///
/// Raw values are 10 bit readings centred around 0 (the reading minus `0x200`).
///
/// WiiBrew Documentation: https://www.wiibrew.org/wiki/Wiimote#Accelerometer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccelerometerData {
    raw: [i32; 3],
    calibration: AccelerometerCalibration,
}

impl AccelerometerData {
    /// The first two bytes are button data, the next three bytes are acceleration data.
    pub fn interpret(&mut self, data: &[u8]) -> bool {
        let [b0, b1, x, y, z] = *data else {
            self.raw = [0; 3];
            return false;
        };

        self.raw = [
            centre(with_low_bits(x, field(b0, 5, 2), 2)),
            centre(with_low_bits(y, field(b1, 5, 1) << 1, 2)),
            centre(with_low_bits(z, field(b1, 6, 1) << 1, 2)),
        ];
        true
    }

    /// Decodes the two halves of an interleaved report.
    /// Each half holds its two button bytes followed by one byte of acceleration data.
    #[allow(clippy::similar_names)]
    pub fn interpret_interleaved(&mut self, data_3e: &[u8], data_3f: &[u8]) -> bool {
        let ([a0, a1, x], [b0, b1, y]) = (data_3e, data_3f) else {
            self.raw = [0; 3];
            return false;
        };
        let (a0, a1, b0, b1) = (*a0, *a1, *b0, *b1);
        let (x, y) = (*x, *y);

        let z = ((a1 << 1) & 0b1100_0000)
            | ((a0 >> 1) & 0b0011_0000)
            | ((b1 >> 3) & 0b0000_1100)
            | ((b0 >> 5) & 0b0000_0011);
        self.raw = [
            centre(u16::from(x) << 2),
            centre(u16::from(y) << 2),
            centre(u16::from(z) << 2),
        ];
        true
    }

    /// Returns the raw centred readings.
    #[must_use]
    pub const fn raw(&self) -> [i32; 3] {
        self.raw
    }

    #[must_use]
    pub const fn calibration(&self) -> &AccelerometerCalibration {
        &self.calibration
    }

    pub fn set_calibration(&mut self, calibration: AccelerometerCalibration) {
        self.calibration = calibration;
    }

    /// Stores the current reading as the calibration pose for `step`.
    pub fn calibrate(&mut self, step: AccelCalibrationStep) {
        self.calibration.set_pose(step, self.raw);
    }

    /// Returns the acceleration in g using the current calibration.
    #[must_use]
    pub fn calibrated(&self) -> [f32; 3] {
        self.calibration.calibrated(self.raw)
    }
}

fn centre(value: u16) -> i32 {
    i32::from(value) - ACCELEROMETER_CENTER
}
