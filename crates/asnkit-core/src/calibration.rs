//! Printer calibration deltas
//!
//! Real printers and label sheets drift from the nominal template:
//! the whole grid sits too far left, or the rows spread apart toward
//! the bottom of the page. A [`CalibrationDelta`] is a user-tunable
//! correction added to the nominal sheet geometry. Extreme values
//! simply misplace labels; the point is manual visual tuning against
//! a physical printout, so no range is enforced.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Baseline calibration in millimeters, applied on top of the user
/// delta whenever a sheet is generated. These were dialed in against
/// an Avery L4731 sheet; user-visible values are deltas against them.
pub const BASE_CALIBRATION_MM: CalibrationDelta = CalibrationDelta {
    offset_x_mm: -4.5,
    offset_y_mm: 7.0,
    pitch_dx_mm: 1.2,
    pitch_dy_mm: 0.42,
};

/// Geometric correction in millimeters, added to the base sheet
/// geometry at render time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationDelta {
    /// Horizontal shift of the whole grid; positive moves right
    pub offset_x_mm: f64,
    /// Vertical shift of the whole grid; positive moves up
    pub offset_y_mm: f64,
    /// Added to the column pitch; fixes left/right drift across columns
    pub pitch_dx_mm: f64,
    /// Added to the row pitch; fixes top/bottom drift across rows
    pub pitch_dy_mm: f64,
}

impl CalibrationDelta {
    /// A zero delta: reproduces the baseline-calibrated layout exactly.
    pub const ZERO: CalibrationDelta = CalibrationDelta {
        offset_x_mm: 0.0,
        offset_y_mm: 0.0,
        pitch_dx_mm: 0.0,
        pitch_dy_mm: 0.0,
    };

    /// The calibration actually applied when generating: baseline
    /// plus this user delta.
    pub fn effective(&self) -> CalibrationDelta {
        BASE_CALIBRATION_MM + *self
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.offset_x_mm.is_finite()
            && self.offset_y_mm.is_finite()
            && self.pitch_dx_mm.is_finite()
            && self.pitch_dy_mm.is_finite()
    }
}

impl Add for CalibrationDelta {
    type Output = CalibrationDelta;

    fn add(self, rhs: CalibrationDelta) -> CalibrationDelta {
        CalibrationDelta {
            offset_x_mm: self.offset_x_mm + rhs.offset_x_mm,
            offset_y_mm: self.offset_y_mm + rhs.offset_y_mm,
            pitch_dx_mm: self.pitch_dx_mm + rhs.pitch_dx_mm,
            pitch_dy_mm: self.pitch_dy_mm + rhs.pitch_dy_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delta_yields_baseline() {
        assert_eq!(CalibrationDelta::ZERO.effective(), BASE_CALIBRATION_MM);
    }

    #[test]
    fn test_addition_is_componentwise() {
        let a = CalibrationDelta {
            offset_x_mm: 1.0,
            offset_y_mm: -2.0,
            pitch_dx_mm: 0.5,
            pitch_dy_mm: 0.0,
        };
        let b = CalibrationDelta {
            offset_x_mm: -1.0,
            offset_y_mm: 2.0,
            pitch_dx_mm: 0.25,
            pitch_dy_mm: 1.0,
        };
        let sum = a + b;
        assert_eq!(sum.offset_x_mm, 0.0);
        assert_eq!(sum.offset_y_mm, 0.0);
        assert_eq!(sum.pitch_dx_mm, 0.75);
        assert_eq!(sum.pitch_dy_mm, 1.0);
    }

    #[test]
    fn test_effective_adds_baseline() {
        let user = CalibrationDelta {
            offset_x_mm: 0.3,
            offset_y_mm: -0.3,
            pitch_dx_mm: 0.0,
            pitch_dy_mm: 0.1,
        };
        let eff = user.effective();
        assert!((eff.offset_x_mm - (-4.5 + 0.3)).abs() < 1e-9);
        assert!((eff.offset_y_mm - (7.0 - 0.3)).abs() < 1e-9);
        assert!((eff.pitch_dx_mm - 1.2).abs() < 1e-9);
        assert!((eff.pitch_dy_mm - 0.52).abs() < 1e-9);
    }

    #[test]
    fn test_is_finite() {
        assert!(CalibrationDelta::ZERO.is_finite());
        let mut bad = CalibrationDelta::ZERO;
        bad.pitch_dy_mm = f64::NAN;
        assert!(!bad.is_finite());
    }
}
