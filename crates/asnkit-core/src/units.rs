//! Unit conversion utilities
//!
//! The placement engine works in a single physical unit: PostScript
//! points (1/72 inch). Calibration values are entered in millimeters
//! and converted at render time.

/// Points per millimeter (72 points per inch, 25.4 mm per inch).
pub const MM_TO_PT: f64 = 72.0 / 25.4;

/// A4 page width in points (210 mm).
pub const A4_WIDTH_PT: f64 = 210.0 * MM_TO_PT;

/// A4 page height in points (297 mm).
pub const A4_HEIGHT_PT: f64 = 297.0 * MM_TO_PT;

/// Convert millimeters to points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * MM_TO_PT
}

/// Convert points to millimeters.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / MM_TO_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert!((pt_to_mm(mm_to_pt(25.4)) - 25.4).abs() < 1e-9);
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_a4_dimensions() {
        // 210 x 297 mm is 595.28 x 841.89 pt
        assert!((A4_WIDTH_PT - 595.2756).abs() < 1e-3);
        assert!((A4_HEIGHT_PT - 841.8898).abs() < 1e-3);
    }

    #[test]
    fn test_zero() {
        assert_eq!(mm_to_pt(0.0), 0.0);
        assert_eq!(pt_to_mm(0.0), 0.0);
    }
}
