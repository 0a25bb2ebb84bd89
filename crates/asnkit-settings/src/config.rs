//! Persisted application configuration
//!
//! A flat record mirroring the config file on disk. Field names keep
//! the historical file keys (`zeros`, `off_x`, ...) so existing
//! config files load unchanged.

use asnkit_core::{avery_l4731, CalibrationDelta, CodeKind, LabelJob, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SettingsError, SettingsResult};

/// How the amount to generate was expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityMode {
    /// An exact number of labels
    Labels,
    /// Whole A4 sheets
    Pages,
}

impl Default for QuantityMode {
    fn default() -> Self {
        Self::Labels
    }
}

impl fmt::Display for QuantityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Labels => write!(f, "labels"),
            Self::Pages => write!(f, "pages"),
        }
    }
}

/// Calibration storage scheme tag.
///
/// `Delta` is the current convention: the four calibration values are
/// deltas against [`asnkit_core::BASE_CALIBRATION_MM`]. `Absolute` is
/// the legacy scheme where the raw effective values were stored;
/// records tagged with it are migrated on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationMode {
    Delta,
    Absolute,
}

impl Default for CalibrationMode {
    fn default() -> Self {
        Self::Delta
    }
}

/// Complete persisted settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// First serial number of the next generation run
    pub start: u64,
    /// Whether `count` or `pages` is authoritative
    #[serde(rename = "mode")]
    pub quantity_mode: QuantityMode,
    /// Number of labels, when mode is `labels`
    pub count: u32,
    /// Number of A4 sheets, when mode is `pages`
    pub pages: u32,
    /// Literal prefix printed before each number
    pub prefix: String,
    /// Minimum digit count of the formatted number
    #[serde(rename = "zeros")]
    pub leading_zeros: u32,
    /// Code symbol variant
    pub kind: CodeKind,
    /// Draw a calibration border around each label
    #[serde(rename = "border")]
    pub draw_border: bool,
    /// Calibration: grid shift along x, millimeters
    pub off_x: f64,
    /// Calibration: grid shift along y, millimeters
    pub off_y: f64,
    /// Calibration: column pitch delta, millimeters
    pub pitch_dx: f64,
    /// Calibration: row pitch delta, millimeters
    pub pitch_dy: f64,
    /// Schema tag; always written as `delta`
    pub calibration_mode: CalibrationMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start: 1,
            quantity_mode: QuantityMode::Labels,
            count: avery_l4731().labels_per_page(),
            pages: 1,
            prefix: "ASN".to_string(),
            leading_zeros: 7,
            kind: CodeKind::Qr,
            draw_border: false,
            off_x: 0.0,
            off_y: 0.0,
            pitch_dx: 0.0,
            pitch_dy: 0.0,
            calibration_mode: CalibrationMode::Delta,
        }
    }
}

impl Settings {
    /// Validate the record, reporting the offending key.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.start == 0 {
            return Err(invalid("start", "must be > 0"));
        }
        if self.count == 0 {
            return Err(invalid("count", "must be > 0"));
        }
        if self.pages == 0 {
            return Err(invalid("pages", "must be > 0"));
        }
        if self.prefix.is_empty() {
            return Err(invalid("prefix", "must not be empty"));
        }
        let delta = self.calibration();
        if !delta.is_finite() {
            return Err(invalid("calibration", "values must be finite numbers"));
        }
        Ok(())
    }

    /// The stored user calibration delta, in millimeters.
    pub fn calibration(&self) -> CalibrationDelta {
        CalibrationDelta {
            offset_x_mm: self.off_x,
            offset_y_mm: self.off_y,
            pitch_dx_mm: self.pitch_dx,
            pitch_dy_mm: self.pitch_dy,
        }
    }

    /// Replace the stored calibration delta.
    pub fn set_calibration(&mut self, delta: CalibrationDelta) {
        self.off_x = delta.offset_x_mm;
        self.off_y = delta.offset_y_mm;
        self.pitch_dx = delta.pitch_dx_mm;
        self.pitch_dy = delta.pitch_dy_mm;
    }

    /// Build the generation job described by this record.
    pub fn job(&self) -> LabelJob {
        let quantity = match self.quantity_mode {
            QuantityMode::Labels => Quantity::Labels(self.count),
            QuantityMode::Pages => Quantity::Pages(self.pages),
        };
        LabelJob {
            start: self.start,
            quantity,
            prefix: self.prefix.clone(),
            leading_zeros: self.leading_zeros,
            kind: self.kind,
            draw_border: self.draw_border,
        }
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.count, 189);
        assert_eq!(settings.prefix, "ASN");
        assert_eq!(settings.calibration(), CalibrationDelta::ZERO);
    }

    #[test]
    fn test_validation_reports_key() {
        let mut settings = Settings::default();
        settings.prefix.clear();
        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidSetting { ref key, .. } if key == "prefix"
        ));
    }

    #[test]
    fn test_job_uses_pages_mode() {
        let settings = Settings {
            quantity_mode: QuantityMode::Pages,
            pages: 3,
            ..Settings::default()
        };
        let job = settings.job();
        assert_eq!(job.quantity, Quantity::Pages(3));
    }

    #[test]
    fn test_file_keys_stay_stable() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "start", "mode", "count", "pages", "prefix", "zeros", "kind", "border", "off_x",
            "off_y", "pitch_dx", "pitch_dy", "calibration_mode",
        ] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(json["calibration_mode"], "delta");
        assert_eq!(json["kind"], "qr");
    }
}
