//! Settings persistence
//!
//! Loads and saves the flat settings record from the platform config
//! directory. Loading is lenient: the legacy file format stored every
//! number as a string (with optional decimal commas), and calibration
//! values recorded under the legacy absolute scheme are migrated to
//! deltas against the baseline. Saving is atomic: write to a
//! temporary file, then rename into place.

use asnkit_core::BASE_CALIBRATION_MM;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::{CalibrationMode, QuantityMode, Settings};
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "asnkit";
const CONFIG_FILE: &str = "config.json";

/// File-backed settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the platform default location:
    /// `<config_dir>/asnkit/config.json`.
    pub fn open_default() -> SettingsResult<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory(
                "could not resolve the platform config directory".to_string(),
            )
        })?;
        Ok(Self {
            path: base.join(APP_DIR).join(CONFIG_FILE),
        })
    }

    /// Store at an explicit path (`.json` or `.toml`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any failure.
    ///
    /// A missing file is normal on first run; every other failure is
    /// surfaced as a warning but never fatal.
    pub fn load(&self) -> Settings {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Settings::default();
        }
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to load settings, using defaults"
                );
                Settings::default()
            }
        }
    }

    /// Load settings, propagating failures.
    pub fn try_load(&self) -> SettingsResult<Settings> {
        let content = std::fs::read_to_string(&self.path)?;
        let value = self.parse_to_value(&content)?;
        settings_from_value(&value)
    }

    /// Save settings atomically, creating parent directories.
    pub fn save(&self, settings: &Settings) -> SettingsResult<()> {
        settings.validate()?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = if self.path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(settings).map_err(|e| SettingsError::SaveError {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
        } else {
            serde_json::to_string_pretty(settings)?
        };

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Delete the settings file and write fresh defaults.
    pub fn reset(&self) -> SettingsResult<Settings> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        let defaults = Settings::default();
        self.save(&defaults)?;
        Ok(defaults)
    }

    fn parse_to_value(&self, content: &str) -> SettingsResult<Value> {
        if self.path.extension().is_some_and(|ext| ext == "toml") {
            let table: toml::Value = toml::from_str(content)?;
            Ok(serde_json::to_value(table)?)
        } else {
            Ok(serde_json::from_str(content)?)
        }
    }
}

/// Build a [`Settings`] record from a parsed file, coercing legacy
/// string-typed values and migrating legacy absolute calibration.
fn settings_from_value(value: &Value) -> SettingsResult<Settings> {
    let obj = value.as_object().ok_or_else(|| SettingsError::InvalidSetting {
        key: "<root>".to_string(),
        reason: "settings file must contain a JSON object".to_string(),
    })?;

    let mode = match obj.get("calibration_mode").and_then(Value::as_str) {
        Some("delta") => CalibrationMode::Delta,
        Some(other) => {
            debug!(tag = other, "calibration tagged as legacy absolute scheme");
            CalibrationMode::Absolute
        }
        None => {
            // Pre-tag files are ambiguous between the absolute and
            // delta conventions. The tag shipped together with the
            // delta convention, so untagged files are treated as the
            // legacy absolute scheme - but loudly, not silently.
            warn!(
                "settings file has no 'calibration_mode' tag; \
                 interpreting calibration values as legacy absolute millimeters"
            );
            CalibrationMode::Absolute
        }
    };

    let mut settings = Settings::default();

    if let Some(v) = obj.get("start") {
        settings.start = coerce_u64(v, "start")?;
    }
    if let Some(v) = obj.get("mode") {
        settings.quantity_mode = match coerce_str(v, "mode")?.as_str() {
            "pages" => QuantityMode::Pages,
            _ => QuantityMode::Labels,
        };
    }
    if let Some(v) = obj.get("count") {
        settings.count = coerce_u32(v, "count")?;
    }
    if let Some(v) = obj.get("pages") {
        settings.pages = coerce_u32(v, "pages")?;
    }
    if let Some(v) = obj.get("prefix") {
        settings.prefix = coerce_str(v, "prefix")?;
    }
    if let Some(v) = obj.get("zeros") {
        settings.leading_zeros = coerce_u32(v, "zeros")?;
    }
    if let Some(v) = obj.get("kind") {
        settings.kind = coerce_str(v, "kind")?
            .parse()
            .map_err(|_| SettingsError::InvalidSetting {
                key: "kind".to_string(),
                reason: format!("unknown code kind: {}", v),
            })?;
    }
    if let Some(v) = obj.get("border") {
        settings.draw_border = coerce_bool(v, "border")?;
    }

    settings.off_x = calibration_value(obj.get("off_x"), "off_x", mode, BASE_CALIBRATION_MM.offset_x_mm)?;
    settings.off_y = calibration_value(obj.get("off_y"), "off_y", mode, BASE_CALIBRATION_MM.offset_y_mm)?;
    settings.pitch_dx =
        calibration_value(obj.get("pitch_dx"), "pitch_dx", mode, BASE_CALIBRATION_MM.pitch_dx_mm)?;
    settings.pitch_dy =
        calibration_value(obj.get("pitch_dy"), "pitch_dy", mode, BASE_CALIBRATION_MM.pitch_dy_mm)?;
    // Whatever the file said, the in-memory record is delta-convention.
    settings.calibration_mode = CalibrationMode::Delta;

    Ok(settings)
}

/// Read one calibration axis, subtracting the baseline when the file
/// used the legacy absolute scheme.
fn calibration_value(
    value: Option<&Value>,
    key: &str,
    mode: CalibrationMode,
    baseline: f64,
) -> SettingsResult<f64> {
    let Some(v) = value else {
        return Ok(0.0);
    };
    let raw = coerce_f64(v, key)?;
    Ok(match mode {
        CalibrationMode::Delta => raw,
        CalibrationMode::Absolute => raw - baseline,
    })
}

fn coerce_str(value: &Value, key: &str) -> SettingsResult<String> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(type_error(key, value)),
    }
}

fn coerce_u64(value: &Value, key: &str) -> SettingsResult<u64> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| type_error(key, value)),
        Value::String(s) => s.trim().parse().map_err(|_| type_error(key, value)),
        _ => Err(type_error(key, value)),
    }
}

fn coerce_u32(value: &Value, key: &str) -> SettingsResult<u32> {
    coerce_u64(value, key)?
        .try_into()
        .map_err(|_| type_error(key, value))
}

fn coerce_f64(value: &Value, key: &str) -> SettingsResult<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| type_error(key, value)),
        // The legacy format stored floats as strings, sometimes with
        // a decimal comma.
        Value::String(s) => s
            .trim()
            .replace(',', ".")
            .parse()
            .map_err(|_| type_error(key, value)),
        _ => Err(type_error(key, value)),
    }
}

fn coerce_bool(value: &Value, key: &str) -> SettingsResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(type_error(key, value)),
        },
        _ => Err(type_error(key, value)),
    }
}

fn type_error(key: &str, value: &Value) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: format!("cannot interpret value {}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("config.json"));

        let mut settings = Settings::default();
        settings.start = 190;
        settings.off_x = -0.5;
        store.save(&settings).unwrap();

        let loaded = store.try_load().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("config.json"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::with_path(path);
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_delta_tagged_values_load_unchanged() {
        let value = json!({
            "calibration_mode": "delta",
            "off_x": 1.5,
            "off_y": "-2.0",
            "pitch_dx": "0,25",
            "pitch_dy": 0.0,
        });
        let settings = settings_from_value(&value).unwrap();
        assert_eq!(settings.off_x, 1.5);
        assert_eq!(settings.off_y, -2.0);
        assert_eq!(settings.pitch_dx, 0.25);
        assert_eq!(settings.pitch_dy, 0.0);
    }

    #[test]
    fn test_absolute_values_migrate_to_deltas() {
        // Recorded absolute value V loads as V - baseline.
        let value = json!({
            "calibration_mode": "absolute",
            "off_x": -4.5,
            "off_y": 8.0,
            "pitch_dx": 1.2,
            "pitch_dy": 1.42,
        });
        let settings = settings_from_value(&value).unwrap();
        assert!((settings.off_x - 0.0).abs() < 1e-9);
        assert!((settings.off_y - 1.0).abs() < 1e-9);
        assert!((settings.pitch_dx - 0.0).abs() < 1e-9);
        assert!((settings.pitch_dy - 1.0).abs() < 1e-9);
        assert_eq!(settings.calibration_mode, CalibrationMode::Delta);
    }

    #[test]
    fn test_untagged_record_treated_as_absolute() {
        let value = json!({
            "off_x": -4.5,
            "off_y": 7.0,
            "pitch_dx": 1.2,
            "pitch_dy": 0.42,
        });
        let settings = settings_from_value(&value).unwrap();
        // Baseline-valued absolutes migrate to a zero delta.
        assert_eq!(settings.calibration(), asnkit_core::CalibrationDelta::ZERO);
    }

    #[test]
    fn test_legacy_string_typed_fields() {
        let value = json!({
            "calibration_mode": "delta",
            "start": "190",
            "mode": "pages",
            "pages": "3",
            "zeros": "5",
            "kind": "QR",
            "border": true,
        });
        let settings = settings_from_value(&value).unwrap();
        assert_eq!(settings.start, 190);
        assert_eq!(settings.quantity_mode, QuantityMode::Pages);
        assert_eq!(settings.pages, 3);
        assert_eq!(settings.leading_zeros, 5);
        assert!(settings.draw_border);
    }

    #[test]
    fn test_negative_zeros_rejected() {
        let value = json!({
            "calibration_mode": "delta",
            "zeros": "-3",
        });
        let err = settings_from_value(&value).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidSetting { ref key, .. } if key == "zeros"
        ));
    }

    #[test]
    fn test_save_replaces_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = SettingsStore::with_path(&path);

        store.save(&Settings::default()).unwrap();
        let mut updated = Settings::default();
        updated.start = 42;
        store.save(&updated).unwrap();

        assert_eq!(store.try_load().unwrap().start, 42);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_reset_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("config.json"));
        let mut settings = Settings::default();
        settings.start = 999;
        store.save(&settings).unwrap();

        let defaults = store.reset().unwrap();
        assert_eq!(defaults, Settings::default());
        assert_eq!(store.try_load().unwrap(), Settings::default());
    }

    #[test]
    fn test_toml_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("config.toml"));
        let mut settings = Settings::default();
        settings.prefix = "DOC".to_string();
        store.save(&settings).unwrap();
        assert_eq!(store.try_load().unwrap().prefix, "DOC");
    }
}
