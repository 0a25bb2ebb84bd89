//! ASNKit Settings Crate
//!
//! Handles the persisted application configuration: the serde model,
//! platform config-directory resolution, atomic save/load with legacy
//! migration, and the debounced autosave worker.

pub mod autosave;
pub mod config;
pub mod error;
pub mod persistence;

pub use autosave::Autosaver;
pub use config::{CalibrationMode, QuantityMode, Settings};
pub use error::{SettingsError, SettingsResult};
pub use persistence::SettingsStore;
