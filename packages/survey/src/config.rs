//! # Field configuration: `polecheck.toml`
//!
//! Optional TOML file that tunes a deployment without a rebuild
//! (filename: [`PolecheckConfig::filename`] = `"polecheck.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [field]
//! rangefinder_serial = "TRU-12345"   # device bound when a project is connected
//!
//! [report]
//! unit = "meters"                    # unit written after the measurement
//!
//! # Optional; each non-empty table replaces the built-in data.
//! [[options]]
//! project_id = "PROJ-2024-123"
//! description = "123 Main St - Pole Replacement"
//!
//! [[projects]]
//! project_id = "PROJ-2024-123"
//! address = "123 Main Street, Anytown"
//! scope_of_work = "Replace damaged pole"
//! scheduled_dates = "2024-08-15"
//!
//! [[devices]]
//! serial_number = "TRU-12345"
//! device_type = "TruPulse 200x"
//! location = "Truck 1"
//! ```
//!
//! A missing or empty file is equivalent to [`PolecheckConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Device, ProjectAssignment, ProjectOption};

pub(crate) const DEFAULT_RANGEFINDER_SERIAL: &str = "TRU-12345";

/// Top-level configuration stored in `polecheck.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolecheckConfig {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ProjectOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectAssignment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<Device>,
}

/// Field-device settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Serial number of the rangefinder reported with every project binding.
    #[serde(default = "default_rangefinder_serial")]
    pub rangefinder_serial: String,
}

fn default_rangefinder_serial() -> String {
    DEFAULT_RANGEFINDER_SERIAL.to_string()
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            rangefinder_serial: default_rangefinder_serial(),
        }
    }
}

/// Report rendering settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "meters".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { unit: default_unit() }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid {}: {}", PolecheckConfig::filename(), .0)]
    Parse(#[from] toml::de::Error),
}

impl PolecheckConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "polecheck.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read a config file. `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Ok(Some(Self::from_toml(&contents)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = PolecheckConfig::from_toml("").unwrap();
        assert_eq!(config, PolecheckConfig::default());
        assert_eq!(config.field.rangefinder_serial, "TRU-12345");
        assert_eq!(config.report.unit, "meters");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = PolecheckConfig::from_toml("[report]\nunit = \"m\"\n").unwrap();
        assert_eq!(config.report.unit, "m");
        assert_eq!(config.field.rangefinder_serial, "TRU-12345");
        assert!(config.projects.is_empty());
    }

    #[test]
    fn test_toml_roundtrip_with_tables() {
        let mut config = PolecheckConfig::default();
        config.devices.push(Device {
            serial_number: "TRU-1".to_string(),
            device_type: "TruPulse 360".to_string(),
            location: "Truck 9".to_string(),
        });
        let text = config.to_toml().unwrap();
        assert!(text.contains("[[devices]]"));
        assert!(!text.contains("[[projects]]"));
        assert_eq!(PolecheckConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let path = std::env::temp_dir().join("polecheck-does-not-exist/polecheck.toml");
        assert!(PolecheckConfig::read(&path).unwrap().is_none());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = PolecheckConfig::from_toml("[field\nrangefinder_serial = 3").unwrap_err();
        let err = ConfigError::from(err);
        assert!(err.to_string().starts_with("invalid polecheck.toml"));
    }
}
