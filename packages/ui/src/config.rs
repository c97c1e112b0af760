//! Survey settings shared by the field components.
//!
//! - **Desktop** (native): `<config_dir>/polecheck/polecheck.toml`, if present
//! - **Web** (WASM): built-in defaults

use dioxus::prelude::*;
use survey::{Catalog, PolecheckConfig};

/// Candidate tables plus the report unit, provided once by the shell.
#[derive(Clone, Debug, PartialEq)]
pub struct SurveySettings {
    pub catalog: Catalog,
    pub unit: String,
}

impl From<&PolecheckConfig> for SurveySettings {
    fn from(config: &PolecheckConfig) -> Self {
        Self {
            catalog: Catalog::from_config(config),
            unit: config.report.unit.clone(),
        }
    }
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self::from(&PolecheckConfig::default())
    }
}

pub fn use_settings() -> SurveySettings {
    use_context::<SurveySettings>()
}

/// Read the deployment config, falling back to defaults on any problem.
pub fn load_settings() -> SurveySettings {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let Some(base) = dirs::config_dir() else {
            return SurveySettings::default();
        };
        let path = base.join("polecheck").join(PolecheckConfig::filename());
        match PolecheckConfig::read(&path) {
            Ok(Some(config)) => {
                tracing::info!(path = %path.display(), "loaded survey config");
                SurveySettings::from(&config)
            }
            Ok(None) => SurveySettings::default(),
            Err(e) => {
                tracing::warn!("{e}; using built-in survey data");
                SurveySettings::default()
            }
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        SurveySettings::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_follow_config() {
        let config = PolecheckConfig::from_toml(
            r#"
            [field]
            rangefinder_serial = "CAM-67890"

            [report]
            unit = "feet"
            "#,
        )
        .unwrap();
        let settings = SurveySettings::from(&config);
        assert_eq!(settings.unit, "feet");
        assert_eq!(settings.catalog.rangefinder_serial(), "CAM-67890");
        let binding = settings.catalog.bind("PROJ-2024-123");
        assert_eq!(binding.device.map(|d| d.location), Some("Technician 1".to_string()));
    }

    #[test]
    fn test_default_settings_use_builtin_catalog() {
        let settings = SurveySettings::default();
        assert_eq!(settings.unit, "meters");
        assert_eq!(settings.catalog, Catalog::builtin());
    }
}
