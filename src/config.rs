use crate::error::ConfigError;
use crate::settings::SimulationSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete application configuration for export/import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Grid size and step interval
    pub settings: SimulationSettings,
    /// Show neighbor counts on the board (app-level)
    pub show_neighbors: bool,
}

impl AppConfig {
    /// Export config to a JSON file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }

    /// Import config from a JSON file and validate its settings
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.settings.validate()?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            settings: SimulationSettings::default(),
            show_neighbors: false,
        }
    }
}

/// Platform config location, e.g. `~/.config/life-simulator/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("life-simulator").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_file_save_and_load() {
        let config = AppConfig {
            version: 1,
            settings: SimulationSettings {
                map_size: 41,
                step_interval_ms: 250,
            },
            show_neighbors: true,
        };

        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();

        let loaded = AppConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        AppConfig::default().save_to_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "not valid json").unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_non_integer_size_rejected() {
        let temp_file = NamedTempFile::new().unwrap();
        let json = r#"{"version":1,"settings":{"map_size":12.5,"step_interval_ms":1000},"show_neighbors":false}"#;
        fs::write(temp_file.path(), json).unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let temp_file = NamedTempFile::new().unwrap();
        let json = r#"{"version":1,"settings":{"map_size":29,"step_interval_ms":0},"show_neighbors":false}"#;
        fs::write(temp_file.path(), json).unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(LifeError::InvalidInterval(0)))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load_from_file(Path::new("/nonexistent/path/config.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
