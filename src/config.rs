use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::distances::find_distance;
use crate::error::GoPaceError;
use crate::export::OutputFormat;
use crate::logging::{LogConfig, LogLevel};
use crate::models::Unit;

/// Keys accepted by [`AppConfig::get_value`] and [`AppConfig::set_value`]
pub const CONFIG_KEYS: [&str; 5] = [
    "default_unit",
    "default_distance",
    "output_format",
    "split_bias",
    "log_level",
];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Calculation defaults
    #[serde(default)]
    pub settings: AppSettings,

    /// Logging setup
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Defaults applied when a command leaves an option out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Unit for paces and splits
    pub default_unit: Unit,

    /// Registry label used when no distance is given
    pub default_distance: String,

    /// Result rendering
    pub output_format: OutputFormat,

    /// Split bias in [-1, 1]
    pub split_bias: Decimal,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            metadata: ConfigMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_unit: Unit::Mile,
            default_distance: "5K".to_string(),
            output_format: OutputFormat::Table,
            split_bias: Decimal::ZERO,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration, creating the parent directory when needed
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gopace")
            .join("config.toml")
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %err,
                    "Ignoring unreadable config file"
                );
                Self::default()
            }
        }
    }

    /// Current value of a setting as display text
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "default_unit" => self.settings.default_unit.to_string(),
            "default_distance" => self.settings.default_distance.clone(),
            "output_format" => self.settings.output_format.to_string(),
            "split_bias" => self.settings.split_bias.normalize().to_string(),
            "log_level" => self.logging.level.to_string(),
            _ => bail!(
                "Unknown configuration key: {} (expected one of: {})",
                key,
                CONFIG_KEYS.join(", ")
            ),
        };
        Ok(value)
    }

    /// Validate and store a setting
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_unit" => {
                self.settings.default_unit = value.parse::<Unit>().map_err(anyhow::Error::msg)?;
            }
            "default_distance" => {
                let distance = find_distance(value)?;
                self.settings.default_distance = distance.label.to_string();
            }
            "output_format" => {
                self.settings.output_format = value.parse::<OutputFormat>()?;
            }
            "split_bias" => {
                let bias: Decimal = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid split bias: {}", value))?;
                if bias < dec!(-1) || bias > dec!(1) {
                    return Err(GoPaceError::Configuration(format!(
                        "split_bias must be between -1 and 1, got {}",
                        value
                    ))
                    .into());
                }
                self.settings.split_bias = bias;
            }
            "log_level" => {
                self.logging.level = value.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
            }
            _ => {
                return Err(GoPaceError::Configuration(format!(
                    "unknown key '{}', expected one of: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                ))
                .into())
            }
        }

        tracing::debug!(key, value, "Configuration value updated");
        Ok(())
    }

    /// All settings as `(key, value)` pairs in a stable order
    pub fn list_values(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get_value(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.settings, deserialized.settings);
        assert_eq!(config.logging, deserialized.logging);
        assert_eq!(config.metadata.version, deserialized.metadata.version);
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.set_value("default_unit", "km").unwrap();
        config.set_value("split_bias", "0.25").unwrap();
        config.save_to_file(&config_path).unwrap();

        let loaded = AppConfig::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.settings.default_unit, Unit::Km);
        assert_eq!(loaded.settings.split_bias, dec!(0.25));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.toml");

        let config = AppConfig::load_or_default(Some(missing.as_path()));
        assert_eq!(config.settings, AppSettings::default());
    }

    #[test]
    fn test_load_or_default_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "this is not = [valid").unwrap();

        let config = AppConfig::load_or_default(Some(path.as_path()));
        assert_eq!(config.settings, AppSettings::default());
    }

    #[test]
    fn test_get_and_set_values() {
        let mut config = AppConfig::default();

        config.set_value("default_distance", "half").unwrap();
        assert_eq!(config.get_value("default_distance").unwrap(), "Half Marathon");

        config.set_value("output_format", "json").unwrap();
        assert_eq!(config.get_value("output_format").unwrap(), "json");

        config.set_value("log_level", "debug").unwrap();
        assert_eq!(config.get_value("log_level").unwrap(), "debug");

        config.set_value("split_bias", "-0.5").unwrap();
        assert_eq!(config.get_value("split_bias").unwrap(), "-0.5");
    }

    #[test]
    fn test_set_value_validation() {
        let mut config = AppConfig::default();

        assert!(config.set_value("split_bias", "1.5").is_err());
        assert!(config.set_value("split_bias", "fast").is_err());
        assert!(config.set_value("default_distance", "50K").is_err());
        assert!(config.set_value("default_unit", "furlong").is_err());
        assert!(config.set_value("colour", "blue").is_err());
        assert_eq!(config.settings, AppSettings::default());

        assert!(config.get_value("colour").is_err());

        let err = config.set_value("split_bias", "-2").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GoPaceError>(),
            Some(GoPaceError::Configuration(_))
        ));
    }

    #[test]
    fn test_list_values() {
        let config = AppConfig::default();
        let values = config.list_values();

        assert_eq!(values.len(), CONFIG_KEYS.len());
        assert_eq!(values[0], ("default_unit", "mile".to_string()));
        assert_eq!(values[3], ("split_bias", "0".to_string()));
    }
}
