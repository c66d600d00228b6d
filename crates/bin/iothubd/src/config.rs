//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `iothub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Names of the virtual devices to register.
    pub devices: DevicesConfig,
    /// Scene parameters.
    pub scenes: ScenesConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Display names of the virtual devices.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    pub light: String,
    pub speaker: String,
    pub toilet: String,
}

/// Scene parameters.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScenesConfig {
    /// Song the speaker plays in the wake up scene.
    pub wake_song: String,
}

impl Config {
    /// Load configuration from `iothub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("iothub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("IOTHUB_WAKE_SONG") {
            self.scenes.wake_song = val;
        }
        if let Ok(val) = std::env::var("IOTHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scenes.wake_song.trim().is_empty() {
            return Err(ConfigError::Validation(
                "scenes.wake_song must not be empty".to_string(),
            ));
        }
        for (field, name) in [
            ("devices.light", &self.devices.light),
            ("devices.speaker", &self.devices.speaker),
            ("devices.toilet", &self.devices.toilet),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "iothubd=info,iothub_app=info,iothub_adapter_virtual=info".to_string(),
        }
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            light: "Hue Light".to_string(),
            speaker: "Smart Speaker".to_string(),
            toilet: "Smart Toilet".to_string(),
        }
    }
}

impl Default for ScenesConfig {
    fn default() -> Self {
        Self {
            wake_song: "Rick Astley - Never Gonna Give You Up".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.devices.light, "Hue Light");
        assert_eq!(config.devices.speaker, "Smart Speaker");
        assert_eq!(config.devices.toilet, "Smart Toilet");
        assert_eq!(
            config.scenes.wake_song,
            "Rick Astley - Never Gonna Give You Up"
        );
        assert!(config.logging.filter.contains("iothubd=info"));
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.devices.light, "Hue Light");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [logging]
            filter = 'debug'

            [devices]
            light = 'Bedroom Light'
            speaker = 'Bedroom Speaker'
            toilet = 'Upstairs Toilet'

            [scenes]
            wake_song = 'Here Comes the Sun'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.devices.light, "Bedroom Light");
        assert_eq!(config.devices.speaker, "Bedroom Speaker");
        assert_eq!(config.devices.toilet, "Upstairs Toilet");
        assert_eq!(config.scenes.wake_song, "Here Comes the Sun");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [devices]
            speaker = 'Kitchen Speaker'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.devices.speaker, "Kitchen Speaker");
        assert_eq!(config.devices.light, "Hue Light");
        assert_eq!(
            config.scenes.wake_song,
            "Rick Astley - Never Gonna Give You Up"
        );
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.devices.toilet, "Smart Toilet");
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_blank_wake_song() {
        let mut config = Config::default();
        config.scenes.wake_song = "   ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_reject_empty_device_name() {
        let mut config = Config::default();
        config.devices.toilet = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: devices.toilet must not be empty"
        );
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
