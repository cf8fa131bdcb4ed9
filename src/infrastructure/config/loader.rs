use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::perma::{MAX_SCORE, MIN_SCORE};

/// Project configuration directory
pub const CONFIG_DIR: &str = ".compass";

/// Environment variable prefix; `__` separates nested keys
pub const ENV_PREFIX: &str = "COMPASS_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_mbti_attempts: {0}. Must be at least 1")]
    InvalidMaxAttempts(u32),

    #[error("Invalid {name}: {value}. Must be between 0 and 10")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error(
        "Invalid thresholds: strength_threshold ({strength}) must not be below focus_threshold ({focus})"
    )]
    StrengthBelowFocus { focus: f64, strength: f64 },

    #[error("Invalid max_additional_entries: {0}. Must be at least 1")]
    InvalidMaxAdditionalEntries(usize),

    #[error("Invalid interest_display_limit: {0}. Must be at least 1")]
    InvalidDisplayLimit(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .compass/config.yaml (project config)
    /// 3. .compass/local.yaml (local overrides, optional)
    /// 4. Environment variables (COMPASS_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base()
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Self::base()
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Explicit file when given (still overridable from the environment),
    /// otherwise the project hierarchy.
    pub fn load_with_override(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Self::load();
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::base()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.assessment.max_mbti_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(
                config.assessment.max_mbti_attempts,
            ));
        }
        if let Some(path) = &config.assessment.catalog_path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "assessment.catalog_path cannot be empty when set".to_string(),
                ));
            }
        }

        let guidance = &config.guidance;
        for (name, value) in [
            ("focus_threshold", guidance.focus_threshold),
            ("strength_threshold", guidance.strength_threshold),
        ] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if guidance.strength_threshold < guidance.focus_threshold {
            return Err(ConfigError::StrengthBelowFocus {
                focus: guidance.focus_threshold,
                strength: guidance.strength_threshold,
            });
        }
        if guidance.max_additional_entries == 0 {
            return Err(ConfigError::InvalidMaxAdditionalEntries(
                guidance.max_additional_entries,
            ));
        }

        if config.profile.interest_display_limit == 0 {
            return Err(ConfigError::InvalidDisplayLimit(
                config.profile.interest_display_limit,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assessment.max_mbti_attempts, 2);
        assert!((config.guidance.focus_threshold - 7.0).abs() < f64::EPSILON);
        assert!((config.guidance.strength_threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.guidance.max_additional_entries, 2);
        assert_eq!(config.profile.interest_display_limit, 5);
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
assessment:
  max_mbti_attempts: 3
guidance:
  focus_threshold: 6.5
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.assessment.max_mbti_attempts, 3);
        assert!((config.guidance.focus_threshold - 6.5).abs() < f64::EPSILON);
        assert!((config.guidance.strength_threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_zero_attempts() {
        let mut config = Config::default();
        config.assessment.max_mbti_attempts = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxAttempts(0))
        ));
    }

    #[test]
    fn test_validate_threshold_out_of_range() {
        let mut config = Config::default();
        config.guidance.focus_threshold = 11.0;
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidThreshold { name, .. }) => assert_eq!(name, "focus_threshold"),
            other => panic!("Expected InvalidThreshold error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_strength_below_focus() {
        let mut config = Config::default();
        config.guidance.strength_threshold = 5.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::StrengthBelowFocus { .. })
        ));
    }

    #[test]
    fn test_validate_zero_entries_and_limit() {
        let mut config = Config::default();
        config.guidance.max_additional_entries = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxAdditionalEntries(0))
        ));

        let mut config = Config::default();
        config.profile.interest_display_limit = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidDisplayLimit(0))
        ));
    }

    #[test]
    fn test_validate_invalid_log_settings() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));

        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRotation(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let file = yaml_file("guidance:\n  max_additional_entries: 1\nprofile:\n  interest_display_limit: 3\n");
        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.guidance.max_additional_entries, 1);
        assert_eq!(config.profile.interest_display_limit, 3);
        assert_eq!(config.assessment.max_mbti_attempts, 2);
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let file = yaml_file("assessment:\n  max_mbti_attempts: 0\n");
        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_env_override() {
        let file = yaml_file("guidance:\n  focus_threshold: 6.0\n");
        temp_env::with_vars(
            [
                ("COMPASS_GUIDANCE__FOCUS_THRESHOLD", Some("5.5")),
                ("COMPASS_LOGGING__LEVEL", Some("debug")),
            ],
            || {
                let config = ConfigLoader::load_with_override(Some(file.path())).unwrap();
                assert!((config.guidance.focus_threshold - 5.5).abs() < f64::EPSILON);
                assert_eq!(config.logging.level, "debug");
            },
        );
    }

    #[test]
    fn test_missing_override_file() {
        let result = ConfigLoader::load_with_override(Some(Path::new("/nonexistent/compass.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_hierarchical_merging() {
        let base_file = yaml_file("assessment:\n  max_mbti_attempts: 4\nlogging:\n  level: info\n  format: json\n");
        let override_file = yaml_file("assessment:\n  max_mbti_attempts: 5\nlogging:\n  level: debug\n");

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.assessment.max_mbti_attempts, 5, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }
}
