use serde::{Deserialize, Serialize};

/// Main configuration structure for Compass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Conversation state machine settings
    #[serde(default)]
    pub assessment: AssessmentSettings,

    /// PERMA guidance thresholds
    #[serde(default)]
    pub guidance: GuidanceSettings,

    /// Profile presentation settings
    #[serde(default)]
    pub profile: ProfileSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for log files; logs go to stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Conversation state machine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssessmentSettings {
    /// Invalid direct-entry codes tolerated before rerouting to the
    /// dimension questions
    #[serde(default = "default_max_mbti_attempts")]
    pub max_mbti_attempts: u32,

    /// Optional YAML catalog asset replacing the built-in catalog
    #[serde(default)]
    pub catalog_path: Option<String>,
}

const fn default_max_mbti_attempts() -> u32 {
    2
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            max_mbti_attempts: default_max_mbti_attempts(),
            catalog_path: None,
        }
    }
}

/// PERMA guidance thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GuidanceSettings {
    /// Scores strictly below this are focus areas
    #[serde(default = "default_focus_threshold")]
    pub focus_threshold: f64,

    /// Scores at or above this are strengths
    #[serde(default = "default_strength_threshold")]
    pub strength_threshold: f64,

    /// Entries emitted after the affinity entry, if any
    #[serde(default = "default_max_additional_entries")]
    pub max_additional_entries: usize,
}

const fn default_focus_threshold() -> f64 {
    7.0
}

const fn default_strength_threshold() -> f64 {
    8.0
}

const fn default_max_additional_entries() -> usize {
    2
}

impl Default for GuidanceSettings {
    fn default() -> Self {
        Self {
            focus_threshold: default_focus_threshold(),
            strength_threshold: default_strength_threshold(),
            max_additional_entries: default_max_additional_entries(),
        }
    }
}

/// Profile presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileSettings {
    /// Interests shown in summaries; the profile keeps the full list
    #[serde(default = "default_interest_display_limit")]
    pub interest_display_limit: usize,
}

const fn default_interest_display_limit() -> usize {
    5
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            interest_display_limit: default_interest_display_limit(),
        }
    }
}
