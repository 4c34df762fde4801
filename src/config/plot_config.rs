//! Plot Tools Configuration - label formats and time line policy as TOML values
//!
//! Every struct implements `Default`, so an empty or missing file gives the
//! built-in behavior.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::options::is_valid_format;
use crate::types::{first_report_step_for, ChannelKind};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "WELLPLOT_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "wellplot.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `PlotToolsConfig::load()` which searches:
/// 1. `$WELLPLOT_CONFIG` env var
/// 2. `./wellplot.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotToolsConfig {
    /// Time step option label formats
    #[serde(default)]
    pub labels: LabelConfig,

    /// Time line assembly
    #[serde(default)]
    pub timeline: TimelineConfig,
}

impl PlotToolsConfig {
    /// Load configuration using the standard search order.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded plot config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded plot config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Unknown keys only warn
        for w in super::validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Plot config saved");
        Ok(())
    }

    /// Reject format strings that are empty or that chrono cannot render.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let l = &self.labels;
        Self::check_format(&l.date_format, "labels.date_format", &mut errors);
        Self::check_format(&l.minute_format, "labels.minute_format", &mut errors);
        Self::check_format(&l.second_format, "labels.second_format", &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_format(format: &str, name: &str, errors: &mut Vec<String>) {
        if format.trim().is_empty() {
            errors.push(format!("{name} must not be empty"));
        } else if !is_valid_format(format) {
            errors.push(format!("{name} = '{format}' is not a valid strftime format"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Labels
// ============================================================================

/// strftime formats for time step option labels.
///
/// Minute and second formats are appended to the date format when the time
/// steps need them to be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub date_format: String,
    pub minute_format: String,
    pub second_format: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            date_format: "%d.%m.%Y".to_string(),
            minute_format: "%H:%M".to_string(),
            second_format: "%H:%M:%S".to_string(),
        }
    }
}

// ============================================================================
// Time Line
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub first_report_step: FirstReportStepPolicy,
}

/// When grid cases offer their first report step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstReportStepPolicy {
    /// Only when the plot shows pressure.
    #[default]
    Auto,
    Always,
    Never,
}

impl FirstReportStepPolicy {
    /// Whether to include the first report step for a plot of `channel_kinds`.
    pub fn resolve(self, channel_kinds: &BTreeSet<ChannelKind>) -> bool {
        match self {
            Self::Auto => first_report_step_for(channel_kinds),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlotKind;

    #[test]
    fn test_default_config_validates() {
        let config = PlotToolsConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: PlotToolsConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config, PlotToolsConfig::default());
        assert_eq!(config.labels.date_format, "%d.%m.%Y");
        assert_eq!(config.timeline.first_report_step, FirstReportStepPolicy::Auto);
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[labels]
date_format = "%Y-%m-%d"

[timeline]
first_report_step = "never"
"#;
        let config: PlotToolsConfig = toml::from_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.labels.date_format, "%Y-%m-%d");
        assert_eq!(config.labels.minute_format, "%H:%M");
        assert_eq!(config.timeline.first_report_step, FirstReportStepPolicy::Never);
    }

    #[test]
    fn test_validation_rejects_bad_formats() {
        let mut config = PlotToolsConfig::default();
        config.labels.date_format = "   ".to_string();
        config.labels.second_format = "%Q".to_string();
        let result = config.validate();
        assert!(result.is_err(), "Empty and invalid formats should fail validation");
        if let Err(ConfigError::Validation(errors)) = result {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().any(|e| e.contains("labels.date_format")));
            assert!(errors.iter().any(|e| e.contains("labels.second_format")));
        }
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = PlotToolsConfig::default();
        config.timeline.first_report_step = FirstReportStepPolicy::Always;
        let text = config.to_toml().expect("serialize");
        assert!(text.contains("first_report_step = \"always\""));
        let back: PlotToolsConfig = toml::from_str(&text).expect("parse back");
        assert_eq!(back, config);
    }

    #[test]
    fn test_first_report_step_policy() {
        let rft = PlotKind::Rft.channel_kinds();
        let plt = PlotKind::Plt.channel_kinds();
        assert!(FirstReportStepPolicy::Auto.resolve(&rft));
        assert!(!FirstReportStepPolicy::Auto.resolve(&plt));
        assert!(FirstReportStepPolicy::Always.resolve(&plt));
        assert!(!FirstReportStepPolicy::Never.resolve(&rft));
    }

    #[test]
    fn test_validation_error_display_lists_errors() {
        let err = ConfigError::Validation(vec!["a is bad".into(), "b is bad".into()]);
        let text = err.to_string();
        assert!(text.starts_with("Config validation failed:"));
        assert!(text.contains("  - a is bad"));
        assert!(text.contains("  - b is bad"));
    }
}
