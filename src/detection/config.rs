//! Detection configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Detection engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Path to a field-name rules TOML file (built-in rules when absent)
    #[serde(default)]
    pub rules_file: Option<PathBuf>,

    /// Maximum number of masked samples kept in the scan report
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Maximum number of per-row warnings kept in the scan report
    #[serde(default = "default_warning_limit")]
    pub warning_limit: usize,
}

fn default_sample_limit() -> usize {
    20
}

fn default_warning_limit() -> usize {
    50
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            rules_file: None,
            sample_limit: default_sample_limit(),
            warning_limit: default_warning_limit(),
        }
    }
}

impl DetectionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.rules_file {
            if !path.exists() {
                anyhow::bail!("Field-name rules file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Field-name rules must be a TOML file: {}", path.display());
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("GUARDIAN_DETECTION_RULES_FILE") {
            self.rules_file = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("GUARDIAN_DETECTION_SAMPLE_LIMIT") {
            self.sample_limit = val
                .parse()
                .context("Invalid GUARDIAN_DETECTION_SAMPLE_LIMIT value")?;
        }

        if let Ok(val) = std::env::var("GUARDIAN_DETECTION_WARNING_LIMIT") {
            self.warning_limit = val
                .parse()
                .context("Invalid GUARDIAN_DETECTION_WARNING_LIMIT value")?;
        }

        Ok(())
    }
}
