//! Configuration for claim intake

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upload limit of the hosted classifier (4 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Configuration for the intake workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Largest image accepted for validation
    pub max_image_bytes: usize,

    /// Maximum time spent waiting on the classifier (seconds)
    pub assessment_timeout_secs: u64,
}

impl IntakeConfig {
    /// Classifier wait limit as a Duration
    pub fn assessment_timeout(&self) -> Duration {
        Duration::from_secs(self.assessment_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_image_bytes == 0 {
            return Err("max_image_bytes must be greater than 0".to_string());
        }
        if self.assessment_timeout_secs == 0 {
            return Err("assessment_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            assessment_timeout_secs: 30,
        }
    }
}
