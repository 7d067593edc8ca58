//! Configuration file parsing for the gateway.
//!
//! Loads bind settings, the remote API location, the optional JWT secret and
//! the classifier, intake and interpreter sections from TOML.

use claimguard_intake::IntakeConfig;
use claimguard_interpreter::InterpreterConfig;
use claimguard_vision::VisionConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Gateway configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Gateway configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// Base URL of the accounts and claims API
    pub api_url: String,

    /// Shared secret for verifying session tokens; decode-only when absent
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Image classifier endpoint; image validation is skipped when absent
    #[serde(default)]
    pub vision: Option<VisionConfig>,

    /// Intake limits
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Decision thresholds
    #[serde(default)]
    pub interpreter: InterpreterConfig,
}

impl GatewayConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: GatewayConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and nested sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::MissingField("api_url".to_string()));
        }
        if matches!(self.jwt_secret.as_deref(), Some("")) {
            return Err(ConfigError::Invalid("jwt_secret must not be empty".to_string()));
        }
        if let Some(vision) = &self.vision {
            if vision.prediction_url.is_empty() {
                return Err(ConfigError::MissingField("vision.prediction_url".to_string()));
            }
            vision
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("vision: {}", e)))?;
        }

        self.intake.validate().map_err(ConfigError::Invalid)?;
        self.interpreter
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        GatewayConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            api_url: "http://localhost:5000".to_string(),
            jwt_secret: None,
            vision: None,
            intake: IntakeConfig::default(),
            interpreter: InterpreterConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
