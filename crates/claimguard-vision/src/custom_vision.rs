//! Hosted Custom Vision prediction endpoint
//!
//! Posts raw image bytes to a published classification iteration and parses
//! the returned tag probabilities.
//!
//! # Examples
//!
//! ```no_run
//! use claimguard_vision::{CustomVisionClassifier, VisionConfig};
//!
//! let config = VisionConfig::new(
//!     "https://example.cognitiveservices.azure.com/customvision/v3.0/Prediction/id/classify/iterations/damage/image",
//!     "prediction-key",
//! );
//! let classifier = CustomVisionClassifier::new(config).unwrap();
//! ```

use crate::VisionError;
use async_trait::async_trait;
use claimguard_domain::traits::ImageClassifier;
use claimguard_domain::ClassificationResult;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for prediction requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the prediction key
pub const PREDICTION_KEY_HEADER: &str = "Prediction-Key";

/// Connection settings for the prediction endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Full URL of the image classification endpoint
    pub prediction_url: String,

    /// Prediction key sent with every request
    pub prediction_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl VisionConfig {
    /// Settings with the default timeout
    pub fn new(prediction_url: impl Into<String>, prediction_key: impl Into<String>) -> Self {
        Self {
            prediction_url: prediction_url.into(),
            prediction_key: prediction_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the settings
    ///
    /// A zero timeout would fail every request before it is sent.
    pub fn validate(&self) -> Result<(), VisionError> {
        if self.prediction_url.is_empty() {
            return Err(VisionError::InvalidConfig(
                "prediction_url must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(VisionError::InvalidConfig(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Classifier backed by a Custom Vision prediction endpoint
///
/// Failures are returned as-is; callers decide whether to proceed without a
/// verdict. No retries are attempted.
pub struct CustomVisionClassifier {
    config: VisionConfig,
    client: reqwest::Client,
}

impl CustomVisionClassifier {
    /// Create a classifier for the given endpoint
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::InvalidConfig`] for settings rejected by
    /// [`VisionConfig::validate`], or [`VisionError::Communication`] if the
    /// HTTP client cannot be built.
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisionError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Endpoint settings in use
    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Classify one image
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached or the request times out
    /// - The endpoint answers with a non-success status
    /// - The body has no `predictions` array
    pub async fn predict(&self, image: &[u8]) -> Result<ClassificationResult, VisionError> {
        debug!(bytes = image.len(), "Sending image to classifier");

        let response = self
            .client
            .post(&self.config.prediction_url)
            .header(PREDICTION_KEY_HEADER, &self.config.prediction_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| VisionError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Classifier rejected image");
            return Err(VisionError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| VisionError::Communication(format!("Failed to read response: {}", e)))?;

        parse_payload(&body)
    }
}

/// Parse a prediction response body
pub(crate) fn parse_payload(body: &str) -> Result<ClassificationResult, VisionError> {
    serde_json::from_str::<ClassificationResult>(body)
        .map_err(|e| VisionError::MalformedPayload(e.to_string()))
}

#[async_trait]
impl ImageClassifier for CustomVisionClassifier {
    type Error = VisionError;

    async fn classify(&self, image: &[u8]) -> Result<ClassificationResult, Self::Error> {
        self.predict(image).await
    }
}
