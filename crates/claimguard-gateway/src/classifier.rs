//! Classifier selection from configuration.

use async_trait::async_trait;
use claimguard_domain::traits::ImageClassifier;
use claimguard_domain::ClassificationResult;
use claimguard_vision::{CustomVisionClassifier, VisionConfig, VisionError};

/// The configured image classifier, or none
pub enum ConfiguredClassifier {
    /// Hosted prediction endpoint
    CustomVision(CustomVisionClassifier),

    /// No `[vision]` section; every image is skipped
    Disabled,
}

impl ConfiguredClassifier {
    /// Build from the optional `[vision]` section
    pub fn from_config(config: Option<VisionConfig>) -> Result<Self, VisionError> {
        match config {
            Some(config) => Ok(Self::CustomVision(CustomVisionClassifier::new(config)?)),
            None => Ok(Self::Disabled),
        }
    }

    /// Whether images are actually classified
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::CustomVision(_))
    }
}

#[async_trait]
impl ImageClassifier for ConfiguredClassifier {
    type Error = VisionError;

    async fn classify(&self, image: &[u8]) -> Result<ClassificationResult, Self::Error> {
        match self {
            Self::CustomVision(classifier) => classifier.classify(image).await,
            Self::Disabled => Err(VisionError::Communication(
                "no image classifier configured".to_string(),
            )),
        }
    }
}
