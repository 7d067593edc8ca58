//! Claim intake workflow

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::types::{Assessment, IntakeOutcome};
use claimguard_domain::traits::{ClaimRepository, ImageClassifier};
use claimguard_domain::{AuthToken, NewClaim};
use claimguard_interpreter::FraudInterpreter;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// Validates claim images and files claims
///
/// The classifier is optional at runtime from the caller's point of view:
/// any classifier failure becomes [`Assessment::Skipped`] and the claim is
/// still filed, unflagged.
pub struct ClaimIntake<C, R>
where
    C: ImageClassifier,
    R: ClaimRepository,
{
    classifier: Arc<C>,
    repository: Arc<R>,
    interpreter: FraudInterpreter,
    config: IntakeConfig,
}

impl<C, R> Clone for ClaimIntake<C, R>
where
    C: ImageClassifier,
    R: ClaimRepository,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            repository: Arc::clone(&self.repository),
            interpreter: self.interpreter.clone(),
            config: self.config.clone(),
        }
    }
}

impl<C, R> ClaimIntake<C, R>
where
    C: ImageClassifier,
    R: ClaimRepository,
{
    /// Create an intake workflow
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Config`] if the configuration is invalid.
    pub fn new(
        classifier: Arc<C>,
        repository: Arc<R>,
        interpreter: FraudInterpreter,
        config: IntakeConfig,
    ) -> Result<Self, IntakeError> {
        config.validate().map_err(IntakeError::Config)?;

        Ok(Self {
            classifier,
            repository,
            interpreter,
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Reject empty and oversize images
    pub fn check_image(&self, image: &[u8]) -> Result<(), IntakeError> {
        if image.is_empty() {
            return Err(IntakeError::InvalidImage("image is empty".to_string()));
        }
        if image.len() > self.config.max_image_bytes {
            return Err(IntakeError::InvalidImage(format!(
                "{} bytes exceeds the {} byte limit",
                image.len(),
                self.config.max_image_bytes
            )));
        }
        Ok(())
    }

    /// Classify and interpret one image
    ///
    /// # Errors
    ///
    /// Only [`IntakeError::InvalidImage`]; classifier failures and timeouts
    /// come back as [`Assessment::Skipped`].
    pub async fn assess_image(&self, image: &[u8]) -> Result<Assessment, IntakeError> {
        self.check_image(image)?;

        let classified = timeout(self.config.assessment_timeout(), self.classifier.classify(image)).await;

        let assessment = match classified {
            Ok(Ok(result)) => Assessment::Assessed {
                verdict: self.interpreter.interpret(&result),
            },
            Ok(Err(e)) => {
                warn!("Image classification failed: {}", e);
                Assessment::Skipped {
                    reason: e.to_string(),
                }
            }
            Err(_) => {
                warn!(
                    "Image classification timed out after {}s",
                    self.config.assessment_timeout_secs
                );
                Assessment::Skipped {
                    reason: "classifier timed out".to_string(),
                }
            }
        };

        Ok(assessment)
    }

    /// Validate the image when supplied, then file the claim
    ///
    /// The stored claim is flagged exactly when the verdict says so.
    pub async fn submit(
        &self,
        auth: &AuthToken,
        mut claim: NewClaim,
        image: Option<&[u8]>,
    ) -> Result<IntakeOutcome, IntakeError> {
        let assessment = match image {
            Some(image) => Some(self.assess_image(image).await?),
            None => None,
        };

        claim.is_potential_fraud = assessment.as_ref().is_some_and(Assessment::is_potential_fraud);

        let stored = self
            .repository
            .create_claim(auth, &claim)
            .await
            .map_err(|e| IntakeError::Repository(Box::new(e)))?;

        info!(
            claim_id = %stored.id,
            flagged = stored.is_potential_fraud,
            "Claim filed for user '{}'",
            claim.user_id
        );

        let notification = assessment.as_ref().map(Assessment::notification);

        Ok(IntakeOutcome {
            claim: stored,
            assessment,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimguard_sdk::MockBackend;
    use claimguard_vision::MockClassifier;

    fn intake(config: IntakeConfig) -> ClaimIntake<MockClassifier, MockBackend> {
        ClaimIntake::new(
            Arc::new(MockClassifier::default()),
            Arc::new(MockBackend::new()),
            FraudInterpreter::default_config(),
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = ClaimIntake::new(
            Arc::new(MockClassifier::default()),
            Arc::new(MockBackend::new()),
            FraudInterpreter::default_config(),
            IntakeConfig {
                max_image_bytes: 0,
                ..IntakeConfig::default()
            },
        );
        assert!(matches!(result, Err(IntakeError::Config(_))));
    }

    #[test]
    fn test_check_image_bounds() {
        let intake = intake(IntakeConfig {
            max_image_bytes: 4,
            ..IntakeConfig::default()
        });

        assert!(intake.check_image(b"abcd").is_ok());
        assert!(matches!(intake.check_image(b""), Err(IntakeError::InvalidImage(_))));
        assert!(matches!(intake.check_image(b"abcde"), Err(IntakeError::InvalidImage(_))));
    }
}
