//! ClaimGuard Image Classifier Layer
//!
//! Implementations of the `ImageClassifier` trait from `claimguard-domain`.
//!
//! # Classifiers
//!
//! - `MockClassifier`: Canned results for testing
//! - `CustomVisionClassifier`: Hosted damage-detection model over HTTP
//!
//! # Examples
//!
//! ```
//! use claimguard_domain::{traits::ImageClassifier, Prediction};
//! use claimguard_vision::MockClassifier;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let classifier = MockClassifier::new(vec![Prediction::new("front", 0.9)]);
//! let result = classifier.classify(b"jpeg bytes").await.unwrap();
//! assert_eq!(result.len(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod custom_vision;

use async_trait::async_trait;
use claimguard_domain::traits::ImageClassifier;
use claimguard_domain::{ClassificationResult, Prediction};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub use custom_vision::{CustomVisionClassifier, VisionConfig};

/// Errors that can occur while classifying an image
#[derive(Error, Debug)]
pub enum VisionError {
    /// Network failure or timeout
    #[error("Communication error: {0}")]
    Communication(String),

    /// Classifier answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code returned
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Response body is not a prediction payload
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Endpoint settings rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Mock classifier for deterministic testing
///
/// Returns the same predictions (or the same failure) for every image and
/// counts calls. Clones share the call counter.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    outcome: Result<Vec<Prediction>, String>,
    call_count: Arc<AtomicUsize>,
}

impl MockClassifier {
    /// Classifier that always returns `predictions`
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self {
            outcome: Ok(predictions),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Classifier that always fails with a communication error
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of classify calls so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ImageClassifier for MockClassifier {
    type Error = VisionError;

    async fn classify(&self, _image: &[u8]) -> Result<ClassificationResult, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.outcome {
            Ok(predictions) => Ok(ClassificationResult::new(predictions.clone())),
            Err(reason) => Err(VisionError::Communication(reason.clone())),
        }
    }
}
