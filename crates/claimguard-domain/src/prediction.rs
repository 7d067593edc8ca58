//! Classifier output: predictions and the per-image classification result

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One classifier output: how strongly an image matches a visual category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Identifier of the visual category (e.g. `front`, `NOT_demaged`)
    pub tag_name: String,

    /// Classifier confidence that the image matches this tag, in [0, 1]
    pub probability: f64,
}

impl Prediction {
    /// Create a new prediction
    ///
    /// # Examples
    ///
    /// ```
    /// use claimguard_domain::Prediction;
    ///
    /// let p = Prediction::new("front", 0.85);
    /// assert_eq!(p.tag_name, "front");
    /// ```
    pub fn new(tag_name: impl Into<String>, probability: f64) -> Self {
        Self {
            tag_name: tag_name.into(),
            probability,
        }
    }

    /// Probability clamped into [0, 1], with non-finite values read as 0
    pub fn bounded_probability(&self) -> f64 {
        if self.probability.is_finite() {
            self.probability.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Ordered predictions returned for one submitted image
///
/// Probabilities are independent per-tag scores and need not sum to 1.
/// A result is created per validation call and consumed once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Predictions in the order the classifier returned them
    pub predictions: Vec<Prediction>,
}

impl ClassificationResult {
    /// Create a result from a list of predictions
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }

    /// Number of predictions
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// Whether the classifier returned no predictions at all
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Predictions ordered by probability, highest first
    ///
    /// The sort is stable: predictions with equal probability keep their
    /// input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use claimguard_domain::{ClassificationResult, Prediction};
    ///
    /// let result = ClassificationResult::new(vec![
    ///     Prediction::new("side", 0.2),
    ///     Prediction::new("front", 0.9),
    /// ]);
    /// let ranked = result.ranked();
    /// assert_eq!(ranked[0].tag_name, "front");
    /// ```
    pub fn ranked(&self) -> Vec<&Prediction> {
        let mut ranked: Vec<&Prediction> = self.predictions.iter().collect();
        ranked.sort_by(|a, b| {
            b.bounded_probability()
                .partial_cmp(&a.bounded_probability())
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }
}

impl From<Vec<Prediction>> for ClassificationResult {
    fn from(predictions: Vec<Prediction>) -> Self {
        Self::new(predictions)
    }
}

impl FromIterator<Prediction> for ClassificationResult {
    fn from_iter<I: IntoIterator<Item = Prediction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_orders_descending() {
        let result = ClassificationResult::new(vec![
            Prediction::new("side", 0.1),
            Prediction::new("back", 0.7),
            Prediction::new("front", 0.4),
        ]);

        let tags: Vec<&str> = result.ranked().iter().map(|p| p.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["back", "front", "side"]);
    }

    #[test]
    fn test_ranked_is_stable_for_ties() {
        let result = ClassificationResult::new(vec![
            Prediction::new("first", 0.5),
            Prediction::new("second", 0.5),
            Prediction::new("third", 0.5),
        ]);

        let tags: Vec<&str> = result.ranked().iter().map(|p| p.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_bounded_probability() {
        assert_eq!(Prediction::new("x", 1.4).bounded_probability(), 1.0);
        assert_eq!(Prediction::new("x", -0.2).bounded_probability(), 0.0);
        assert_eq!(Prediction::new("x", f64::NAN).bounded_probability(), 0.0);
        assert_eq!(Prediction::new("x", 0.25).bounded_probability(), 0.25);
    }

    #[test]
    fn test_deserialize_classifier_payload() {
        let json = r#"{
            "id": "0f1c",
            "iteration": "Iteration3",
            "predictions": [
                {"probability": 0.91, "tagId": "a1", "tagName": "front"},
                {"probability": 0.02, "tagId": "b2", "tagName": "NOT_demaged"}
            ]
        }"#;

        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.predictions[0], Prediction::new("front", 0.91));
    }

    #[test]
    fn test_missing_predictions_is_rejected() {
        let json = r#"{"id": "0f1c"}"#;
        assert!(serde_json::from_str::<ClassificationResult>(json).is_err());
    }
}
