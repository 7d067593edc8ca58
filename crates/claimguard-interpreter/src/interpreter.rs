//! Fraud-signal interpretation

use crate::rules::{self, bounded};
use crate::{InterpreterConfig, InterpreterError, Signals};
use claimguard_domain::{ClassificationResult, Verdict};
use tracing::debug;

/// Interprets classifier output into fraud verdicts
#[derive(Debug, Clone, Default)]
pub struct FraudInterpreter {
    config: InterpreterConfig,
}

impl FraudInterpreter {
    /// Create an interpreter with the given thresholds
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::InvalidThreshold`] if a threshold is
    /// outside [0, 1].
    pub fn new(config: InterpreterConfig) -> Result<Self, InterpreterError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an interpreter with the production thresholds
    pub fn default_config() -> Self {
        Self {
            config: InterpreterConfig::default(),
        }
    }

    /// Thresholds in use
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Derive the signals the policy runs on
    pub fn signals(&self, result: &ClassificationResult) -> Signals {
        Signals::derive(result)
    }

    /// Produce the verdict for one classification result
    ///
    /// Never fails: missing tags count as 0 and an empty result falls to the
    /// low-confidence rule. The returned confidence is always within [0, 1].
    pub fn interpret(&self, result: &ClassificationResult) -> Verdict {
        let signals = self.signals(result);
        let rule = rules::select(&signals, &self.config);
        let outcome = rule.produce(&signals, &self.config);

        debug!(
            rule = rule.kind.as_str(),
            not_damaged = signals.not_damaged,
            total_damage = signals.total_damage,
            max_damage = signals.max_damage,
            "Interpreted {} predictions",
            result.len()
        );

        Verdict {
            is_potential_fraud: outcome.is_potential_fraud,
            confidence: bounded(outcome.confidence),
            message: outcome.message,
            rule: rule.kind,
        }
    }
}

/// Interpret with the production thresholds
pub fn interpret(result: &ClassificationResult) -> Verdict {
    FraudInterpreter::default_config().interpret(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimguard_domain::{DecisionRule, Prediction, NOT_DAMAGED_TAG};

    fn result(predictions: &[(&str, f64)]) -> ClassificationResult {
        predictions
            .iter()
            .map(|(tag, p)| Prediction::new(*tag, *p))
            .collect()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = InterpreterConfig {
            conflict_min: -0.1,
            ..InterpreterConfig::default()
        };
        assert!(FraudInterpreter::new(config).is_err());
    }

    #[test]
    fn test_no_damage_shown() {
        let verdict = interpret(&result(&[(NOT_DAMAGED_TAG, 0.8), ("front", 0.1)]));

        assert_eq!(verdict.rule, DecisionRule::NoDamageShown);
        assert!(verdict.is_potential_fraud);
        assert_eq!(verdict.confidence, 0.8);
        assert!(verdict.message.contains("80.0%"));
    }

    #[test]
    fn test_clear_damage_names_locations() {
        let verdict = interpret(&result(&[("front", 0.85), ("side", 0.45), (NOT_DAMAGED_TAG, 0.1)]));

        assert_eq!(verdict.rule, DecisionRule::ClearDamage);
        assert!(!verdict.is_potential_fraud);
        assert_eq!(verdict.confidence, 0.85);
        assert!(verdict.message.contains("side, front"));
        assert!(verdict.message.contains("85.0%"));
    }

    #[test]
    fn test_confidence_is_bounded() {
        let verdict = interpret(&result(&[("side", 0.6), ("back", 0.6), ("front", 0.6), (NOT_DAMAGED_TAG, 0.35)]));

        assert_eq!(verdict.rule, DecisionRule::DamageDetected);
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        let verdict = interpret(&result(&[("windshield", 0.99), ("tire", 0.97)]));
        assert_eq!(verdict.rule, DecisionRule::LowConfidence);
        assert_eq!(verdict.confidence, 0.0);
    }
}
