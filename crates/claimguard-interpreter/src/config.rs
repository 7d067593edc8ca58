//! Interpreter thresholds

use crate::InterpreterError;
use serde::{Deserialize, Serialize};

/// Thresholds of the decision policy
///
/// The defaults are the production policy. Comparisons are strict: a signal
/// exactly at a threshold does not pass it.
///
/// # Examples
///
/// ```
/// use claimguard_interpreter::InterpreterConfig;
///
/// let config = InterpreterConfig::default();
/// assert_eq!(config.no_damage_min, 0.6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// No-damage confidence above which an image is flagged (rule 1)
    pub no_damage_min: f64,

    /// Total damage below which a no-damage image is flagged (rule 1)
    pub no_damage_damage_max: f64,

    /// Maximum location damage above which damage is clear (rule 2)
    pub clear_damage_min: f64,

    /// No-damage confidence below which clear damage is accepted (rule 2)
    pub clear_damage_no_damage_max: f64,

    /// Ceiling under which both signals count as weak (rule 3)
    pub low_signal_max: f64,

    /// Floor over which both signals count as conflicting (rule 4)
    pub conflict_min: f64,

    /// Location damage above which a location is named in messages
    pub location_min: f64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            no_damage_min: 0.6,
            no_damage_damage_max: 0.3,
            clear_damage_min: 0.7,
            clear_damage_no_damage_max: 0.3,
            low_signal_max: 0.4,
            conflict_min: 0.4,
            location_min: 0.4,
        }
    }
}

impl InterpreterConfig {
    /// Check that every threshold is a number within [0, 1]
    pub fn validate(&self) -> Result<(), InterpreterError> {
        let thresholds = [
            ("no_damage_min", self.no_damage_min),
            ("no_damage_damage_max", self.no_damage_damage_max),
            ("clear_damage_min", self.clear_damage_min),
            ("clear_damage_no_damage_max", self.clear_damage_no_damage_max),
            ("low_signal_max", self.low_signal_max),
            ("conflict_min", self.conflict_min),
            ("location_min", self.location_min),
        ];

        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(InterpreterError::InvalidThreshold { name, value });
            }
        }

        Ok(())
    }
}
