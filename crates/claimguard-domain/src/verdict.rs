//! Verdict - the fraud-risk conclusion drawn from one classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision rule that produced a verdict, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecisionRule {
    /// Strong no-damage signal while damage is claimed
    NoDamageShown,

    /// Strong damage signal at one or more locations
    ClearDamage,

    /// Every signal is weak
    LowConfidence,

    /// No-damage and damage signals both moderately strong
    ConflictingSignals,

    /// Fallback: some damage, nothing decisive
    DamageDetected,
}

impl DecisionRule {
    /// All rules in evaluation order
    pub const ALL: [DecisionRule; 5] = [
        DecisionRule::NoDamageShown,
        DecisionRule::ClearDamage,
        DecisionRule::LowConfidence,
        DecisionRule::ConflictingSignals,
        DecisionRule::DamageDetected,
    ];

    /// 1-based position of the rule in the evaluation order
    pub fn number(&self) -> u8 {
        match self {
            DecisionRule::NoDamageShown => 1,
            DecisionRule::ClearDamage => 2,
            DecisionRule::LowConfidence => 3,
            DecisionRule::ConflictingSignals => 4,
            DecisionRule::DamageDetected => 5,
        }
    }

    /// Stable name of the rule
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionRule::NoDamageShown => "no_damage_shown",
            DecisionRule::ClearDamage => "clear_damage",
            DecisionRule::LowConfidence => "low_confidence",
            DecisionRule::ConflictingSignals => "conflicting_signals",
            DecisionRule::DamageDetected => "damage_detected",
        }
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fraud-risk verdict for one claim image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Whether the image evidence contradicts the claimed damage
    pub is_potential_fraud: bool,

    /// Strength of the evidence driving the verdict, in [0, 1]
    pub confidence: f64,

    /// Human-readable explanation
    pub message: String,

    /// Rule that produced this verdict
    pub rule: DecisionRule,
}

impl Verdict {
    /// Confidence as a percentage with one decimal (e.g. `"80.0"`)
    pub fn confidence_percent(&self) -> String {
        format_percent(self.confidence)
    }
}

/// Format a [0, 1] value as a percentage with one decimal place
///
/// # Examples
///
/// ```
/// use claimguard_domain::verdict::format_percent;
///
/// assert_eq!(format_percent(0.8), "80.0");
/// assert_eq!(format_percent(0.8567), "85.7");
/// assert_eq!(format_percent(0.8125), "81.3");
/// ```
pub fn format_percent(value: f64) -> String {
    format_tenths(value * 100.0)
}

/// Format with one decimal place, rounding ties away from zero
///
/// `format!("{:.1}")` rounds exact ties to even (`81.25` gives `81.2`);
/// displayed figures round them up instead.
pub fn format_tenths(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}
