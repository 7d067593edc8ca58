//! The decision policy as an ordered table of guarded rules
//!
//! Rules are evaluated in table order and the first whose guard holds
//! produces the verdict. The last rule always holds, so every input gets
//! exactly one verdict.

use crate::{InterpreterConfig, Signals};
use claimguard_domain::verdict::format_percent;
use claimguard_domain::DecisionRule;

/// Verdict fields produced by a rule, before confidence is bounded
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Whether the evidence contradicts the claimed damage
    pub is_potential_fraud: bool,

    /// Strength of the driving evidence
    pub confidence: f64,

    /// Explanation, with the confidence rendered as a percentage
    pub message: String,
}

/// One entry of the decision policy
pub struct Rule {
    /// Which rule this is
    pub kind: DecisionRule,
    guard: fn(&Signals, &InterpreterConfig) -> bool,
    produce: fn(&Signals, &InterpreterConfig) -> Outcome,
}

impl Rule {
    /// Whether the rule's condition holds
    pub fn applies(&self, signals: &Signals, config: &InterpreterConfig) -> bool {
        (self.guard)(signals, config)
    }

    /// Build the rule's outcome, regardless of its guard
    pub fn produce(&self, signals: &Signals, config: &InterpreterConfig) -> Outcome {
        (self.produce)(signals, config)
    }
}

/// Rules in evaluation order
pub static POLICY: [Rule; 5] = [
    Rule {
        kind: DecisionRule::NoDamageShown,
        guard: |s, c| s.not_damaged > c.no_damage_min && s.total_damage < c.no_damage_damage_max,
        produce: no_damage_shown,
    },
    Rule {
        kind: DecisionRule::ClearDamage,
        guard: |s, c| s.max_damage > c.clear_damage_min && s.not_damaged < c.clear_damage_no_damage_max,
        produce: clear_damage,
    },
    Rule {
        kind: DecisionRule::LowConfidence,
        guard: |s, c| s.total_damage < c.low_signal_max && s.not_damaged < c.low_signal_max,
        produce: low_confidence,
    },
    Rule {
        kind: DecisionRule::ConflictingSignals,
        guard: |s, c| s.not_damaged > c.conflict_min && s.total_damage > c.conflict_min,
        produce: conflicting_signals,
    },
    Rule {
        kind: DecisionRule::DamageDetected,
        guard: |_, _| true,
        produce: damage_detected,
    },
];

/// First rule whose guard holds
pub fn select(signals: &Signals, config: &InterpreterConfig) -> &'static Rule {
    POLICY
        .iter()
        .find(|rule| rule.applies(signals, config))
        .unwrap_or(&POLICY[POLICY.len() - 1])
}

/// Look up a rule by kind
pub fn rule(kind: DecisionRule) -> &'static Rule {
    &POLICY[usize::from(kind.number()) - 1]
}

fn no_damage_shown(s: &Signals, _: &InterpreterConfig) -> Outcome {
    let confidence = s.not_damaged;
    Outcome {
        is_potential_fraud: true,
        confidence,
        message: format!(
            "Potential fraud: the image shows no damage ({}% confidence) but damage was claimed. Flagged for review.",
            format_percent(bounded(confidence))
        ),
    }
}

fn clear_damage(s: &Signals, c: &InterpreterConfig) -> Outcome {
    let confidence = s.max_damage;
    Outcome {
        is_potential_fraud: false,
        confidence,
        message: format!(
            "Clear damage detected at {} ({}% confidence). Proceeding with standard verification.",
            s.location_label(c.location_min),
            format_percent(bounded(confidence))
        ),
    }
}

fn low_confidence(s: &Signals, _: &InterpreterConfig) -> Outcome {
    let confidence = s.total_damage.max(s.not_damaged);
    Outcome {
        is_potential_fraud: false,
        confidence,
        message: format!(
            "Low confidence in all signals ({}%). Manual review suggested.",
            format_percent(bounded(confidence))
        ),
    }
}

fn conflicting_signals(s: &Signals, _: &InterpreterConfig) -> Outcome {
    let confidence = s.not_damaged.max(s.total_damage);
    Outcome {
        is_potential_fraud: true,
        confidence,
        message: format!(
            "Conflicting signals: the image shows both damaged and undamaged evidence ({}% confidence). Additional review required.",
            format_percent(bounded(confidence))
        ),
    }
}

fn damage_detected(s: &Signals, c: &InterpreterConfig) -> Outcome {
    let confidence = s.total_damage.max(s.not_damaged);
    Outcome {
        is_potential_fraud: false,
        confidence,
        message: format!(
            "Damage detected at {} ({}% confidence). Proceeding with standard verification.",
            s.location_label(c.location_min),
            format_percent(bounded(confidence))
        ),
    }
}

/// Summed damage can exceed 1; reported confidence never does
pub(crate) fn bounded(confidence: f64) -> f64 {
    confidence.clamp(0.0, 1.0)
}
