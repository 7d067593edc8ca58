//! Decision policy tests against whole classification results

use claimguard_domain::{ClassificationResult, DecisionRule, Prediction, NOT_DAMAGED_TAG};
use claimguard_interpreter::{interpret, rules, FraudInterpreter, InterpreterConfig, Signals};
use proptest::prelude::*;

fn result(predictions: &[(&str, f64)]) -> ClassificationResult {
    predictions
        .iter()
        .map(|(tag, p)| Prediction::new(*tag, *p))
        .collect()
}

#[test]
fn test_no_damage_with_claimed_damage_is_flagged() {
    let verdict = interpret(&result(&[(NOT_DAMAGED_TAG, 0.8), ("front", 0.1)]));

    assert!(verdict.is_potential_fraud);
    assert_eq!(verdict.confidence, 0.8);
    assert!(verdict.message.contains("80.0%"));
    assert_eq!(verdict.rule, DecisionRule::NoDamageShown);
}

#[test]
fn test_message_percentage_rounds_ties_up() {
    let verdict = interpret(&result(&[(NOT_DAMAGED_TAG, 0.8125)]));

    assert_eq!(verdict.rule, DecisionRule::NoDamageShown);
    assert!(verdict.message.contains("81.3%"));
}

#[test]
fn test_clear_front_damage_passes() {
    let verdict = interpret(&result(&[("front", 0.85), (NOT_DAMAGED_TAG, 0.1)]));

    assert!(!verdict.is_potential_fraud);
    assert_eq!(verdict.confidence, 0.85);
    assert!(verdict.message.contains("front"));
    assert_eq!(verdict.rule, DecisionRule::ClearDamage);
}

#[test]
fn test_empty_result_asks_for_manual_review() {
    let verdict = interpret(&ClassificationResult::default());

    assert!(!verdict.is_potential_fraud);
    assert_eq!(verdict.confidence, 0.0);
    assert!(verdict.message.contains("Low confidence"));
    assert!(verdict.message.contains("Manual review"));
    assert_eq!(verdict.rule, DecisionRule::LowConfidence);
}

#[test]
fn test_conflicting_signals_are_flagged() {
    let verdict = interpret(&result(&[(NOT_DAMAGED_TAG, 0.5), ("back", 0.5)]));

    assert!(verdict.is_potential_fraud);
    assert_eq!(verdict.confidence, 0.5);
    assert_eq!(verdict.rule, DecisionRule::ConflictingSignals);
}

#[test]
fn test_weak_spread_damage_has_unspecified_location() {
    let verdict = interpret(&result(&[("side", 0.3), ("back", 0.2)]));

    assert!(!verdict.is_potential_fraud);
    assert!((verdict.confidence - 0.5).abs() < 1e-9);
    assert!(verdict.message.contains("unspecified areas"));
    assert!(!verdict.message.contains("side"));
    assert_eq!(verdict.rule, DecisionRule::DamageDetected);
}

#[test]
fn test_no_damage_rule_wins_over_later_rules() {
    let verdict = interpret(&result(&[(NOT_DAMAGED_TAG, 0.65), ("side", 0.15), ("front", 0.1)]));

    assert_eq!(verdict.rule, DecisionRule::NoDamageShown);
    assert!(verdict.is_potential_fraud);
    assert_eq!(verdict.confidence, 0.65);
}

#[test]
fn test_message_is_deterministic() {
    let input = result(&[("back", 0.72), ("side", 0.41), (NOT_DAMAGED_TAG, 0.05)]);
    let first = interpret(&input);
    let second = interpret(&input);
    assert_eq!(first, second);
    assert!(first.message.contains("side, back"));
}

/// Walks a 0.01 grid over (no-damage, one location, spread damage) and checks
/// that the selected rule is always the first whose condition holds and that
/// the fallback is only reached when rules 1 to 4 all fail.
#[test]
fn test_threshold_grid_has_no_gaps() {
    let config = InterpreterConfig::default();

    for nd in 0..=100 {
        for front in 0..=100 {
            for side in (0..=100).step_by(10) {
                let signals = Signals::from_parts(
                    nd as f64 / 100.0,
                    [side as f64 / 100.0, 0.0, front as f64 / 100.0],
                );

                let selected = rules::select(&signals, &config);
                let first_match = rules::POLICY
                    .iter()
                    .position(|rule| rule.applies(&signals, &config))
                    .unwrap();
                assert_eq!(usize::from(selected.kind.number()), first_match + 1);

                if selected.kind == DecisionRule::DamageDetected {
                    assert!(signals.total_damage >= config.low_signal_max || signals.not_damaged >= config.low_signal_max);
                    assert!(signals.not_damaged <= config.conflict_min || signals.total_damage <= config.conflict_min);
                }
            }
        }
    }
}

#[test]
fn test_custom_thresholds() {
    let interpreter = FraudInterpreter::new(InterpreterConfig {
        clear_damage_min: 0.5,
        ..InterpreterConfig::default()
    })
    .unwrap();

    let verdict = interpreter.interpret(&result(&[("front", 0.6)]));
    assert_eq!(verdict.rule, DecisionRule::ClearDamage);
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(NOT_DAMAGED_TAG.to_string()),
        Just("side".to_string()),
        Just("back".to_string()),
        Just("front".to_string()),
        "[a-z]{3,8}",
    ]
}

fn predictions_strategy() -> impl Strategy<Value = Vec<Prediction>> {
    prop::collection::vec(
        (tag_strategy(), 0.0f64..=1.0).prop_map(|(tag, p)| Prediction::new(tag, p)),
        0..8,
    )
}

proptest! {
    /// Property: confidence is always within [0, 1]
    #[test]
    fn test_confidence_in_unit_interval(predictions in predictions_strategy()) {
        let verdict = interpret(&ClassificationResult::new(predictions));
        prop_assert!((0.0..=1.0).contains(&verdict.confidence));
    }

    /// Property: input order does not change the verdict
    #[test]
    fn test_order_independence(predictions in predictions_strategy()) {
        let forward = interpret(&ClassificationResult::new(predictions.clone()));

        let mut reversed = predictions;
        reversed.reverse();
        let backward = interpret(&ClassificationResult::new(reversed));

        prop_assert_eq!(forward, backward);
    }

    /// Property: only the no-damage and conflicting rules flag fraud
    #[test]
    fn test_fraud_flag_follows_rule(predictions in predictions_strategy()) {
        let verdict = interpret(&ClassificationResult::new(predictions));
        let flagging = matches!(
            verdict.rule,
            DecisionRule::NoDamageShown | DecisionRule::ConflictingSignals
        );
        prop_assert_eq!(verdict.is_potential_fraud, flagging);
    }
}
