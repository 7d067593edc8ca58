//! Signals derived from a classification result

use claimguard_domain::{ClassificationResult, DamageLocation, SignalTag};

/// Label used when damage is reported but no location passes the threshold
pub(crate) const UNSPECIFIED_LOCATIONS: &str = "unspecified areas";

/// Signals the decision policy runs on
///
/// Missing tags contribute 0. When a tag occurs more than once, its highest
/// probability is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    /// Confidence that the image shows no damage
    pub not_damaged: f64,

    /// Damage confidence per location, indexed by [`DamageLocation::index`]
    pub damage: [f64; 3],

    /// Sum of the location damage confidences
    pub total_damage: f64,

    /// Highest location damage confidence
    pub max_damage: f64,
}

impl Signals {
    /// Derive signals from classifier output
    ///
    /// Predictions are ranked by probability first, so the first occurrence
    /// of a tag is its strongest one and the input order does not matter.
    pub fn derive(result: &ClassificationResult) -> Self {
        let mut not_damaged: Option<f64> = None;
        let mut damage: [Option<f64>; 3] = [None; 3];

        for prediction in result.ranked() {
            let probability = prediction.bounded_probability();
            match SignalTag::lookup(&prediction.tag_name) {
                Some(SignalTag::NotDamaged) => {
                    not_damaged.get_or_insert(probability);
                }
                Some(SignalTag::Damage(location)) => {
                    damage[location.index()].get_or_insert(probability);
                }
                None => {}
            }
        }

        Self::from_parts(not_damaged.unwrap_or(0.0), damage.map(|d| d.unwrap_or(0.0)))
    }

    /// Build signals from raw confidences
    pub fn from_parts(not_damaged: f64, damage: [f64; 3]) -> Self {
        let total_damage = damage.iter().sum();
        let max_damage = damage.iter().copied().fold(0.0, f64::max);

        Self {
            not_damaged,
            damage,
            total_damage,
            max_damage,
        }
    }

    /// Damage confidence at one location
    pub fn damage_at(&self, location: DamageLocation) -> f64 {
        self.damage[location.index()]
    }

    /// Locations whose damage confidence exceeds `min`, in fixed order
    pub fn damage_locations(&self, min: f64) -> Vec<DamageLocation> {
        DamageLocation::ALL
            .into_iter()
            .filter(|location| self.damage_at(*location) > min)
            .collect()
    }

    /// Comma-separated location labels, or `"unspecified areas"` when none pass
    pub fn location_label(&self, min: f64) -> String {
        let labels: Vec<&str> = self
            .damage_locations(min)
            .iter()
            .map(DamageLocation::label)
            .collect();

        if labels.is_empty() {
            UNSPECIFIED_LOCATIONS.to_string()
        } else {
            labels.join(", ")
        }
    }
}
