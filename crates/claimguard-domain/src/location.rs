//! Damage locations and the tag table mapping classifier tags to signals

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classifier tag reporting that the image shows no damage at all
///
/// The spelling matches the tag published by the trained classifier.
pub const NOT_DAMAGED_TAG: &str = "NOT_demaged";

/// Region of a vehicle the classifier can flag as damaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageLocation {
    /// Side panels
    Side,

    /// Rear of the vehicle
    Back,

    /// Front of the vehicle
    Front,
}

impl DamageLocation {
    /// All locations in their fixed reporting order
    pub const ALL: [DamageLocation; 3] = [
        DamageLocation::Side,
        DamageLocation::Back,
        DamageLocation::Front,
    ];

    /// Label used in verdict messages
    pub fn label(&self) -> &'static str {
        match self {
            DamageLocation::Side => "side",
            DamageLocation::Back => "back",
            DamageLocation::Front => "front",
        }
    }

    /// Position of this location in [`DamageLocation::ALL`]
    pub fn index(&self) -> usize {
        match self {
            DamageLocation::Side => 0,
            DamageLocation::Back => 1,
            DamageLocation::Front => 2,
        }
    }
}

impl fmt::Display for DamageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signal a classifier tag contributes to the fraud verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalTag {
    /// The image shows no damage
    NotDamaged,

    /// The image shows damage at a location
    Damage(DamageLocation),
}

/// Known classifier tags
///
/// Tags not listed here are ignored. New location tags only need an entry
/// here and a [`DamageLocation`] variant.
pub const TAG_TABLE: &[(&str, SignalTag)] = &[
    (NOT_DAMAGED_TAG, SignalTag::NotDamaged),
    ("side", SignalTag::Damage(DamageLocation::Side)),
    ("back", SignalTag::Damage(DamageLocation::Back)),
    ("front", SignalTag::Damage(DamageLocation::Front)),
];

impl SignalTag {
    /// Look up the signal for a classifier tag (exact match)
    ///
    /// # Examples
    ///
    /// ```
    /// use claimguard_domain::{DamageLocation, SignalTag};
    ///
    /// assert_eq!(SignalTag::lookup("back"), Some(SignalTag::Damage(DamageLocation::Back)));
    /// assert_eq!(SignalTag::lookup("wheel"), None);
    /// ```
    pub fn lookup(tag_name: &str) -> Option<Self> {
        TAG_TABLE
            .iter()
            .find(|(name, _)| *name == tag_name)
            .map(|(_, signal)| *signal)
    }
}
