//! Claim module - insurance claim records held by the claims service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a claim record
///
/// Identifiers are assigned by the claims service and treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Generate a fresh random identifier
    ///
    /// Used by in-process backends that create records themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use claimguard_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// assert_eq!(id.as_str().len(), 36);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ClaimId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ClaimId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A claim record as returned by the claims service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// Owner of the claim, if known
    #[serde(default)]
    pub user_id: Option<String>,

    /// Kind of claim (free-form, set by the claims service)
    #[serde(default)]
    pub claim_type: String,

    /// Flagged by automated image validation
    #[serde(default)]
    pub is_potential_fraud: bool,

    /// Confirmed as fraud after review
    #[serde(default)]
    pub is_confirmed_fraud: bool,

    /// Fraud category recorded by reviewers
    #[serde(default)]
    pub fraud_subtype: Option<String>,

    /// Submitter's description
    #[serde(default)]
    pub description: Option<String>,

    /// When the insured event happened (ISO 8601)
    #[serde(default)]
    pub date_of_claim: String,

    /// Processing status
    #[serde(default)]
    pub claim_status: Option<String>,

    /// Record creation time (ISO 8601)
    #[serde(default)]
    pub created_at: String,

    /// Last update time (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

impl Claim {
    /// Fraud status shown for this claim
    pub fn fraud_status(&self) -> FraudStatus {
        FraudStatus::of(self)
    }
}

/// A claim as submitted, before the claims service assigns an identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    /// Owner of the claim
    pub user_id: String,

    /// Kind of claim
    pub claim_type: String,

    /// Submitter's description
    #[serde(default)]
    pub description: Option<String>,

    /// When the insured event happened (ISO 8601)
    pub date_of_claim: String,

    /// Result of automated image validation; false when unassessed
    #[serde(default)]
    pub is_potential_fraud: bool,
}

/// Fraud status of a claim, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FraudStatus {
    /// Confirmed by review
    ConfirmedFraud,

    /// Flagged, not yet confirmed
    PotentialFraud,

    /// Neither flagged nor confirmed
    Valid,
}

impl FraudStatus {
    /// Status of a claim; confirmation outranks the automated flag
    pub fn of(claim: &Claim) -> Self {
        if claim.is_confirmed_fraud {
            FraudStatus::ConfirmedFraud
        } else if claim.is_potential_fraud {
            FraudStatus::PotentialFraud
        } else {
            FraudStatus::Valid
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FraudStatus::ConfirmedFraud => "Confirmed Fraud",
            FraudStatus::PotentialFraud => "Potential Fraud",
            FraudStatus::Valid => "Valid",
        }
    }
}

impl fmt::Display for FraudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fraud counts over a list of claims
///
/// `potential_fraud` counts every flagged claim, confirmed or not; `valid`
/// counts claims carrying neither flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSummary {
    /// Number of claims
    pub total: usize,

    /// Claims confirmed as fraud
    pub confirmed_fraud: usize,

    /// Claims flagged as potential fraud
    pub potential_fraud: usize,

    /// Claims with neither flag
    pub valid: usize,
}

impl ClaimSummary {
    /// Count fraud statuses over `claims`
    pub fn from_claims(claims: &[Claim]) -> Self {
        claims.iter().fold(Self::default(), |mut summary, claim| {
            summary.total += 1;
            if claim.is_confirmed_fraud {
                summary.confirmed_fraud += 1;
            }
            if claim.is_potential_fraud {
                summary.potential_fraud += 1;
            }
            if !claim.is_confirmed_fraud && !claim.is_potential_fraud {
                summary.valid += 1;
            }
            summary
        })
    }
}

/// Claims owned by `user_id`
pub fn claims_for_user<'a>(claims: &'a [Claim], user_id: &str) -> Vec<&'a Claim> {
    claims
        .iter()
        .filter(|claim| claim.user_id.as_deref() == Some(user_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(potential: bool, confirmed: bool, user: &str) -> Claim {
        Claim {
            id: ClaimId::new(),
            user_id: Some(user.to_string()),
            claim_type: "collision".to_string(),
            is_potential_fraud: potential,
            is_confirmed_fraud: confirmed,
            fraud_subtype: None,
            description: None,
            date_of_claim: "2024-05-01T00:00:00Z".to_string(),
            claim_status: Some("Pending".to_string()),
            created_at: "2024-05-02T00:00:00Z".to_string(),
            updated_at: "2024-05-02T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_fraud_status_precedence() {
        assert_eq!(claim(true, true, "u").fraud_status(), FraudStatus::ConfirmedFraud);
        assert_eq!(claim(false, true, "u").fraud_status(), FraudStatus::ConfirmedFraud);
        assert_eq!(claim(true, false, "u").fraud_status(), FraudStatus::PotentialFraud);
        assert_eq!(claim(false, false, "u").fraud_status(), FraudStatus::Valid);
    }

    #[test]
    fn test_summary_counts() {
        let claims = vec![
            claim(true, true, "a"),
            claim(true, false, "a"),
            claim(false, false, "b"),
            claim(false, false, "b"),
        ];

        let summary = ClaimSummary::from_claims(&claims);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.confirmed_fraud, 1);
        assert_eq!(summary.potential_fraud, 2);
        assert_eq!(summary.valid, 2);
    }

    #[test]
    fn test_summary_of_nothing() {
        assert_eq!(ClaimSummary::from_claims(&[]), ClaimSummary::default());
    }

    #[test]
    fn test_claims_for_user() {
        let claims = vec![claim(false, false, "a"), claim(true, false, "b"), claim(false, false, "a")];
        assert_eq!(claims_for_user(&claims, "a").len(), 2);
        assert_eq!(claims_for_user(&claims, "c").len(), 0);
    }

    #[test]
    fn test_deserialize_sparse_claim() {
        let json = r#"{
            "id": "6650c1",
            "userId": null,
            "claimType": "theft",
            "isPotentialFraud": true,
            "dateOfClaim": "2024-01-01"
        }"#;

        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.id.as_str(), "6650c1");
        assert!(claim.user_id.is_none());
        assert!(!claim.is_confirmed_fraud);
        assert_eq!(claim.fraud_status(), FraudStatus::PotentialFraud);
    }
}
