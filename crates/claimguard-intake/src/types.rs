//! Results of a claim submission

use claimguard_domain::verdict::format_percent;
use claimguard_domain::{Claim, Verdict};
use serde::{Deserialize, Serialize};

/// Outcome of automated image validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Assessment {
    /// The classifier answered and the interpreter produced a verdict
    Assessed {
        /// Interpreter verdict
        verdict: Verdict,
    },

    /// The classifier could not be used; the claim proceeds unassessed
    Skipped {
        /// Why validation did not happen
        reason: String,
    },
}

impl Assessment {
    /// Verdict, if the image was assessed
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Assessment::Assessed { verdict } => Some(verdict),
            Assessment::Skipped { .. } => None,
        }
    }

    /// Whether the verdict flags potential fraud (false when skipped)
    pub fn is_potential_fraud(&self) -> bool {
        self.verdict().is_some_and(|v| v.is_potential_fraud)
    }

    /// Toast shown to the submitter
    pub fn notification(&self) -> Notification {
        match self {
            Assessment::Assessed { verdict } if verdict.is_potential_fraud => Notification {
                title: "Potential fraud detected".to_string(),
                description: format!(
                    "{} (confidence {}%)",
                    verdict.message,
                    format_percent(verdict.confidence)
                ),
                variant: NotificationVariant::Destructive,
            },
            Assessment::Assessed { verdict } => Notification {
                title: "Image validated".to_string(),
                description: format!(
                    "{} (confidence {}%)",
                    verdict.message,
                    format_percent(verdict.confidence)
                ),
                variant: NotificationVariant::Default,
            },
            Assessment::Skipped { reason } => Notification {
                title: "Automated validation skipped".to_string(),
                description: format!(
                    "The image could not be validated ({}). The claim will be reviewed manually.",
                    reason
                ),
                variant: NotificationVariant::Default,
            },
        }
    }
}

/// Visual style of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    /// Informational
    Default,
    /// Warning the user should not miss
    Destructive,
}

/// Message surfaced to the user after validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Short headline
    pub title: String,
    /// Details, including the verdict message when there is one
    pub description: String,
    /// Visual style
    pub variant: NotificationVariant,
}

/// Result of submitting a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeOutcome {
    /// Claim as stored by the claims service
    pub claim: Claim,

    /// Image validation result; `None` when no image was supplied
    pub assessment: Option<Assessment>,

    /// Toast for the submitter, when there is something to report
    pub notification: Option<Notification>,
}
