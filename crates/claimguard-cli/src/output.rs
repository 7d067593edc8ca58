//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use claimguard_domain::{
    Claim, ClaimSummary, ClassificationResult, FraudStatus, User, UserStats, Verdict,
};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a verdict.
    pub fn format_verdict(&self, verdict: &Verdict) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(verdict)?),
            OutputFormat::Quiet => Ok(if verdict.is_potential_fraud {
                "fraud".to_string()
            } else {
                "ok".to_string()
            }),
            OutputFormat::Table => {
                let headline = format!(
                    "Rule {} ({}), confidence {}%",
                    verdict.rule.number(),
                    verdict.rule,
                    verdict.confidence_percent()
                );
                let headline = if verdict.is_potential_fraud {
                    self.error(&format!("Potential fraud: {}", headline))
                } else {
                    self.success(&format!("No fraud indicated: {}", headline))
                };
                Ok(format!("{}\n  {}", headline, verdict.message))
            }
        }
    }

    /// Format classifier predictions together with their verdict.
    pub fn format_classification(
        &self,
        result: &ClassificationResult,
        verdict: &Verdict,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "predictions": result.predictions,
                "verdict": verdict,
            }))?),
            OutputFormat::Quiet => self.format_verdict(verdict),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Tag", "Probability"]);
                for prediction in result.ranked() {
                    builder.push_record([
                        prediction.tag_name.clone(),
                        format!("{:.4}", prediction.probability),
                    ]);
                }

                Ok(format!(
                    "{}\n{}",
                    self.table(builder),
                    self.format_verdict(verdict)?
                ))
            }
        }
    }

    /// Format claims with their fraud counts.
    pub fn format_claims(&self, claims: &[Claim], summary: &ClaimSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = claims
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "claim": c,
                            "fraudStatus": c.fraud_status(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "summary": summary,
                    "claims": rows,
                }))?)
            }
            OutputFormat::Quiet => {
                let ids: Vec<&str> = claims.iter().map(|c| c.id.as_str()).collect();
                Ok(ids.join("\n"))
            }
            OutputFormat::Table => {
                if claims.is_empty() {
                    return Ok(self.colorize("No claims found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "User", "Type", "Date", "Status", "Fraud"]);
                for claim in claims {
                    builder.push_record([
                        claim.id.to_string(),
                        claim.user_id.clone().unwrap_or_default(),
                        claim.claim_type.clone(),
                        claim.date_of_claim.clone(),
                        claim.claim_status.clone().unwrap_or_default(),
                        self.fraud_label(claim.fraud_status()),
                    ]);
                }

                Ok(format!(
                    "{}\nTotal: {}  Confirmed fraud: {}  Potential fraud: {}  Valid: {}",
                    self.table(builder),
                    summary.total,
                    summary.confirmed_fraud,
                    summary.potential_fraud,
                    summary.valid
                ))
            }
        }
    }

    /// Format users with the statistics over all users.
    pub fn format_users(&self, users: &[User], stats: &UserStats) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "users": users,
                "stats": stats,
            }))?),
            OutputFormat::Quiet => {
                let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
                Ok(ids.join("\n"))
            }
            OutputFormat::Table => {
                let totals = format!(
                    "Users: {}  Active: {}  Pending: {}  Claims: {}  Claims per user: {}",
                    stats.total_users,
                    stats.active_users,
                    stats.pending_users,
                    stats.total_claims,
                    stats.avg_claims_per_user
                );

                if users.is_empty() {
                    return Ok(format!("{}\n{}", self.colorize("No users found.", "yellow"), totals));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Email", "Role", "Status", "Claims"]);
                for user in users {
                    builder.push_record([
                        user.id.clone(),
                        user.full_name(),
                        user.email.clone(),
                        user.role.clone(),
                        user.status.to_string(),
                        user.insurance_claims_ids.len().to_string(),
                    ]);
                }

                Ok(format!("{}\n{}", self.table(builder), totals))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn fraud_label(&self, status: FraudStatus) -> String {
        match status {
            FraudStatus::ConfirmedFraud => self.colorize(status.label(), "red"),
            FraudStatus::PotentialFraud => self.colorize(status.label(), "yellow"),
            FraudStatus::Valid => self.colorize(status.label(), "green"),
        }
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
