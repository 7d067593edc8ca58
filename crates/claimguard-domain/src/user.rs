//! User accounts held by the accounts service

use crate::verdict::format_tenths;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Approved and able to sign in
    Active,

    /// Awaiting administrator approval
    Pending,

    /// Disabled
    Inactive,
}

impl UserStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Pending => "pending",
            UserStatus::Inactive => "inactive",
        }
    }

    /// Parse a status (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(UserStatus::Active),
            "pending" => Some(UserStatus::Pending),
            "inactive" => Some(UserStatus::Inactive),
            _ => None,
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid user status: {}", s))
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account as listed by the accounts service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// National or policy identification number
    #[serde(default)]
    pub unique_id_number: Option<String>,

    /// Login email
    pub email: String,

    /// Role name as stored by the accounts service (e.g. `Admin`)
    #[serde(default)]
    pub role: String,

    /// Account creation time (ISO 8601)
    #[serde(default)]
    pub created_at: String,

    /// Last sign-in time (ISO 8601)
    #[serde(default)]
    pub last_login: Option<String>,

    /// Approval status
    pub status: UserStatus,

    /// Claims filed by this user
    #[serde(default)]
    pub insurance_claims_ids: Vec<String>,
}

impl User {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Filter applied to the user list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Only users with this status
    pub status: Option<UserStatus>,

    /// Case-insensitive match against first name, last name or email
    pub query: Option<String>,
}

impl UserFilter {
    /// Whether `user` passes the filter
    pub fn matches(&self, user: &User) -> bool {
        if let Some(status) = self.status {
            if user.status != status {
                return false;
            }
        }

        match self.query.as_deref() {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                user.first_name.to_lowercase().contains(&query)
                    || user.last_name.to_lowercase().contains(&query)
                    || user.email.to_lowercase().contains(&query)
            }
        }
    }

    /// Users passing the filter, in input order
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|user| self.matches(user)).collect()
    }
}

/// Aggregate figures shown above the user list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Number of users
    pub total_users: usize,

    /// Users with status `active`
    pub active_users: usize,

    /// Users with status `pending`
    pub pending_users: usize,

    /// Number of claims across all users
    pub total_claims: usize,

    /// Claims per user with one decimal, `"0"` when there are no users
    pub avg_claims_per_user: String,
}

impl UserStats {
    /// Compute statistics over `users` and a claim count
    pub fn compute(users: &[User], total_claims: usize) -> Self {
        let count = |status| users.iter().filter(|u| u.status == status).count();

        let avg_claims_per_user = if users.is_empty() {
            "0".to_string()
        } else {
            format_tenths(total_claims as f64 / users.len() as f64)
        };

        Self {
            total_users: users.len(),
            active_users: count(UserStatus::Active),
            pending_users: count(UserStatus::Pending),
            total_claims,
            avg_claims_per_user,
        }
    }
}

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier
    pub id: String,

    /// Login email
    pub email: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Contact phone number
    #[serde(default)]
    pub phone_number: Option<String>,

    /// Postal address
    #[serde(default)]
    pub address: Option<String>,

    /// Account creation time (ISO 8601)
    #[serde(default)]
    pub created_at: String,

    /// Last update time (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

/// Editable profile fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Profile being edited
    pub id: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Contact phone number (empty when unset)
    #[serde(default)]
    pub phone_number: String,

    /// Postal address (empty when unset)
    #[serde(default)]
    pub address: String,
}
