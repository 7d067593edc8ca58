//! ClaimGuard Rust SDK
//!
//! Client library for the accounts and claims services behind the dashboard.
//!
//! `ApiClient` talks to the remote REST API; `MockBackend` keeps the same
//! data in memory for tests and offline use. Both implement the service
//! traits from `claimguard-domain`.
//!
//! # Example
//!
//! ```no_run
//! use claimguard_domain::traits::{AccountService, ClaimRepository};
//! use claimguard_sdk::ApiClient;
//!
//! # async fn run() -> Result<(), claimguard_sdk::SdkError> {
//! let client = ApiClient::new("http://localhost:5000")?;
//! let token = client.login("agent@example.com", "secret").await?;
//! let claims = client.list_claims(&token).await?;
//! println!("{} claims", claims.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod mock;
mod session;

pub use client::{ApiClient, DEFAULT_TIMEOUT_SECS};
pub use error::SdkError;
pub use mock::MockBackend;
