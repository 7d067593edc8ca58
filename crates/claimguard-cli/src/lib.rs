//! ClaimGuard CLI library.
//!
//! Configuration, command execution and output formatting for the
//! `claimguard` command-line client: offline verdicts from classifier
//! output, live image classification, and read access to claims and users.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
