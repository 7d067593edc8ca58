//! CLI command definitions and argument parsing.

use claimguard_domain::UserStatus;
use clap::{Parser, Subcommand};

/// ClaimGuard CLI - Fraud signals and claim data from the command line.
#[derive(Debug, Parser)]
#[command(name = "claimguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CLAIMGUARD_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdicts and IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interpret classifier output into a fraud verdict
    Interpret(InterpretArgs),

    /// Classify an image and interpret the result
    Classify(ClassifyArgs),

    /// Sign in and store the session token
    Login(LoginArgs),

    /// List claims with their fraud status
    Claims(ClaimsArgs),

    /// List users with statistics
    Users(UsersArgs),
}

/// Arguments for the interpret command.
#[derive(Debug, Parser)]
pub struct InterpretArgs {
    /// JSON file holding a classification result or a bare prediction array
    pub file: Option<String>,

    /// Read the JSON from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Image file to classify
    pub image: String,
}

/// Arguments for the login command.
#[derive(Debug, Parser)]
pub struct LoginArgs {
    /// Login email
    #[arg(short, long)]
    pub email: String,

    /// Password
    #[arg(short, long, env = "CLAIMGUARD_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the claims command.
#[derive(Debug, Parser)]
pub struct ClaimsArgs {
    /// Only claims of this user
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the users command.
#[derive(Debug, Parser)]
pub struct UsersArgs {
    /// Filter by status
    #[arg(short, long, value_enum, default_value = "all")]
    pub status: StatusArg,

    /// Match against names and email
    #[arg(short, long)]
    pub query: Option<String>,
}

/// User status argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusArg {
    /// Every user
    All,
    /// Approved users
    Active,
    /// Users awaiting approval
    Pending,
    /// Disabled users
    Inactive,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl StatusArg {
    /// Status to filter on, `None` for all
    pub fn status(self) -> Option<UserStatus> {
        match self {
            StatusArg::All => None,
            StatusArg::Active => Some(UserStatus::Active),
            StatusArg::Pending => Some(UserStatus::Pending),
            StatusArg::Inactive => Some(UserStatus::Inactive),
        }
    }
}
