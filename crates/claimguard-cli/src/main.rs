//! ClaimGuard CLI - Command-line client for the claims dashboard.

use claimguard_cli::commands;
use claimguard_cli::{Cli, Command, Config, Formatter};
use claimguard_sdk::ApiClient;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> claimguard_cli::Result<()> {
    let cli = Cli::parse();

    // Quiet unless RUST_LOG asks otherwise; stdout carries command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Interpret(args) => {
            commands::execute_interpret(args, &config, &formatter)?;
        }
        Command::Classify(args) => {
            commands::execute_classify(args, &config, &formatter).await?;
        }
        Command::Login(args) => {
            let client = ApiClient::new(&config.api_url)?;
            commands::execute_login(args, &client, &mut config, &config_path, &formatter).await?;
        }
        Command::Claims(args) => {
            let auth = config.auth_token()?;
            let client = ApiClient::new(&config.api_url)?;
            commands::execute_claims(args, &client, &auth, &formatter).await?;
        }
        Command::Users(args) => {
            let auth = config.auth_token()?;
            let client = ApiClient::new(&config.api_url)?;
            commands::execute_users(args, &client, &auth, &formatter).await?;
        }
    }

    Ok(())
}
