//! ClaimGuard Gateway server
//!
//! Starts the dashboard gateway HTTP server.

use claimguard_gateway::{config::GatewayConfig, init_tracing, start_server, GatewayError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), GatewayError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        GatewayConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: claimguard-gateway --config <path-to-config.toml>");
        eprintln!();
        GatewayConfig::default_test_config()
    };

    init_tracing();
    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("ClaimGuard Gateway - Claims dashboard backend");
    println!();
    println!("USAGE:");
    println!("    claimguard-gateway --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    claimguard-gateway --config config/gateway.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 3000)");
    println!("    - api_url: Base URL of the accounts and claims API");
    println!("    - jwt_secret: Secret for verifying session tokens (optional)");
    println!("    - [vision]: prediction_url, prediction_key, timeout_secs (optional)");
    println!("    - [intake]: max_image_bytes, assessment_timeout_secs (optional)");
    println!("    - [interpreter]: decision thresholds (optional)");
    println!();
    println!("Set RUST_LOG to change the log level (default: info).");
}
