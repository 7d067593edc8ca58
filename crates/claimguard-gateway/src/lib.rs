//! ClaimGuard Gateway
//!
//! HTTP front for the claims dashboard. Gates dashboard routes on the
//! session cookie, proxies account and claim operations to the remote API,
//! and validates claim photos through the image classifier and the
//! Fraud-Signal Interpreter.

#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod gate;
pub mod handlers;
pub mod session;

use claimguard_intake::ClaimIntake;
use claimguard_interpreter::FraudInterpreter;
use claimguard_sdk::ApiClient;
use classifier::ConfiguredClassifier;
use config::GatewayConfig;
use handlers::{create_router, AppState};
use session::TokenDecoder;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Gateway error
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// A collaborator could not be constructed
    #[error("Setup error: {0}")]
    Setup(String),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the log subscriber, honouring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignored when a subscriber is already installed (tests, embedding)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build the application state for a configuration
pub fn build_state(
    config: &GatewayConfig,
) -> Result<AppState<ConfiguredClassifier, ApiClient>, GatewayError> {
    let backend = Arc::new(
        ApiClient::new(&config.api_url).map_err(|e| GatewayError::Setup(e.to_string()))?,
    );

    let classifier = ConfiguredClassifier::from_config(config.vision.clone())
        .map_err(|e| GatewayError::Setup(e.to_string()))?;
    let classifier_enabled = classifier.is_enabled();

    let interpreter = FraudInterpreter::new(config.interpreter.clone())
        .map_err(|e| GatewayError::Setup(e.to_string()))?;

    let intake = ClaimIntake::new(
        Arc::new(classifier),
        Arc::clone(&backend),
        interpreter,
        config.intake.clone(),
    )
    .map_err(|e| GatewayError::Setup(e.to_string()))?;

    Ok(AppState {
        backend,
        intake,
        decoder: Arc::new(TokenDecoder::from_secret(config.jwt_secret.as_deref())),
        classifier_enabled,
    })
}

/// Start the gateway HTTP server
///
/// Builds the remote API client, classifier and intake workflow from the
/// configuration and serves until the process is stopped.
pub async fn start_server(config: GatewayConfig) -> Result<(), GatewayError> {
    info!("Starting ClaimGuard gateway");
    info!("Bind address: {}", config.bind_addr());
    info!("Remote API: {}", config.api_url);

    if config.jwt_secret.is_none() {
        warn!("No jwt_secret configured; session tokens are decoded without signature checks");
    }
    if config.vision.is_none() {
        warn!("No [vision] section; claim images will not be validated");
    }

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Gateway listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| GatewayError::Server(e.to_string()))?;

    Ok(())
}
