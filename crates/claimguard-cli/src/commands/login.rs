//! Login command implementation.

use crate::cli::LoginArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use claimguard_domain::traits::AccountService;
use claimguard_sdk::SdkError;
use std::path::Path;

/// Execute the login command.
///
/// The token is written to the configuration file at `config_path`.
pub async fn execute_login<A>(
    args: LoginArgs,
    accounts: &A,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()>
where
    A: AccountService<Error = SdkError>,
{
    let token = accounts.login(&args.email, &args.password).await?;

    config.token = Some(token.as_str().to_string());
    config.save_to(config_path)?;

    println!(
        "{}",
        formatter.success(&format!("Signed in as {}", args.email))
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use claimguard_sdk::MockBackend;
    use tempfile::TempDir;

    fn args(password: &str) -> LoginArgs {
        LoginArgs {
            email: "agent@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let backend = MockBackend::new().with_account("agent@example.com", "pw", "tok-1");
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut config = Config::default();

        execute_login(args("pw"), &backend, &mut config, &path, &formatter)
            .await
            .unwrap();

        assert_eq!(config.token.as_deref(), Some("tok-1"));
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.token.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_config_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let backend = MockBackend::new().with_account("agent@example.com", "pw", "tok-1");
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut config = Config::default();

        let result = execute_login(args("nope"), &backend, &mut config, &path, &formatter).await;

        assert!(matches!(result, Err(CliError::Sdk(SdkError::Unauthorized))));
        assert!(config.token.is_none());
        assert!(!path.exists());
    }
}
