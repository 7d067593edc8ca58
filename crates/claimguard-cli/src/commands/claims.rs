//! Claims command implementation.

use crate::cli::ClaimsArgs;
use crate::error::Result;
use crate::output::Formatter;
use claimguard_domain::traits::ClaimRepository;
use claimguard_domain::{claims_for_user, AuthToken, Claim, ClaimSummary};
use claimguard_sdk::SdkError;

/// Execute the claims command.
pub async fn execute_claims<R>(
    args: ClaimsArgs,
    repository: &R,
    auth: &AuthToken,
    formatter: &Formatter,
) -> Result<()>
where
    R: ClaimRepository<Error = SdkError>,
{
    let claims = fetch_claims(repository, auth, args.user.as_deref()).await?;
    let summary = ClaimSummary::from_claims(&claims);

    println!("{}", formatter.format_claims(&claims, &summary)?);

    Ok(())
}

/// Claims visible to the caller, optionally restricted to one user.
pub async fn fetch_claims<R>(
    repository: &R,
    auth: &AuthToken,
    user_id: Option<&str>,
) -> Result<Vec<Claim>>
where
    R: ClaimRepository<Error = SdkError>,
{
    let all = repository.list_claims(auth).await?;

    Ok(match user_id {
        Some(user_id) => claims_for_user(&all, user_id).into_iter().cloned().collect(),
        None => all,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use claimguard_domain::ClaimId;
    use claimguard_sdk::MockBackend;

    fn claim(id: &str, user_id: &str) -> Claim {
        Claim {
            id: ClaimId::from(id),
            user_id: Some(user_id.to_string()),
            claim_type: "theft".to_string(),
            is_potential_fraud: false,
            is_confirmed_fraud: false,
            fraud_subtype: None,
            description: None,
            date_of_claim: "2024-05-01".to_string(),
            claim_status: None,
            created_at: "2024-05-01".to_string(),
            updated_at: "2024-05-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_claims_for_user() {
        let backend = MockBackend::new()
            .with_claim(claim("c1", "u1"))
            .with_claim(claim("c2", "u2"));
        let auth = AuthToken::new("tok");

        let all = fetch_claims(&backend, &auth, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let mine = fetch_claims(&backend, &auth, Some("u2")).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id.as_str(), "c2");
    }

    #[tokio::test]
    async fn test_revoked_session() {
        let backend = MockBackend::new();
        backend.revoke("tok");

        let result = fetch_claims(&backend, &AuthToken::new("tok"), None).await;
        assert!(matches!(result, Err(CliError::Sdk(SdkError::Unauthorized))));
    }
}
