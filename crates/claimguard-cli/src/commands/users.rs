//! Users command implementation.

use crate::cli::UsersArgs;
use crate::error::Result;
use crate::output::Formatter;
use claimguard_domain::traits::{ClaimRepository, UserDirectory};
use claimguard_domain::{AuthToken, User, UserFilter, UserStats};
use claimguard_sdk::SdkError;

/// Execute the users command.
pub async fn execute_users<B>(
    args: UsersArgs,
    backend: &B,
    auth: &AuthToken,
    formatter: &Formatter,
) -> Result<()>
where
    B: UserDirectory<Error = SdkError> + ClaimRepository<Error = SdkError>,
{
    let filter = UserFilter {
        status: args.status.status(),
        query: args.query,
    };
    let (users, stats) = fetch_users(backend, auth, &filter).await?;

    println!("{}", formatter.format_users(&users, &stats)?);

    Ok(())
}

/// Users passing `filter`, with statistics over every user.
pub async fn fetch_users<B>(
    backend: &B,
    auth: &AuthToken,
    filter: &UserFilter,
) -> Result<(Vec<User>, UserStats)>
where
    B: UserDirectory<Error = SdkError> + ClaimRepository<Error = SdkError>,
{
    let (users, claims) = tokio::try_join!(backend.list_users(auth), backend.list_claims(auth))?;

    let stats = UserStats::compute(&users, claims.len());
    let users = filter.apply(&users).into_iter().cloned().collect();

    Ok((users, stats))
}
