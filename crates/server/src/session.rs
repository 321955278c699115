use shared_types::{AppError, AppErrorKind, CurrentUser};

use crate::supabase::SupabaseClients;

/// Resolve the signed-in user for an access token.
///
/// Fails soft: a missing token, an expired session and a backend outage all
/// come back as `None`, so the caller shows the public entry point. Only
/// outages are logged at `warn`.
pub async fn resolve_current_user(
    clients: &SupabaseClients,
    access_token: Option<&str>,
) -> Option<CurrentUser> {
    let token = access_token.filter(|t| !t.is_empty())?;

    match load_current_user(clients, token).await {
        Ok(user) => Some(user),
        Err(err) if err.kind == AppErrorKind::Unauthorized => {
            tracing::debug!(error = %err, "Session token rejected, treating as anonymous");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "Session check failed, treating as anonymous");
            None
        }
    }
}

/// Account lookup followed by the profile read.
///
/// An account without a profile row is still signed in, with no role, so
/// every role guard sends it to the fallback page.
pub async fn load_current_user(
    clients: &SupabaseClients,
    access_token: &str,
) -> Result<CurrentUser, AppError> {
    let account = clients.auth.get_user(access_token).await?;
    let profile = clients.data.fetch_profile(account.id).await?;

    Ok(profile.unwrap_or_else(|| {
        tracing::info!(user_id = %account.id, "Account has no profile row");
        CurrentUser::new(account.id, account.email.unwrap_or_default(), "")
    }))
}
