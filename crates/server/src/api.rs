use dioxus::prelude::*;
use shared_types::{CurrentUser, FeatureFlags};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

// ── Auth helpers for server functions ──────────────────

/// Access token for the current request.
/// Prefers the token the auth middleware resolved (possibly refreshed),
/// falls back to parsing the cookie/Bearer header directly.
#[cfg(feature = "server")]
fn request_access_token() -> Option<String> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(token) = parts.extensions.get::<crate::auth::AccessToken>() {
        return Some(token.0.clone());
    }
    crate::auth::cookies::extract_access_token(&parts.headers)
}

// ── Server functions ───────────────────────────────────

/// Get the current feature flags. No auth required — flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Session check. `None` means anonymous.
///
/// Never fails: backend errors are logged and reported as anonymous so
/// the client falls through to the login entry point.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<CurrentUser>, ServerFnError> {
    let Some(clients) = crate::config::supabase() else {
        return Ok(None);
    };
    let token = request_access_token();
    Ok(crate::session::resolve_current_user(clients, token.as_deref()).await)
}

/// Sign in with e-mail and password. Sets HTTP-only session cookies on success.
///
/// An unconfirmed address fails with `EMAIL_NOT_VERIFIED` so the login page
/// can route to the verification notice.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<CurrentUser, ServerFnError> {
    use shared_types::{AppError, LoginRequest};

    let req = LoginRequest {
        email: email.trim().to_string(),
        password,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let clients = crate::config::supabase().ok_or_else(|| {
        AppError::service_unavailable("Sign-in is not available").into_server_fn_error()
    })?;

    let tokens = clients
        .auth
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    let user = crate::session::load_current_user(clients, &tokens.access_token)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    crate::auth::cookies::schedule_auth_cookies(
        &tokens.access_token,
        &tokens.refresh_token,
        tokens.expires_in,
    );

    tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
    Ok(user)
}

/// Sign out: revoke the backend session (best effort) and clear cookies.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    if let (Some(clients), Some(token)) = (crate::config::supabase(), request_access_token()) {
        if let Err(e) = clients.auth.sign_out(&token).await {
            tracing::warn!(error = %e, "Failed to revoke backend session");
        }
    }

    crate::auth::cookies::schedule_clear_cookies();
    Ok(())
}
