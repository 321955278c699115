use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::AccessToken;
use crate::supabase::SupabaseClients;
use shared_types::{AppError, AppErrorKind};

/// The backend rejected the refresh token itself, as opposed to being
/// unreachable. Only then is the stored session worthless.
fn refresh_was_refused(err: &AppError) -> bool {
    matches!(
        err.kind,
        AppErrorKind::BadRequest | AppErrorKind::Unauthorized | AppErrorKind::NotFound
    )
}

/// Permissive auth middleware that handles session cookies.
///
/// On each request:
/// 1. Puts the access token from cookies (or Bearer header) in extensions
/// 2. If it is missing, attempts a transparent refresh with the refresh cookie;
///    a refused refresh token clears both cookies, an outage leaves them alone
/// 3. Inserts a `CookieSlot` so server functions can schedule cookie changes
/// 4. After the handler runs, applies refreshed or scheduled cookies
///
/// Does NOT reject anonymous requests — the session check decides.
pub async fn auth_middleware(
    State(clients): State<SupabaseClients>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers().clone();
    let mut refreshed: Option<PendingCookieAction> = None;

    match cookies::extract_access_token(&headers) {
        Some(token) => {
            req.extensions_mut().insert(AccessToken(token));
        }
        None => {
            if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
                match clients.auth.refresh_session(&refresh_token).await {
                    Ok(tokens) => {
                        req.extensions_mut()
                            .insert(AccessToken(tokens.access_token.clone()));
                        refreshed = Some(PendingCookieAction::Set {
                            access_token: tokens.access_token,
                            refresh_token: tokens.refresh_token,
                            expires_in: tokens.expires_in,
                        });
                    }
                    Err(e) if refresh_was_refused(&e) => {
                        tracing::debug!(error = %e, "Refresh token refused, clearing session cookies");
                        refreshed = Some(PendingCookieAction::Clear);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Transparent refresh failed, keeping cookies for a retry");
                    }
                }
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    // A cookie action scheduled by the handler wins over the refresh result
    if let Some(action) = cookie_slot.take().or(refreshed) {
        match action {
            PendingCookieAction::Set {
                access_token,
                refresh_token,
                expires_in,
            } => {
                cookies::set_auth_cookies(
                    response.headers_mut(),
                    &access_token,
                    &refresh_token,
                    expires_in,
                );
            }
            PendingCookieAction::Clear => {
                cookies::clear_auth_cookies(response.headers_mut());
            }
        }
    }

    response
}
