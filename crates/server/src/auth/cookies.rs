use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

pub const PORTAL_ACCESS: &str = "portal_access";
pub const PORTAL_REFRESH: &str = "portal_refresh";

/// Refresh cookie lifetime.
const REFRESH_MAX_AGE_DAYS: i64 = 30;

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

/// `None` when the value cannot go into a header (control characters in a
/// token); the failure is logged and the cookie is not sent.
fn build_cookie(
    name: &'static str,
    value: &str,
    max_age: cookie::time::Duration,
) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((name, value.to_string()))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    match HeaderValue::from_str(&cookie.build().to_string()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(cookie = name, error = %e, "Cookie value is not a valid header, skipping");
            None
        }
    }
}

/// Set-Cookie value for the access token, expiring with the token.
pub fn build_access_cookie(token: &str, max_age_secs: i64) -> Option<HeaderValue> {
    build_cookie(PORTAL_ACCESS, token, cookie::time::Duration::seconds(max_age_secs))
}

/// Set-Cookie value for the refresh token.
pub fn build_refresh_cookie(token: &str) -> Option<HeaderValue> {
    build_cookie(
        PORTAL_REFRESH,
        token,
        cookie::time::Duration::days(REFRESH_MAX_AGE_DAYS),
    )
}

/// Set-Cookie values that clear both auth cookies.
pub fn build_clear_cookies() -> impl Iterator<Item = HeaderValue> {
    [PORTAL_ACCESS, PORTAL_REFRESH]
        .into_iter()
        .filter_map(|name| build_cookie(name, "", cookie::time::Duration::ZERO))
}

/// Extract the access token from cookies (preferred) or Bearer header (fallback).
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, PORTAL_ACCESS) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, PORTAL_REFRESH)
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

/// Append both auth cookies to a response. A cookie whose value cannot be
/// encoded is left out.
pub fn set_auth_cookies(
    headers: &mut HeaderMap,
    access_token: &str,
    refresh_token: &str,
    access_max_age_secs: i64,
) {
    let cookies = [
        build_access_cookie(access_token, access_max_age_secs),
        build_refresh_cookie(refresh_token),
    ];
    for value in cookies.into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    for value in build_clear_cookies() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Pending cookie action to be picked up by the auth middleware.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set {
        access_token: String,
        refresh_token: String,
        expires_in: i64,
    },
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the
/// middleware. Stored in request extensions.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        match parts.extensions.get::<CookieSlot>() {
            Some(slot) => slot.put(action),
            None => tracing::warn!("No cookie slot on request, auth middleware not installed"),
        }
    }
}

/// Schedule auth cookies to be set by the middleware.
pub fn schedule_auth_cookies(access_token: &str, refresh_token: &str, expires_in: i64) {
    schedule(PendingCookieAction::Set {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
        expires_in,
    });
}

/// Schedule auth cookies to be cleared by the middleware.
pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}
