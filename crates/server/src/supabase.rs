//! Thin client for the hosted Supabase backend (GoTrue auth + PostgREST).

use serde::Deserialize;
use shared_types::{AppError, CurrentUser};
use uuid::Uuid;

use crate::config::SupabaseConfig;
use crate::error_convert::{status_to_app_error, ReqwestErrorExt};

/// Columns of the `users` profile table the portal reads.
const PROFILE_COLUMNS: &str = "id,name,type";

/// HTTP client bound to one API key and schema.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    schema: String,
}

/// The two clients the server works with.
#[derive(Debug, Clone)]
pub struct SupabaseClients {
    /// Anon key: sign-in, token refresh and user lookups for a caller's token.
    pub auth: SupabaseClient,
    /// Service-role key: profile reads in the portal schema.
    pub data: SupabaseClient,
}

/// Token pair returned by a successful sign-in or refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    pub user: AuthAccount,
}

fn default_expires_in() -> i64 {
    3600
}

/// The auth-side account record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthAccount {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

/// GoTrue error body. Older deployments send `error`/`error_description`,
/// newer ones `error_code`/`msg`.
#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl GoTrueError {
    fn is_email_not_confirmed(&self) -> bool {
        self.error_code.as_deref() == Some("email_not_confirmed")
            || [&self.error_description, &self.msg]
                .into_iter()
                .flatten()
                .any(|m| m.eq_ignore_ascii_case("email not confirmed"))
    }
}

impl SupabaseClient {
    /// Client using the public anon key against the `public` schema.
    pub fn anon(config: &SupabaseConfig) -> Result<Self, AppError> {
        Self::build(config, &config.anon_key, "public")
    }

    /// Client using the service-role key against the configured schema.
    pub fn service_role(config: &SupabaseConfig) -> Result<Self, AppError> {
        Self::build(config, &config.service_role_key, &config.schema)
    }

    fn build(config: &SupabaseConfig, api_key: &str, schema: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            schema: schema.to_string(),
        })
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange e-mail and password for a session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, AppError> {
        let resp = self
            .http
            .post(self.endpoint("/auth/v1/token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        let status = resp.status();
        if status.is_success() {
            return resp.json().await.map_err(|e| e.into_app_error());
        }

        let body: GoTrueError = resp.json().await.unwrap_or_default();
        if body.is_email_not_confirmed() {
            return Err(AppError::email_not_verified());
        }
        if status.is_server_error() {
            return Err(status_to_app_error(status, "auth"));
        }
        Err(AppError::unauthorized("Invalid email or password"))
    }

    /// Trade a refresh token for a new token pair.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthTokens, AppError> {
        let resp = self
            .http
            .post(self.endpoint("/auth/v1/token?grant_type=refresh_token"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status_to_app_error(status, "auth"));
        }
        resp.json().await.map_err(|e| e.into_app_error())
    }

    /// Look up the account behind an access token.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthAccount, AppError> {
        let resp = self
            .http
            .get(self.endpoint("/auth/v1/user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status_to_app_error(status, "auth"));
        }
        resp.json().await.map_err(|e| e.into_app_error())
    }

    /// Load the profile row for an account. `None` if there is no row.
    pub async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<CurrentUser>, AppError> {
        let id_filter = format!("eq.{user_id}");
        let url = self.endpoint(&format!(
            "/rest/v1/users?id={}&select={}&limit=1",
            urlencoding::encode(&id_filter),
            urlencoding::encode(PROFILE_COLUMNS),
        ));

        let resp = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept-Profile", &self.schema)
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status_to_app_error(status, "data"));
        }
        let rows: Vec<CurrentUser> = resp.json().await.map_err(|e| e.into_app_error())?;
        Ok(rows.into_iter().next())
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let resp = self
            .http
            .post(self.endpoint("/auth/v1/logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(status_to_app_error(status, "auth"))
        }
    }

    /// Auth service liveness.
    pub async fn health(&self) -> Result<(), AppError> {
        let resp = self
            .http
            .get(self.endpoint("/auth/v1/health"))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| e.into_app_error())?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(status_to_app_error(status, "auth"))
        }
    }
}
