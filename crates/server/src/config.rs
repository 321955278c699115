use shared_types::{AppConfig, AppError, FeatureFlags, SessionSettings};
use std::sync::OnceLock;
use std::time::Duration;

use crate::supabase::{SupabaseClient, SupabaseClients};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static CLIENTS: OnceLock<Option<SupabaseClients>> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` and store it in the global `OnceLock`. Safe to call
/// multiple times — only the first call has effect.
///
/// If the file is missing or unparseable, every setting takes its default.
pub fn load_config() {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config: AppConfig = toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = CONFIG_PATH, error = %e, "Failed to parse config, using defaults");
                AppConfig::default()
            });
            tracing::info!(features = ?config.features, session = ?config.session, "Loaded config");
            config
        }
        Err(e) => {
            tracing::info!(path = CONFIG_PATH, error = %e, "Config file not found, using defaults");
            AppConfig::default()
        }
    });
}

/// Loaded config, or defaults if `load_config()` hasn't run yet.
pub fn app_config() -> &'static AppConfig {
    static DEFAULT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(AppConfig::default))
}

pub fn feature_flags() -> &'static FeatureFlags {
    &app_config().features
}

pub fn session_settings() -> &'static SessionSettings {
    &app_config().session
}

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub service_role_key: String,
    /// Schema holding the portal's tables, sent as `Accept-Profile`.
    pub schema: String,
    pub timeout: Duration,
}

impl SupabaseConfig {
    /// Read backend settings from the environment (`.env` honoured).
    ///
    /// Required: `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `SUPABASE_SERVICE_ROLE_KEY`.
    /// Optional: `SUPABASE_SCHEMA` (default `public`).
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let required = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::internal(format!("{name} must be set")))
        };

        Ok(Self {
            url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            anon_key: required("SUPABASE_ANON_KEY")?,
            service_role_key: required("SUPABASE_SERVICE_ROLE_KEY")?,
            schema: std::env::var("SUPABASE_SCHEMA")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "public".to_string()),
            timeout: Duration::from_secs(session_settings().timeout_secs),
        })
    }
}

/// Process-wide backend clients, built on first use.
///
/// `None` when the environment is incomplete; the error is logged once and
/// every session check then resolves to anonymous.
pub fn supabase() -> Option<&'static SupabaseClients> {
    CLIENTS
        .get_or_init(|| {
            let built = SupabaseConfig::from_env().and_then(|cfg| {
                Ok(SupabaseClients {
                    auth: SupabaseClient::anon(&cfg)?,
                    data: SupabaseClient::service_role(&cfg)?,
                })
            });
            match built {
                Ok(clients) => Some(clients),
                Err(e) => {
                    tracing::error!(error = %e, "Backend client not configured");
                    None
                }
            }
        })
        .as_ref()
}
