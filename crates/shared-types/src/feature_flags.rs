use serde::{Deserialize, Serialize};

/// Feature flags controlling optional parts of the portal.
///
/// Loaded from `config.toml` at server startup and exposed to clients
/// via a server function. Every field defaults to `false` so that a
/// missing or incomplete config file disables all optional features.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Show the top progress bar while the session check is in flight.
    #[serde(default)]
    pub nav_progress: bool,
    /// Expose `/teacher/dashboard`.
    #[serde(default)]
    pub teacher_portal: bool,
    /// Per-request HTTP trace spans on the server.
    #[serde(default)]
    pub request_logging: bool,
}

/// Session check settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    /// Upper bound on one backend round-trip during the session check.
    /// A check that runs out of time resolves to anonymous.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub session: SessionSettings,
}
