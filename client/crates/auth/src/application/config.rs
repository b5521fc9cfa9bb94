//! Application Configuration
//!
//! Configuration for reaching the identity service.

use std::time::Duration;

use platform::config::{ConfigError, env_duration_secs, env_or, env_var};

/// Default identity service endpoint
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Auth application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Identity service base URL
    pub identity_base_url: String,
    /// Project API key; `None` selects the offline in-memory gateway
    pub api_key: Option<String>,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Redirect URI reported to the service for federated sign-in
    pub federated_request_uri: String,
    /// Provider id token used by the federated flow
    pub google_id_token: Option<String>,
    /// Id token from a previous run, used once at startup
    pub seed_id_token: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(10),
            federated_request_uri: "http://localhost".to_string(),
            google_id_token: None,
            seed_id_token: None,
        }
    }
}

impl AuthConfig {
    /// Load from `IDENTITY_*` and `GOOGLE_ID_TOKEN` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            identity_base_url: env_or("IDENTITY_BASE_URL", &defaults.identity_base_url)
                .trim_end_matches('/')
                .to_string(),
            api_key: env_var("IDENTITY_API_KEY"),
            request_timeout: env_duration_secs("IDENTITY_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout),
            federated_request_uri: env_or("IDENTITY_REQUEST_URI", &defaults.federated_request_uri),
            google_id_token: env_var("GOOGLE_ID_TOKEN"),
            seed_id_token: env_var("IDENTITY_ID_TOKEN"),
        })
    }

    /// Offline configuration (in-memory gateway)
    pub fn development() -> Self {
        Self::default()
    }

    /// Whether no identity service is configured
    pub fn is_offline(&self) -> bool {
        self.api_key.is_none()
    }
}
