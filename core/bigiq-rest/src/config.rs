//! Connection settings for a BIG-IQ management endpoint.

use crate::error::{RestError, RestResult};
use serde::Deserialize;

/// Login provider used when none is configured.
pub const DEFAULT_AUTH_PROVIDER: &str = "local";

/// Default HTTPS port of the management interface.
pub const DEFAULT_SERVER_PORT: u16 = 443;

/// How to reach and authenticate against the BIG-IQ.
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    /// Hostname or address of the BIG-IQ.
    pub server: String,
    /// Management port.
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    /// Login user.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Whether TLS certificates must chain to a trusted root.
    #[serde(default = "default_validate_certs")]
    pub validate_certs: bool,
    /// Login provider name sent with the credentials.
    #[serde(default)]
    pub auth_provider: Option<String>,
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

fn default_validate_certs() -> bool {
    true
}

impl ProviderConfig {
    /// Creates a config with default port, certificate validation and provider.
    pub fn new(
        server: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            server_port: DEFAULT_SERVER_PORT,
            user: user.into(),
            password: password.into(),
            validate_certs: true,
            auth_provider: None,
        }
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> RestResult<()> {
        if self.server.trim().is_empty() {
            return Err(RestError::Config("server must be set".to_string()));
        }
        if self.user.is_empty() {
            return Err(RestError::Config("user must be set".to_string()));
        }
        if self.password.is_empty() {
            return Err(RestError::Config("password must be set".to_string()));
        }
        if self.server_port == 0 {
            return Err(RestError::Config("server_port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Base URL of the management API, e.g. `https://bigiq.example.com:443`.
    pub fn base_url(&self) -> String {
        format!("https://{}:{}", self.server, self.server_port)
    }

    /// Login provider, falling back to [`DEFAULT_AUTH_PROVIDER`].
    pub fn auth_provider(&self) -> &str {
        self.auth_provider
            .as_deref()
            .unwrap_or(DEFAULT_AUTH_PROVIDER)
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("server", &self.server)
            .field("server_port", &self.server_port)
            .field("user", &self.user)
            .field("password", &"********")
            .field("validate_certs", &self.validate_certs)
            .field("auth_provider", &self.auth_provider)
            .finish()
    }
}
