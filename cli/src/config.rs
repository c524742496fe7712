//! Settings assembled from the command line, the environment and an
//! optional TOML file.
//!
//! Command-line flags and `F5_*` variables win over the file.

use crate::Args;
use anyhow::{Context, Result};
use bigiq_regkey::{AssignmentRequest, RequestParams};
use bigiq_rest::{DEFAULT_SERVER_PORT, ProviderConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Provider fields as they appear in the file, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderParams {
    pub server: Option<String>,
    pub server_port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub validate_certs: Option<bool>,
    pub auth_provider: Option<String>,
}

impl ProviderParams {
    /// Fills every unset field from `other`.
    #[must_use]
    pub fn or(self, other: ProviderParams) -> Self {
        Self {
            server: self.server.or(other.server),
            server_port: self.server_port.or(other.server_port),
            user: self.user.or(other.user),
            password: self.password.or(other.password),
            validate_certs: self.validate_certs.or(other.validate_certs),
            auth_provider: self.auth_provider.or(other.auth_provider),
        }
    }

    /// Applies defaults and validates.
    pub fn into_config(self) -> Result<ProviderConfig> {
        let config = ProviderConfig {
            server: self.server.unwrap_or_default(),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
            user: self.user.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            validate_certs: self.validate_certs.unwrap_or(true),
            auth_provider: self.auth_provider,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Contents of a `--config` file.
///
/// ```toml
/// [provider]
/// server = "bigiq.example.com"
/// user = "admin"
/// password = "secret"
///
/// [assignment]
/// pool = "my-regkey-pool"
/// key = "XXXX-XXXX-XXXX-XXXX-XXXX"
/// device = "1.1.1.1"
/// managed = false
/// device_username = "admin"
/// device_password = "secret"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub provider: ProviderParams,
    #[serde(default)]
    pub assignment: RequestParams,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Everything one run needs, validated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderConfig,
    pub request: AssignmentRequest,
    pub check_mode: bool,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let provider = args.provider_params().or(file.provider).into_config()?;
        let request = AssignmentRequest::new(args.request_params().or(file.assignment))?;

        Ok(Self {
            provider,
            request,
            check_mode: args.check,
        })
    }
}
