//! Command-line front end for BIG-IQ regkey license assignment.

mod config;

pub use config::{FileConfig, ProviderParams, Settings};

use anyhow::Result;
use bigiq_regkey::{AssignmentManager, AssignmentOutcome, DesiredState, RequestParams};
use bigiq_rest::{F5RestClient, RestClient};
use clap::Parser;
use serde_json::{Value, json};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bigiq-regkey")]
#[command(about = "Assign or revoke a BIG-IQ regkey pool license on a BIG-IP")]
pub struct Args {
    /// TOML file with [provider] and [assignment] tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// BIG-IQ host
    #[arg(long, env = "F5_SERVER")]
    pub server: Option<String>,

    /// BIG-IQ management port [default: 443]
    #[arg(long, env = "F5_SERVER_PORT")]
    pub server_port: Option<u16>,

    /// BIG-IQ user
    #[arg(long, env = "F5_USER")]
    pub user: Option<String>,

    /// BIG-IQ password
    #[arg(long, env = "F5_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Verify the BIG-IQ TLS certificate [default: true]
    #[arg(long, env = "F5_VALIDATE_CERTS")]
    pub validate_certs: Option<bool>,

    /// Login provider [default: local]
    #[arg(long, env = "F5_AUTH_PROVIDER")]
    pub auth_provider: Option<String>,

    /// Regkey pool name
    #[arg(long)]
    pub pool: Option<String>,

    /// Registration key to assign from the pool
    #[arg(long)]
    pub key: Option<String>,

    /// Device address, hostname, or BIG-IQ machine UUID
    #[arg(long)]
    pub device: Option<String>,

    /// Whether BIG-IQ already manages the device
    #[arg(long)]
    pub managed: Option<bool>,

    /// HTTPS port of an unmanaged device [default: 443]
    #[arg(long)]
    pub device_port: Option<u16>,

    /// User BIG-IQ logs in to an unmanaged device with
    #[arg(long)]
    pub device_username: Option<String>,

    /// Password for --device-username
    #[arg(long)]
    pub device_password: Option<String>,

    /// present or absent [default: present]
    #[arg(long, value_parser = parse_state)]
    pub state: Option<DesiredState>,

    /// Report what would change without changing it
    #[arg(long)]
    pub check: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn provider_params(&self) -> ProviderParams {
        ProviderParams {
            server: self.server.clone(),
            server_port: self.server_port,
            user: self.user.clone(),
            password: self.password.clone(),
            validate_certs: self.validate_certs,
            auth_provider: self.auth_provider.clone(),
        }
    }

    pub fn request_params(&self) -> RequestParams {
        RequestParams {
            pool: self.pool.clone(),
            key: self.key.clone(),
            device: self.device.clone(),
            managed: self.managed,
            device_port: self.device_port,
            device_username: self.device_username.clone(),
            device_password: self.device_password.clone(),
            state: self.state,
        }
    }
}

fn parse_state(s: &str) -> Result<DesiredState, String> {
    match s {
        "present" => Ok(DesiredState::Present),
        "absent" => Ok(DesiredState::Absent),
        other => Err(format!("expected 'present' or 'absent', got '{other}'")),
    }
}

/// Runs the assignment against the BIG-IQ described by `settings`.
pub async fn run(settings: &Settings) -> Result<AssignmentOutcome> {
    let client = F5RestClient::new(settings.provider.clone())?;
    run_with(&client, settings).await
}

/// Runs the assignment over an existing client.
pub async fn run_with<C: RestClient + ?Sized>(
    client: &C,
    settings: &Settings,
) -> Result<AssignmentOutcome> {
    let outcome = AssignmentManager::new(client, &settings.request)
        .with_check_mode(settings.check_mode)
        .exec()
        .await?;
    Ok(outcome)
}

/// JSON printed when a run fails.
pub fn failure_result(err: &anyhow::Error) -> Value {
    json!({
        "failed": true,
        "changed": false,
        "msg": format!("{err:#}"),
    })
}
