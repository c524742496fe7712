//! `reqwest`-backed client for the BIG-IQ management API.
//!
//! Authenticates once per client with the token login endpoint and sends the
//! token on every request in the `X-F5-Auth-Token` header.

use crate::client::{RestClient, RestResponse};
use crate::config::ProviderConfig;
use crate::error::{RestError, RestResult};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Path of the token login endpoint.
pub const LOGIN_PATH: &str = "/mgmt/shared/authn/login";

/// Header carrying the session token.
pub const AUTH_HEADER: &str = "X-F5-Auth-Token";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: LoginToken,
}

#[derive(Debug, Deserialize)]
struct LoginToken {
    token: String,
}

/// Token-authenticated BIG-IQ client.
pub struct F5RestClient {
    config: ProviderConfig,
    base_url: String,
    client: Client,
    token: RwLock<Option<String>>,
}

impl F5RestClient {
    /// Creates a client for `https://{server}:{server_port}`.
    pub fn new(config: ProviderConfig) -> RestResult<Self> {
        let base_url = config.base_url();
        Self::with_base_url(config, base_url)
    }

    /// Creates a client against an explicit base URL (scheme, host and port).
    pub fn with_base_url(config: ProviderConfig, base_url: impl Into<String>) -> RestResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .danger_accept_invalid_certs(!config.validate_certs)
            .build()?;

        Ok(Self {
            config,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            token: RwLock::new(None),
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns whether a session token has been obtained.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Returns the cached token, logging in first if needed.
    async fn token(&self) -> RestResult<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let token = self.login().await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    async fn login(&self) -> RestResult<String> {
        debug!(
            server = %self.config.server,
            user = %self.config.user,
            provider = self.config.auth_provider(),
            "Logging in to BIG-IQ"
        );

        let body = json!({
            "username": self.config.user,
            "password": self.config.password,
            "loginProviderName": self.config.auth_provider(),
        });

        let response = self
            .client
            .post(format!("{}{}", self.base_url, LOGIN_PATH))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(RestError::AuthFailed(format!("{status}: {error}")));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| RestError::AuthFailed(format!("failed to parse login response: {e}")))?;

        info!("BIG-IQ authentication successful");
        Ok(login.token.token)
    }

    async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> RestResult<RestResponse> {
        let token = self.token().await?;
        debug!(%method, uri, "BIG-IQ request");

        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, uri))
            .header(AUTH_HEADER, token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        // DELETE and some error pages come back with an empty or HTML body.
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        debug!(status, uri, "BIG-IQ response");
        Ok(RestResponse::new(status, json))
    }
}

#[async_trait]
impl RestClient for F5RestClient {
    async fn get(&self, uri: &str) -> RestResult<RestResponse> {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: &Value) -> RestResult<RestResponse> {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> RestResult<RestResponse> {
        self.send(Method::DELETE, uri, None).await
    }
}
