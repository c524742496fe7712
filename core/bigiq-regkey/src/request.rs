//! The assignment request and its validation.

use crate::device::DeviceKind;
use crate::error::{RegkeyError, RegkeyResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Port used to reach an unmanaged device when none is given.
pub const DEFAULT_DEVICE_PORT: u16 = 443;

/// Whether the license should end up assigned or revoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    #[default]
    Present,
    Absent,
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("present"),
            Self::Absent => f.write_str("absent"),
        }
    }
}

/// Unvalidated parameters, as read from a config file or the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestParams {
    pub pool: Option<String>,
    pub key: Option<String>,
    pub device: Option<String>,
    pub managed: Option<bool>,
    pub device_port: Option<u16>,
    pub device_username: Option<String>,
    pub device_password: Option<String>,
    pub state: Option<DesiredState>,
}

impl RequestParams {
    /// Fills every unset field from `other`.
    #[must_use]
    pub fn or(self, other: RequestParams) -> Self {
        Self {
            pool: self.pool.or(other.pool),
            key: self.key.or(other.key),
            device: self.device.or(other.device),
            managed: self.managed.or(other.managed),
            device_port: self.device_port.or(other.device_port),
            device_username: self.device_username.or(other.device_username),
            device_password: self.device_password.or(other.device_password),
            state: self.state.or(other.state),
        }
    }
}

/// A validated, immutable license assignment request.
#[derive(Clone)]
pub struct AssignmentRequest {
    pool: String,
    key: String,
    device: String,
    device_kind: DeviceKind,
    managed: Option<bool>,
    device_port: u16,
    device_username: Option<String>,
    device_password: Option<String>,
    state: DesiredState,
}

impl AssignmentRequest {
    /// Validates `params` and applies defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RegkeyError::InvalidRequest`] when a required parameter is
    /// missing, or [`RegkeyError::UnknownDeviceFormat`] for a blank device.
    pub fn new(params: RequestParams) -> RegkeyResult<Self> {
        let pool = required("pool", params.pool)?;
        let key = required("key", params.key)?;
        let device = params
            .device
            .ok_or_else(|| RegkeyError::InvalidRequest("missing required parameter: device".into()))?;
        let device_kind = DeviceKind::classify(&device)?;
        let state = params.state.unwrap_or_default();

        if state == DesiredState::Present && params.managed.is_none() {
            return Err(RegkeyError::InvalidRequest(
                "state is present but the following are missing: managed".into(),
            ));
        }

        if params.managed == Some(false) {
            let mut missing = Vec::new();
            if params.device_username.as_deref().is_none_or(str::is_empty) {
                missing.push("device_username");
            }
            if params.device_password.as_deref().is_none_or(str::is_empty) {
                missing.push("device_password");
            }
            if !missing.is_empty() {
                return Err(RegkeyError::InvalidRequest(format!(
                    "managed is false but the following are missing: {}",
                    missing.join(", ")
                )));
            }
        }

        Ok(Self {
            pool,
            key,
            device,
            device_kind,
            managed: params.managed,
            device_port: params.device_port.unwrap_or(DEFAULT_DEVICE_PORT),
            device_username: params.device_username,
            device_password: params.device_password,
            state,
        })
    }

    #[must_use]
    pub fn pool(&self) -> &str {
        &self.pool
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    #[must_use]
    pub fn device_kind(&self) -> DeviceKind {
        self.device_kind
    }

    /// Returns true only when the device was declared managed.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.managed == Some(true)
    }

    #[must_use]
    pub fn managed(&self) -> Option<bool> {
        self.managed
    }

    #[must_use]
    pub fn device_port(&self) -> u16 {
        self.device_port
    }

    #[must_use]
    pub fn device_username(&self) -> Option<&str> {
        self.device_username.as_deref()
    }

    #[must_use]
    pub fn device_password(&self) -> Option<&str> {
        self.device_password.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> DesiredState {
        self.state
    }
}

impl fmt::Debug for AssignmentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignmentRequest")
            .field("pool", &self.pool)
            .field("key", &self.key)
            .field("device", &self.device)
            .field("device_kind", &self.device_kind)
            .field("managed", &self.managed)
            .field("device_port", &self.device_port)
            .field("device_username", &self.device_username)
            .field("device_password", &self.device_password.as_ref().map(|_| "********"))
            .field("state", &self.state)
            .finish()
    }
}

fn required(name: &str, value: Option<String>) -> RegkeyResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RegkeyError::InvalidRequest(format!(
            "missing required parameter: {name}"
        ))),
    }
}
