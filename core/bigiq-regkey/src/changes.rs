//! Payloads sent to BIG-IQ and attributes reported back to the caller.

use crate::request::AssignmentRequest;
use crate::resolver::DeviceReference;
use serde::Serialize;

/// Body of the POST that creates an assignment.
///
/// Managed devices are referenced by link; unmanaged devices are described
/// by address, port and credentials so BIG-IQ can reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_reference: Option<DeviceReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
}

impl CreatePayload {
    /// Payload for a device BIG-IQ already manages.
    #[must_use]
    pub fn managed(reference: DeviceReference) -> Self {
        Self {
            device_reference: Some(reference),
            device_address: None,
            username: None,
            password: None,
            https_port: None,
        }
    }

    /// Payload for a device BIG-IQ reaches with the request's credentials.
    #[must_use]
    pub fn unmanaged(request: &AssignmentRequest) -> Self {
        Self {
            device_reference: None,
            device_address: Some(request.device().to_string()),
            username: request.device_username().map(str::to_string),
            password: request.device_password().map(str::to_string),
            https_port: Some(request.device_port()),
        }
    }
}

/// Attributes surfaced in the result. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportableChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_address: Option<String>,
    #[serde(rename = "httpsPort", skip_serializing_if = "Option::is_none")]
    pub https_port: Option<u16>,
}

impl ReportableChanges {
    /// Attributes a new assignment for `request` would set.
    ///
    /// Address and port only describe unmanaged devices.
    #[must_use]
    pub fn from_request(request: &AssignmentRequest) -> Self {
        if request.is_managed() {
            return Self::default();
        }
        Self {
            device_address: Some(request.device().to_string()),
            https_port: Some(request.device_port()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.device_address.is_none() && self.https_port.is_none()
    }
}

/// Result of an assignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentOutcome {
    pub changed: bool,
    #[serde(flatten)]
    pub changes: ReportableChanges,
}
