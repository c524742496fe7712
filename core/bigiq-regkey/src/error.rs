//! Error types for license assignment.

use bigiq_rest::{RestError, RestResponse};
use thiserror::Error;

/// Failures that end an assignment run.
///
/// The display strings of the lookup and verification variants are part of
/// the tool's output contract.
#[derive(Debug, Error)]
pub enum RegkeyError {
    /// The pool lookup returned no items.
    #[error("No pool with the specified name was found.")]
    PoolNotFound,

    /// The managed-device lookup returned no items.
    #[error("No device with the specified address was found.")]
    DeviceNotFound,

    /// The device string could not be classified.
    #[error("Unknown device format '{0}'")]
    UnknownDeviceFormat(String),

    /// The member still exists after a successful DELETE.
    #[error("Failed to delete the resource.")]
    DeleteFailed,

    /// The request parameters violate an invariant.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// BIG-IQ answered with a non-success status.
    #[error("BIG-IQ returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A success response did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport failure.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl RegkeyError {
    /// Builds an [`RegkeyError::Api`] from a non-success response.
    pub fn from_response(response: &RestResponse) -> Self {
        Self::Api {
            status: response.status,
            message: response
                .message()
                .map_or_else(|| response.json.to_string(), str::to_string),
        }
    }
}

/// Result type for license assignment operations.
pub type RegkeyResult<T> = Result<T, RegkeyError>;
