//! The REST client abstraction the reconciler talks to.

use crate::error::RestResult;
use async_trait::async_trait;
use serde_json::Value;

/// A response reduced to what callers inspect: the status and the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed body, or `Value::Null` when the body was empty or not JSON.
    pub json: Value,
}

impl RestResponse {
    pub fn new(status: u16, json: Value) -> Self {
        Self { status, json }
    }

    /// Returns true for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` field BIG-IQ puts in error bodies, if present.
    pub fn message(&self) -> Option<&str> {
        self.json.get("message").and_then(Value::as_str)
    }
}

/// Minimal verb set against the management API.
///
/// `uri` is the path plus query, e.g. `/mgmt/shared/index/config?$filter=...`.
/// Implementations return a response for any status; only transport failures
/// are errors.
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn get(&self, uri: &str) -> RestResult<RestResponse>;

    async fn post(&self, uri: &str, body: &Value) -> RestResult<RestResponse>;

    async fn delete(&self, uri: &str) -> RestResult<RestResponse>;
}
