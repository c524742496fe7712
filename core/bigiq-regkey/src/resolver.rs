//! Resolution of user-facing names to BIG-IQ identifiers.
//!
//! Each identifier is looked up on first use and cached for the lifetime of
//! the resolver, which is one assignment run. A member lookup with no match
//! is not cached, so a later call sees an assignment created in between.

use crate::error::{RegkeyError, RegkeyResult};
use crate::request::AssignmentRequest;
use crate::uri;
use bigiq_rest::RestClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Link to a managed device, as embedded in a create payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReference {
    pub link: String,
}

impl DeviceReference {
    /// Builds the self link for the device with the given BIG-IQ uuid.
    #[must_use]
    pub fn for_uuid(uuid: &str) -> Self {
        Self {
            link: uri::device_link(uuid),
        }
    }
}

/// Identifiers resolved so far in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentifiers {
    pub pool_id: String,
    pub member_id: Option<String>,
    pub device_reference: Option<DeviceReference>,
}

/// A BIG-IQ collection response. `totalItems` may be absent on some indexes.
#[derive(Debug, Deserialize)]
struct Collection {
    #[serde(rename = "totalItems")]
    total_items: Option<u64>,
    #[serde(default)]
    items: Vec<Value>,
}

/// Lazily resolves pool id, member id and device reference for a request.
pub struct Resolver<'a, C: RestClient + ?Sized> {
    client: &'a C,
    request: &'a AssignmentRequest,
    pool_id: Option<String>,
    member_id: Option<String>,
    device_reference: Option<DeviceReference>,
}

impl<'a, C: RestClient + ?Sized> Resolver<'a, C> {
    pub fn new(client: &'a C, request: &'a AssignmentRequest) -> Self {
        Self {
            client,
            request,
            pool_id: None,
            member_id: None,
            device_reference: None,
        }
    }

    /// Id of the regkey pool named in the request.
    ///
    /// # Errors
    ///
    /// Returns [`RegkeyError::PoolNotFound`] when no pool has that name.
    pub async fn pool_id(&mut self) -> RegkeyResult<String> {
        if let Some(id) = &self.pool_id {
            return Ok(id.clone());
        }

        let lookup = uri::pool_lookup(self.request.pool());
        let item = self
            .first_item(&lookup)
            .await?
            .ok_or(RegkeyError::PoolNotFound)?;
        let id = string_field(&item, "id")?;

        debug!(pool = self.request.pool(), pool_id = %id, "Resolved pool");
        self.pool_id = Some(id.clone());
        Ok(id)
    }

    /// Id of the existing assignment for the device, or `None` if the device
    /// holds no license from the index's point of view.
    pub async fn member_id(&mut self) -> RegkeyResult<Option<String>> {
        if let Some(id) = &self.member_id {
            return Ok(Some(id.clone()));
        }

        let kind = self.request.device_kind();
        let lookup = uri::member_lookup(&kind.member_filter(self.request.device()));
        let id = match self.first_item(&lookup).await? {
            Some(item) => Some(string_field(&item, "id")?),
            None => None,
        };

        debug!(device = self.request.device(), member_id = ?id, "Resolved member");
        self.member_id.clone_from(&id);
        Ok(id)
    }

    /// Reference to the managed device named in the request.
    ///
    /// # Errors
    ///
    /// Returns [`RegkeyError::DeviceNotFound`] when BIG-IQ does not manage a
    /// matching device.
    pub async fn device_reference(&mut self) -> RegkeyResult<DeviceReference> {
        if let Some(reference) = &self.device_reference {
            return Ok(reference.clone());
        }

        let field = self.request.device_kind().resolver_field();
        let lookup = uri::device_lookup(field, self.request.device());
        let item = self
            .first_item(&lookup)
            .await?
            .ok_or(RegkeyError::DeviceNotFound)?;
        let reference = DeviceReference::for_uuid(&string_field(&item, "uuid")?);

        debug!(device = self.request.device(), link = %reference.link, "Resolved device");
        self.device_reference = Some(reference.clone());
        Ok(reference)
    }

    /// Snapshot of what has been resolved, once the pool id is known.
    #[must_use]
    pub fn identifiers(&self) -> Option<ResolvedIdentifiers> {
        self.pool_id.as_ref().map(|pool_id| ResolvedIdentifiers {
            pool_id: pool_id.clone(),
            member_id: self.member_id.clone(),
            device_reference: self.device_reference.clone(),
        })
    }

    /// Runs a filtered lookup and returns its first item, if any.
    async fn first_item(&self, lookup: &str) -> RegkeyResult<Option<Value>> {
        let response = self.client.get(lookup).await?;
        if !response.is_success() {
            return Err(RegkeyError::from_response(&response));
        }

        let collection: Collection = serde_json::from_value(response.json)
            .map_err(|e| RegkeyError::MalformedResponse(format!("{lookup}: {e}")))?;

        if collection.total_items == Some(0) {
            return Ok(None);
        }
        Ok(collection.items.into_iter().next())
    }
}

fn string_field(item: &Value, field: &str) -> RegkeyResult<String> {
    item.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RegkeyError::MalformedResponse(format!("item has no '{field}' field")))
}
