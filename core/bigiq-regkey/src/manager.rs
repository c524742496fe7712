//! Present/absent reconciliation of a license assignment.

use crate::changes::{AssignmentOutcome, CreatePayload, ReportableChanges};
use crate::error::{RegkeyError, RegkeyResult};
use crate::request::{AssignmentRequest, DesiredState};
use crate::resolver::Resolver;
use crate::uri;
use bigiq_rest::RestClient;
use tracing::{debug, info, warn};

/// Drives one assignment request to its desired state.
pub struct AssignmentManager<'a, C: RestClient + ?Sized> {
    client: &'a C,
    request: &'a AssignmentRequest,
    resolver: Resolver<'a, C>,
    check_mode: bool,
    changes: ReportableChanges,
}

impl<'a, C: RestClient + ?Sized> AssignmentManager<'a, C> {
    pub fn new(client: &'a C, request: &'a AssignmentRequest) -> Self {
        Self {
            client,
            request,
            resolver: Resolver::new(client, request),
            check_mode: false,
            changes: ReportableChanges::default(),
        }
    }

    /// In check mode, create and remove report a change without calling
    /// BIG-IQ.
    #[must_use]
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    /// Returns the resolver holding identifiers looked up so far.
    pub fn resolver(&self) -> &Resolver<'a, C> {
        &self.resolver
    }

    /// Reconciles toward the requested state.
    pub async fn exec(&mut self) -> RegkeyResult<AssignmentOutcome> {
        info!(
            pool = self.request.pool(),
            key = self.request.key(),
            device = self.request.device(),
            state = %self.request.state(),
            check_mode = self.check_mode,
            "Reconciling regkey license assignment"
        );

        let changed = match self.request.state() {
            DesiredState::Present => self.present().await?,
            DesiredState::Absent => self.absent().await?,
        };

        if let Some(ids) = self.resolver.identifiers() {
            debug!(?ids, "Resolved identifiers");
        }

        Ok(AssignmentOutcome {
            changed,
            changes: self.changes.clone(),
        })
    }

    /// Ensures the assignment exists. Returns whether anything changed.
    pub async fn present(&mut self) -> RegkeyResult<bool> {
        if self.exists().await? {
            debug!("License already assigned");
            return Ok(false);
        }
        self.create().await
    }

    /// Ensures the assignment does not exist. Returns whether anything changed.
    pub async fn absent(&mut self) -> RegkeyResult<bool> {
        if self.exists().await? {
            return self.remove().await;
        }
        debug!("License not assigned");
        Ok(false)
    }

    /// Returns true if the device holds the key from the pool.
    ///
    /// A member lookup with no match, or any non-success status on the member
    /// resource, means the assignment is absent.
    pub async fn exists(&mut self) -> RegkeyResult<bool> {
        let Some(member_id) = self.resolver.member_id().await? else {
            return Ok(false);
        };
        let pool_id = self.resolver.pool_id().await?;

        let response = self
            .client
            .get(&uri::member(&pool_id, self.request.key(), &member_id))
            .await?;
        debug!(status = response.status, %member_id, "Checked member");
        Ok(response.is_success())
    }

    /// Assigns the license.
    pub async fn create(&mut self) -> RegkeyResult<bool> {
        self.changes = ReportableChanges::from_request(self.request);
        if self.check_mode {
            info!("Check mode: license would be assigned");
            return Ok(true);
        }
        self.create_on_device().await?;
        Ok(true)
    }

    /// Revokes the license and verifies the member is gone.
    ///
    /// # Errors
    ///
    /// Returns [`RegkeyError::DeleteFailed`] when BIG-IQ accepted the DELETE
    /// but the member still exists.
    pub async fn remove(&mut self) -> RegkeyResult<bool> {
        if self.check_mode {
            info!("Check mode: license would be revoked");
            return Ok(true);
        }
        let Some(member_id) = self.resolver.member_id().await? else {
            return Ok(false);
        };

        self.remove_from_device(&member_id).await?;
        if self.exists().await? {
            warn!(%member_id, "Member still present after delete");
            return Err(RegkeyError::DeleteFailed);
        }
        Ok(true)
    }

    async fn create_on_device(&mut self) -> RegkeyResult<()> {
        let payload = if self.request.is_managed() {
            CreatePayload::managed(self.resolver.device_reference().await?)
        } else {
            CreatePayload::unmanaged(self.request)
        };
        let pool_id = self.resolver.pool_id().await?;
        let body = serde_json::to_value(&payload)?;

        let response = self
            .client
            .post(&uri::members(&pool_id, self.request.key()), &body)
            .await?;
        if !response.is_success() {
            warn!(status = response.status, "License assignment rejected");
            return Err(RegkeyError::from_response(&response));
        }

        info!(
            pool_id = %pool_id,
            key = self.request.key(),
            device = self.request.device(),
            "License assigned"
        );
        Ok(())
    }

    async fn remove_from_device(&mut self, member_id: &str) -> RegkeyResult<()> {
        let pool_id = self.resolver.pool_id().await?;

        let response = self
            .client
            .delete(&uri::member(&pool_id, self.request.key(), member_id))
            .await?;
        if !response.is_success() {
            warn!(status = response.status, "License revocation rejected");
            return Err(RegkeyError::from_response(&response));
        }

        info!(%member_id, key = self.request.key(), "License revoked");
        Ok(())
    }
}
