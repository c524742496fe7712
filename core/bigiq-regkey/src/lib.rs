//! Regkey license assignment for BIG-IQ.
//!
//! Assigns a registration key from a BIG-IQ regkey pool to a BIG-IP device,
//! or revokes it, idempotently. The flow is:
//!
//! - classify the device identifier as address, hostname or machine UUID
//! - resolve the pool id, the existing assignment (member) id and, for
//!   managed devices, the device reference
//! - create or delete the member so the pool matches the requested state
//!
//! All HTTP goes through the [`bigiq_rest::RestClient`] seam.

mod changes;
mod device;
mod error;
mod manager;
mod request;
mod resolver;
pub mod uri;

pub use changes::{AssignmentOutcome, CreatePayload, ReportableChanges};
pub use device::{DeviceKind, device_is_address, device_is_id, device_is_name};
pub use error::{RegkeyError, RegkeyResult};
pub use manager::AssignmentManager;
pub use request::{AssignmentRequest, DEFAULT_DEVICE_PORT, DesiredState, RequestParams};
pub use resolver::{DeviceReference, ResolvedIdentifiers, Resolver};
