//! REST transport for the BIG-IQ management API.
//!
//! Provides the [`RestClient`] seam used by the license reconciler and a
//! token-authenticated [`F5RestClient`] implementation over `reqwest`.

mod client;
mod config;
mod error;
mod f5;

pub use client::{RestClient, RestResponse};
pub use config::{DEFAULT_AUTH_PROVIDER, DEFAULT_SERVER_PORT, ProviderConfig};
pub use error::{RestError, RestResult};
pub use f5::{AUTH_HEADER, F5RestClient, LOGIN_PATH};
