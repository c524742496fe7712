//! Classification of the user-supplied device identifier.
//!
//! A device is named by IP address, by hostname, or by its BIG-IQ machine
//! UUID. The kind decides which index field a lookup filters on.

use crate::error::{RegkeyError, RegkeyResult};
use regex_lite::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

/// Five dash-separated groups of 8-4-4-4-12 characters, matched at the start.
static DEVICE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]{8}-[A-Za-z0-9]{4}-[A-Za-z0-9]{4}-[A-Za-z0-9]{4}-[A-Za-z0-9]{12}")
        .expect("device id pattern is valid")
});

/// Returns true if `device` parses as an IPv4 or IPv6 address.
#[must_use]
pub fn device_is_address(device: &str) -> bool {
    device.parse::<IpAddr>().is_ok()
}

/// Returns true if `device` looks like a machine UUID.
#[must_use]
pub fn device_is_id(device: &str) -> bool {
    DEVICE_ID_PATTERN.is_match(device)
}

/// Returns true if `device` is neither an address nor a machine UUID.
#[must_use]
pub fn device_is_name(device: &str) -> bool {
    !device_is_address(device) && !device_is_id(device)
}

/// How a device identifier is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Address,
    Name,
    Id,
}

impl DeviceKind {
    /// Classifies `device`, checking address first, then name, then id.
    ///
    /// # Errors
    ///
    /// Returns [`RegkeyError::UnknownDeviceFormat`] for a blank identifier.
    pub fn classify(device: &str) -> RegkeyResult<Self> {
        if device.trim().is_empty() {
            return Err(RegkeyError::UnknownDeviceFormat(device.to_string()));
        }

        if device_is_address(device) {
            Ok(Self::Address)
        } else if device_is_name(device) {
            Ok(Self::Name)
        } else if device_is_id(device) {
            Ok(Self::Id)
        } else {
            Err(RegkeyError::UnknownDeviceFormat(device.to_string()))
        }
    }

    /// Field of the device resolver index matched for this kind.
    #[must_use]
    pub fn resolver_field(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Name => "hostname",
            Self::Id => "machineId",
        }
    }

    /// Filter clause against the license-state index for this kind.
    ///
    /// Addresses use the `{addr}...{addr}` range form the index expects. The
    /// device is percent-encoded so the clause can go straight into a query.
    #[must_use]
    pub fn member_filter(&self, device: &str) -> String {
        let device = urlencoding::encode(device);
        match self {
            Self::Address => format!("(deviceAddress eq '{device}...{device}')"),
            Self::Name => format!("(deviceName eq '{device}')"),
            Self::Id => format!("(deviceMachineId eq '{device}')"),
        }
    }
}
