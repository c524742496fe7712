//! BIG-IQ endpoint paths used by the resolver and reconciler.
//!
//! User-supplied values are percent-encoded before they are placed in a path
//! segment or a `$filter` literal.

use urlencoding::encode;

/// Device resolver collection for all BIG-IP devices.
pub const DEVICES_PATH: &str = "/mgmt/shared/resolver/device-groups/cm-bigip-allBigIpDevices/devices/";

/// Regkey pool collection.
pub const REGKEY_POOLS_PATH: &str = "/mgmt/cm/device/licensing/pool/regkey/licenses";

/// Shared configuration index.
pub const INDEX_CONFIG_PATH: &str = "/mgmt/shared/index/config";

/// Kind of the index entries that record a license assignment.
pub const LICENSE_STATE_KIND: &str = "cm:device:licensing:pool:regkey:licenses:regkeypoollicensestate";

/// Host BIG-IQ expects in self links to its own resources.
const SELF_LINK_HOST: &str = "https://localhost";

pub fn device_lookup(field: &str, device: &str) -> String {
    let device = encode(device);
    format!("{DEVICES_PATH}?$filter=({field} eq '{device}')&$top=1")
}

pub fn device_link(uuid: &str) -> String {
    format!("{SELF_LINK_HOST}{DEVICES_PATH}{uuid}")
}

pub fn pool_lookup(pool: &str) -> String {
    let pool = encode(pool);
    format!("{REGKEY_POOLS_PATH}?$filter=(name eq '{pool}')&$top=1")
}

pub fn member_lookup(device_filter: &str) -> String {
    format!("{INDEX_CONFIG_PATH}?$filter=(kind eq '{LICENSE_STATE_KIND}') and {device_filter}")
}

/// Members collection of one offering; the trailing slash is required for POST.
pub fn members(pool_id: &str, key: &str) -> String {
    let (pool_id, key) = (encode(pool_id), encode(key));
    format!("{REGKEY_POOLS_PATH}/{pool_id}/offerings/{key}/members/")
}

pub fn member(pool_id: &str, key: &str, member_id: &str) -> String {
    let (pool_id, key, member_id) = (encode(pool_id), encode(key), encode(member_id));
    format!("{REGKEY_POOLS_PATH}/{pool_id}/offerings/{key}/members/{member_id}")
}
