//! Shared helpers for assignment tests against a mocked BIG-IQ.

#![allow(dead_code)]

use bigiq_regkey::{AssignmentRequest, DesiredState, RequestParams};
use bigiq_rest::{F5RestClient, ProviderConfig};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const POOL: &str = "my-regkey-pool";
pub const POOL_ID: &str = "9a7d3d5b-d8b8-4a2e-9a31-76f4c8d4f2a1";
pub const KEY: &str = "XXXX-XXXX-XXXX-XXXX-XXXX";
pub const MEMBER_ID: &str = "0b0cbb0c-1e07-4f5c-a6d8-3c4b0f4b2b10";
pub const DEVICE_UUID: &str = "7141a063-7cf8-423f-9829-9d40599fa3e0";

pub const LICENSE_STATE_FILTER: &str =
    "(kind eq 'cm:device:licensing:pool:regkey:licenses:regkeypoollicensestate')";

pub fn params(device: &str, managed: Option<bool>, state: DesiredState) -> RequestParams {
    RequestParams {
        pool: Some(POOL.to_string()),
        key: Some(KEY.to_string()),
        device: Some(device.to_string()),
        managed,
        state: Some(state),
        ..Default::default()
    }
}

/// Unmanaged device 1.1.1.1 with admin/secret credentials.
pub fn unmanaged_request(state: DesiredState) -> AssignmentRequest {
    let mut p = params("1.1.1.1", Some(false), state);
    p.device_username = Some("admin".to_string());
    p.device_password = Some("secret".to_string());
    AssignmentRequest::new(p).unwrap()
}

/// Managed device addressed by its machine UUID.
pub fn managed_request(state: DesiredState) -> AssignmentRequest {
    AssignmentRequest::new(params(DEVICE_UUID, Some(true), state)).unwrap()
}

pub fn collection(items: Vec<Value>) -> Value {
    json!({
        "totalItems": items.len(),
        "items": items
    })
}

pub fn member_path() -> String {
    format!("/mgmt/cm/device/licensing/pool/regkey/licenses/{POOL_ID}/offerings/{KEY}/members/{MEMBER_ID}")
}

pub fn members_path() -> String {
    format!("/mgmt/cm/device/licensing/pool/regkey/licenses/{POOL_ID}/offerings/{KEY}/members/")
}

/// Starts a mock BIG-IQ that accepts any login.
pub async fn start_bigiq() -> (MockServer, F5RestClient) {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mgmt/shared/authn/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": { "token": "test-token" }
        })))
        .mount(&server)
        .await;

    let client = F5RestClient::with_base_url(
        ProviderConfig::new("bigiq.example.com", "admin", "secret"),
        server.uri(),
    )
    .unwrap();

    (server, client)
}

pub async fn mount_pool(server: &MockServer, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/mgmt/cm/device/licensing/pool/regkey/licenses"))
        .and(query_param("$filter", format!("(name eq '{POOL}')")))
        .and(query_param("$top", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(items)))
        .mount(server)
        .await;
}

pub async fn mount_pool_found(server: &MockServer) {
    mount_pool(server, vec![json!({ "id": POOL_ID, "name": POOL })]).await;
}

/// Mounts the member index lookup for `device_filter`, answering with `items`.
pub async fn mount_member_lookup(server: &MockServer, device_filter: &str, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/mgmt/shared/index/config"))
        .and(query_param(
            "$filter",
            format!("{LICENSE_STATE_FILTER} and {device_filter}"),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(items)))
        .mount(server)
        .await;
}

pub fn address_filter(address: &str) -> String {
    format!("(deviceAddress eq '{address}...{address}')")
}

pub fn member_item() -> Value {
    json!({
        "id": MEMBER_ID,
        "kind": "cm:device:licensing:pool:regkey:licenses:regkeypoollicensestate"
    })
}

pub async fn mount_member_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(member_path()))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "id": MEMBER_ID })))
        .mount(server)
        .await;
}
