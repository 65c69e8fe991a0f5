//! Mock server helpers for the releases API and asset downloads

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::builders::download_path;
use super::constants::*;

/// Serve `release` from the "latest release" endpoint
pub async fn mock_latest_release(server: &MockServer, release: Value) {
    Mock::given(method("GET"))
        .and(path(LATEST_RELEASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(release))
        .mount(server)
        .await;
}

/// Make the "latest release" endpoint answer with `status` and `body`
pub async fn mock_latest_release_raw(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(LATEST_RELEASE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Serve `content` as the asset `name`, expecting exactly `times` requests
pub async fn mock_asset(server: &MockServer, name: &str, content: &[u8], times: u64) {
    Mock::given(method("GET"))
        .and(path(download_path(name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .expect(times)
        .mount(server)
        .await;
}

/// Serve a `checksums.txt` built from `(digest, name)` pairs
pub async fn mock_checksums(server: &MockServer, entries: &[(&str, &str)], times: u64) {
    let body: String = entries
        .iter()
        .map(|(digest, name)| format!("{}  {}\n", digest, name))
        .collect();
    mock_asset(server, ASSET_CHECKSUMS, body.as_bytes(), times).await;
}
