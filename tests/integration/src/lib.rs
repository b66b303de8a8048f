//! End-to-end tests for the depot server.
//!
//! These tests require a running depot server at `localhost:4567`. They are
//! marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p depot-integration -- --ignored
//! ```
//!
//! If the server was started with `DEPOT_API_KEY`, export the same value so
//! mutating requests are authorized.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
#[must_use]
pub fn base_url() -> String {
    std::env::var("DEPOT_ENDPOINT").unwrap_or_else(|_| "http://localhost:4567".to_owned())
}

/// The API key the server was started with, if any.
#[must_use]
pub fn api_key() -> Option<String> {
    std::env::var("DEPOT_API_KEY").ok().filter(|k| !k.is_empty())
}

/// Create an HTTP client for the test.
#[must_use]
pub fn client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// Attach the API key to a mutating request when one is configured.
#[must_use]
pub fn authorize(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match api_key() {
        Some(key) => request.header("Authorization", key),
        None => request,
    }
}

/// Generate a unique folder name for a test.
#[must_use]
pub fn unique_folder(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create an object from a JSON envelope and return its identifier.
pub async fn create_object(
    client: &reqwest::Client,
    folder: &str,
    content: &str,
    content_type: Option<&str>,
    name: Option<&str>,
) -> String {
    let mut data = serde_json::json!({ "content": content });
    if let Some(content_type) = content_type {
        data["type"] = serde_json::Value::from(content_type);
    }
    if let Some(name) = name {
        data["object_name"] = serde_json::Value::from(name);
    }

    let response = authorize(client.post(format!("{}/{folder}", base_url())))
        .json(&serde_json::json!({ "data": data }))
        .send()
        .await
        .unwrap_or_else(|e| panic!("create request failed: {e}"));
    assert_eq!(
        response.status(),
        reqwest::StatusCode::OK,
        "create should succeed"
    );

    response
        .json::<String>()
        .await
        .unwrap_or_else(|e| panic!("create should return the id as a JSON string: {e}"))
}

/// Delete an object, tolerating absence.
pub async fn delete_object(client: &reqwest::Client, folder: &str, id: &str) {
    let _ = authorize(client.delete(format!("{}/{folder}/{id}", base_url())))
        .send()
        .await;
}

mod test_errors;
mod test_folders;
mod test_objects;
