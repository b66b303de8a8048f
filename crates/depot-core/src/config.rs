//! Depot configuration.
//!
//! Provides [`DepotConfig`] for configuring the depot server and storage
//! core. Configuration is constructed once at startup, from the environment
//! or via the builder, and passed by reference into the service constructor;
//! there is no ambient global lookup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Depot service configuration.
///
/// All fields have working defaults for local development. Configuration can
/// be loaded from environment variables via [`DepotConfig::from_env`].
///
/// # Examples
///
/// ```
/// use depot_core::config::DepotConfig;
///
/// let config = DepotConfig::default();
/// assert_eq!(config.listen_addr, "0.0.0.0:4567");
/// assert!(config.persistent);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct DepotConfig {
    /// Bind address for the HTTP server (e.g. `"0.0.0.0:4567"`).
    #[builder(default = String::from("0.0.0.0:4567"))]
    pub listen_addr: String,

    /// Root directory for both stores when persistence is enabled.
    #[builder(default = String::from("./data"))]
    pub data_dir: String,

    /// API key required on create/update/delete requests.
    ///
    /// When unset, mutating requests are accepted without authorization
    /// (development mode).
    #[builder(default)]
    pub api_key: Option<String>,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Whether objects are persisted to disk; `false` keeps everything in
    /// memory and loses it on restart.
    #[builder(default = true)]
    pub persistent: bool,
}

impl Default for DepotConfig {
    fn default() -> Self {
        Self {
            listen_addr: String::from("0.0.0.0:4567"),
            data_dir: String::from("./data"),
            api_key: None,
            log_level: String::from("info"),
            persistent: true,
        }
    }
}

impl DepotConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DEPOT_LISTEN` | `0.0.0.0:4567` |
    /// | `DEPOT_DATA_DIR` | `./data` |
    /// | `DEPOT_API_KEY` | unset (authorization disabled) |
    /// | `LOG_LEVEL` | `info` |
    /// | `DEPOT_PERSISTENT` | `true` |
    ///
    /// # Examples
    ///
    /// ```
    /// use depot_core::config::DepotConfig;
    ///
    /// let config = DepotConfig::from_env();
    /// assert!(!config.listen_addr.is_empty());
    /// ```
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("DEPOT_LISTEN") {
            config.listen_addr = v;
        }
        if let Ok(v) = std::env::var("DEPOT_DATA_DIR") {
            config.data_dir = v;
        }
        if let Ok(v) = std::env::var("DEPOT_API_KEY") {
            if !v.is_empty() {
                config.api_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("DEPOT_PERSISTENT") {
            config.persistent = parse_bool(&v);
        }

        config
    }

    /// Directory holding metadata records.
    #[must_use]
    pub fn metadata_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("metadata")
    }

    /// Directory holding compressed content blobs.
    #[must_use]
    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("objects")
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
