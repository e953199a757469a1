//! Connection settings for the climate API.

use bon::Builder;
use log::warn;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_API_PATH: &str = "/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BASE_URL_VAR: &str = "ECOVISION_BASE_URL";
const API_PATH_VAR: &str = "ECOVISION_API_PATH";
const TIMEOUT_VAR: &str = "ECOVISION_TIMEOUT_SECS";

/// Where the API lives and how long to wait for it.
///
/// # Examples
///
/// ```
/// use ecovision::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .base_url("http://climate.internal:8080")
///     .timeout(Duration::from_secs(3))
///     .build();
///
/// assert_eq!(config.api_path, "/api/v1");
/// assert_eq!(config.endpoint_url("/summary"), "http://climate.internal:8080/api/v1/summary");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend.
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Fixed path prefix all endpoints live under.
    #[builder(into, default = DEFAULT_API_PATH.to_string())]
    pub api_path: String,
    /// Upper bound on a whole request; expiry is reported as a network failure.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::builder().build()
    }
}

impl ClientConfig {
    /// Reads `ECOVISION_BASE_URL`, `ECOVISION_API_PATH` and `ECOVISION_TIMEOUT_SECS`,
    /// using the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout = lookup(TIMEOUT_VAR).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!("Ignoring {TIMEOUT_VAR}='{raw}': not a whole number of seconds");
                None
            }
        });

        ClientConfig::builder()
            .maybe_base_url(lookup(BASE_URL_VAR))
            .maybe_api_path(lookup(API_PATH_VAR))
            .maybe_timeout(timeout)
            .build()
    }

    /// Full URL of an endpoint path such as `/climate`.
    pub fn endpoint_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_path.trim_matches('/');
        let path = path.trim_start_matches('/');
        if prefix.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{prefix}/{path}")
        }
    }
}
