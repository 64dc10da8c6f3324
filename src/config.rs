//! Construction-time configuration.
//!
//! Values are read once when the client is built and never re-read per call.
//!
//! Environment variables:
//! - `MISTRAL_API_KEY`: bearer token (after the OS keyring entry `mistral-ai` / `api_key`)
//! - `MISTRAL_API_ORIGIN`: host override, default `api.mistral.ai`
//! - `MISTRAL_API_VERSION`: version prefix override, default `v1`
//! - `MISTRAL_HTTP_TIMEOUT_SECS`: request timeout, default 30
//! - `MISTRAL_HTTP_POOL_MAX_IDLE_PER_HOST`: idle connections kept per host, default 32
//! - `MISTRAL_PROXY_URL`: proxy for every request

use keyring::Entry;
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "api.mistral.ai";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_SCHEME: &str = "https";

const KEYRING_SERVICE: &str = "mistral-ai";
const KEYRING_USER: &str = "api_key";

#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    /// Empty means [`DEFAULT_ORIGIN`].
    pub origin: String,
    /// Empty means [`DEFAULT_API_VERSION`].
    pub api_version: String,
    /// `https` unless pointed at a local mock server.
    pub scheme: String,
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub proxy_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            origin: String::new(),
            api_version: String::new(),
            scheme: DEFAULT_SCHEME.to_string(),
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 32,
            proxy_url: None,
        }
    }
}

// Keep the key out of logs and panics.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("origin", &self.origin)
            .field("api_version", &self.api_version)
            .field("scheme", &self.scheme)
            .field("timeout", &self.timeout)
            .field("pool_max_idle_per_host", &self.pool_max_idle_per_host)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

impl ClientConfig {
    /// Build a config from the keyring and the environment (env-overridable defaults).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: Self::lookup_api_key(),
            origin: env::var("MISTRAL_API_ORIGIN").unwrap_or_default(),
            api_version: env::var("MISTRAL_API_VERSION").unwrap_or_default(),
            scheme: defaults.scheme,
            timeout: env::var("MISTRAL_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            pool_max_idle_per_host: env::var("MISTRAL_HTTP_POOL_MAX_IDLE_PER_HOST")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.pool_max_idle_per_host),
            proxy_url: env::var("MISTRAL_PROXY_URL").ok().filter(|s| !s.is_empty()),
        }
    }

    fn lookup_api_key() -> Option<String> {
        // 1. Try Keyring
        if let Ok(entry) = Entry::new(KEYRING_SERVICE, KEYRING_USER) {
            if let Ok(key) = entry.get_password() {
                return Some(key);
            }
        }

        // 2. Try Environment Variable
        env::var("MISTRAL_API_KEY").ok().filter(|s| !s.is_empty())
    }

    pub fn effective_origin(&self) -> &str {
        if self.origin.is_empty() {
            DEFAULT_ORIGIN
        } else {
            &self.origin
        }
    }

    pub fn effective_api_version(&self) -> &str {
        if self.api_version.is_empty() {
            DEFAULT_API_VERSION
        } else {
            &self.api_version
        }
    }
}
