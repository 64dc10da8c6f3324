use crate::client::core::MistralClient;
use crate::config::ClientConfig;
use crate::transport::{ReqwestTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Starts from [`ClientConfig::default`]; use [`MistralClientBuilder::from_env`]
/// to seed it from the keyring and environment instead.
pub struct MistralClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl MistralClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            transport: None,
        }
    }

    pub fn from_env() -> Self {
        Self {
            config: ClientConfig::from_env(),
            transport: None,
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Host (and optional port) replacing `api.mistral.ai`.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Version prefix replacing `v1`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// URL scheme. Only mock servers need anything but `https`.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.scheme = scheme.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(url.into());
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Send through a custom [`Transport`] instead of the default reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MistralClient> {
        let api_key = match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                return Err(Error::configuration_with_context(
                    "missing API key",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_details("set MISTRAL_API_KEY or call MistralClientBuilder::api_key")
                        .with_source("client_builder"),
                ))
            }
        };

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(&self.config)?),
        };

        Ok(MistralClient::from_parts(self.config, api_key, transport))
    }
}

impl Default for MistralClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
