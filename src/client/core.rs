use super::args::{self, CallArgs, RawArg};
use super::builder::MistralClientBuilder;
use super::endpoint::{self, UrlBase};
use super::request::RequestBuilder;
use super::types::CallOutput;
use crate::config::ClientConfig;
use crate::registry::{self, EndpointSpec};
use crate::transport::{PreparedRequest, Transport};
use crate::{BoxStream, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Client for the Mistral AI REST API.
///
/// Every operation goes through [`MistralClient::call`]: look the name up in the
/// registry, build the URL and payload, send once, then either buffer the
/// response or feed each streamed frame to the caller's callback. The client
/// holds no per-call state and can be shared across tasks.
pub struct MistralClient {
    pub(crate) config: ClientConfig,
    pub(crate) api_key: String,
    pub(crate) transport: Arc<dyn Transport>,
}

impl MistralClient {
    pub fn builder() -> MistralClientBuilder {
        MistralClientBuilder::new()
    }

    /// Build a client from the keyring and `MISTRAL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        MistralClientBuilder::from_env().build()
    }

    pub(crate) fn from_parts(
        config: ClientConfig,
        api_key: String,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            api_key,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn url_base(&self) -> UrlBase {
        UrlBase::from_config(&self.config)
    }

    /// Perform `operation`.
    ///
    /// Frames are pushed to `args.callback` only when a callback is present and
    /// `options.stream` is `true`; otherwise the whole body is buffered into
    /// [`CallOutput::Response`].
    pub async fn call(&self, operation: &str, args: CallArgs<'_>) -> Result<CallOutput> {
        let spec = registry::resolve(operation)?;
        let mut args = args.finalize(spec)?;
        let request = self.build_request(spec, &args).await?;
        let stream = args.stream_requested();

        match args.callback.as_mut() {
            Some(on_frame) if stream => {
                let summary = self.send_streaming(spec.name, request, on_frame).await?;
                Ok(CallOutput::Streamed(summary))
            }
            callback => {
                if callback.is_some() {
                    debug!(operation = spec.name, "stream not requested; callback ignored");
                }
                let response = self.send_buffered(spec.name, request).await?;
                Ok(CallOutput::Response(response))
            }
        }
    }

    /// Perform `operation` with positional arguments `[params?, options?, callback?]`.
    pub async fn call_positional(
        &self,
        operation: &str,
        raw: Vec<RawArg<'_>>,
    ) -> Result<CallOutput> {
        let spec = registry::resolve(operation)?;
        let args = args::normalize(spec, raw)?;
        self.call(operation, args).await
    }

    /// Build the request `call` would send, without sending it.
    pub async fn prepare(&self, operation: &str, args: CallArgs<'_>) -> Result<PreparedRequest> {
        let spec = registry::resolve(operation)?;
        let args = args.finalize(spec)?;
        self.build_request(spec, &args).await
    }

    /// Perform `operation` with `stream: true` and return its frames as a `Stream`.
    ///
    /// A callback in `args` is not used.
    pub async fn frames(
        &self,
        operation: &str,
        args: CallArgs<'_>,
    ) -> Result<BoxStream<'static, Value>> {
        let spec = registry::resolve(operation)?;
        let mut args = args.finalize(spec)?;
        args.options.insert("stream".to_string(), Value::Bool(true));
        let request = self.build_request(spec, &args).await?;
        self.open_frames(spec.name, request).await
    }

    async fn build_request(&self, spec: &EndpointSpec, args: &CallArgs<'_>) -> Result<PreparedRequest> {
        let built = RequestBuilder::new(&self.api_key)
            .build(spec.method, &args.options)
            .await?;
        let url = endpoint::build_url(spec, &args.path_params, &self.url_base(), &built.query)?;

        Ok(PreparedRequest {
            method: spec.method,
            url,
            headers: built.headers,
            body: built.body,
        })
    }
}
