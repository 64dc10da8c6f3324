use super::{PreparedRequest, Transport, TransportError, TransportResponse};
use crate::config::ClientConfig;
use crate::registry::HttpMethod;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{Method, Proxy};

/// Default transport backed by a pooled async `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            // Streaming reads can sit idle between frames; keep the connection warm.
            .http2_adaptive_window(true)
            .http2_keep_alive_interval(Some(std::time::Duration::from_secs(30)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_source("reqwest_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to create HTTP client: {}", e),
                ErrorContext::new().with_source("reqwest_transport"),
            )
        })?;
        Ok(Self { client })
    }

    /// Wrap an existing client (custom TLS roots, middleware-configured pools, ...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> std::result::Result<TransportResponse, TransportError> {
        let mut req = self
            .client
            .request(Self::method(request.method), request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();

        let body = resp
            .bytes_stream()
            .map_err(|e| Error::from(TransportError::Http(e)));

        Ok(TransportResponse {
            status,
            headers,
            body: Box::pin(body),
        })
    }
}
