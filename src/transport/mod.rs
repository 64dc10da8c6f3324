//! Transport seam.
//!
//! The dispatcher never opens sockets itself. It hands a [`PreparedRequest`] to a
//! [`Transport`] supplied at construction and reads the [`TransportResponse`] body
//! incrementally. [`ReqwestTransport`] is the default implementation; tests and
//! embedders can inject their own.

mod http;

pub use http::ReqwestTransport;

use crate::registry::HttpMethod;
use crate::BoxStream;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use url::Url;

/// Fully built request, owned by the dispatcher for one send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HeaderMap,
    /// `None` for bodiless requests (GET/DELETE, or no options).
    pub body: Option<Bytes>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_text(&self) -> String {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }
}

/// Response as seen by the dispatcher: status and headers up front, body as an
/// incremental chunk stream.
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: BoxStream<'static, Bytes>,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// HTTP client capability consumed by the dispatcher.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
