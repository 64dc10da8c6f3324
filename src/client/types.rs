use crate::pipeline::StreamSummary;
use crate::{Error, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde::de::DeserializeOwned;

/// A fully buffered response with status < 400.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// `true` for `application/json` and `+json` media types.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| {
                let essence = ct.split(';').next().unwrap_or("").trim();
                essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
            })
            .unwrap_or(false)
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body. Works regardless of the declared content type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }
}

/// Result of a call: the buffered response, or a summary once every streamed
/// frame has been handed to the callback.
#[derive(Debug, Clone)]
pub enum CallOutput {
    Response(ApiResponse),
    Streamed(StreamSummary),
}

impl CallOutput {
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            CallOutput::Response(r) => Some(r),
            CallOutput::Streamed(_) => None,
        }
    }

    pub fn into_response(self) -> Option<ApiResponse> {
        match self {
            CallOutput::Response(r) => Some(r),
            CallOutput::Streamed(_) => None,
        }
    }

    pub fn stream_summary(&self) -> Option<StreamSummary> {
        match self {
            CallOutput::Streamed(s) => Some(*s),
            CallOutput::Response(_) => None,
        }
    }
}
