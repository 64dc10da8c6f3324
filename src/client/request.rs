//! Request building: payload shape, serialization and headers.
//!
//! - GET/DELETE: every option becomes a query parameter; no body, no `Content-Type`
//! - POST/PUT/PATCH: options become a JSON body, or a multipart body when
//!   `options.file` names an existing local file; `_query` is split off into the
//!   query string
//! - `Accept: text/event-stream` when `options.stream` is `true`

use super::args::QUERY_KEY;
use super::endpoint::scalar_to_string;
use super::multipart;
use crate::registry::HttpMethod;
use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Map, Value};

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_EVENT_STREAM: &str = "text/event-stream";

/// Headers, body and query parameters for one request.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub is_multipart: bool,
    pub query: Vec<(String, String)>,
}

pub struct RequestBuilder<'a> {
    api_key: &'a str,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(api_key: &'a str) -> Self {
        Self { api_key }
    }

    pub async fn build(&self, method: HttpMethod, options: &Map<String, Value>) -> Result<BuiltRequest> {
        let stream = options.get("stream") == Some(&Value::Bool(true));

        let mut fields = options.clone();
        let extra_query = match fields.remove(QUERY_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(map)) => query_pairs(&map),
            Some(_) => {
                return Err(Error::invalid_argument_with_context(
                    "Option \"_query\" must be a map.",
                    ErrorContext::new()
                        .with_field_path("options._query")
                        .with_source("request_builder"),
                ))
            }
        };

        let mut query = Vec::new();
        let mut body = None;
        let mut content_type = None;

        if !method.allows_body() {
            query = query_pairs(&fields);
        } else if multipart::file_path(&fields).is_some() {
            let boundary = multipart::generate_boundary();
            body = Some(Bytes::from(multipart::encode(&fields, &boundary).await?));
            content_type = Some(multipart::content_type(&boundary));
        } else if !fields.is_empty() {
            let json = serde_json::to_vec(&fields).map_err(Error::Encoding)?;
            body = Some(Bytes::from(json));
            content_type = Some(ACCEPT_JSON.to_string());
        }
        query.extend(extra_query);

        let is_multipart = content_type
            .as_deref()
            .map(|ct| ct.starts_with("multipart/"))
            .unwrap_or(false);
        let headers = self.headers(stream, content_type.as_deref())?;

        Ok(BuiltRequest {
            headers,
            body,
            is_multipart,
            query,
        })
    }

    fn headers(&self, stream: bool, content_type: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|_| {
            Error::configuration_with_context(
                "API key contains characters not allowed in a header",
                ErrorContext::new()
                    .with_field_path("api_key")
                    .with_source("request_builder"),
            )
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let accept = if stream { ACCEPT_EVENT_STREAM } else { ACCEPT_JSON };
        headers.insert(ACCEPT, HeaderValue::from_static(accept));

        if let Some(ct) = content_type {
            // Boundaries and our fixed types are plain ASCII.
            if let Ok(value) = HeaderValue::from_str(ct) {
                headers.insert(CONTENT_TYPE, value);
            }
        }

        Ok(headers)
    }
}

/// Flatten options into query pairs, preserving order.
///
/// Scalars map to one pair; arrays of scalars repeat the key; nested values are
/// sent as JSON text; nulls are dropped.
pub fn query_pairs(options: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(options.len());
    for (key, value) in options {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    match scalar_to_string(item) {
                        Some(s) => pairs.push((key.clone(), s)),
                        None if item.is_null() => {}
                        None => pairs.push((key.clone(), item.to_string())),
                    }
                }
            }
            Value::Object(_) => pairs.push((key.clone(), value.to_string())),
            scalar => {
                if let Some(s) = scalar_to_string(scalar) {
                    pairs.push((key.clone(), s));
                }
            }
        }
    }
    pairs
}
