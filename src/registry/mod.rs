//! Endpoint registry: the fixed catalog of Mistral AI operations.
//!
//! Each operation name maps to an HTTP method, a path template with `{placeholder}`
//! segments and a flag telling whether the operation always streams. The table is
//! declared once and never mutated, so lookups need no synchronization.

mod table;

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

static BY_NAME: Lazy<HashMap<&'static str, &'static EndpointSpec>> =
    Lazy::new(|| table::ENDPOINTS.iter().map(|spec| (spec.name, spec)).collect());

/// HTTP methods used by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET and DELETE carry their options in the query string instead of a body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path below the version prefix, e.g. `/models/{model_id}`.
    pub path_template: &'static str,
    /// Operation always streams; the normalizer forces `stream: true`.
    pub streaming: bool,
}

impl EndpointSpec {
    /// Placeholder names in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        let template: &'static str = self.path_template;
        PLACEHOLDER
            .captures_iter(template)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
    }

    pub fn has_placeholders(&self) -> bool {
        PLACEHOLDER.is_match(self.path_template)
    }
}

/// Look up an operation by name.
pub fn resolve(name: &str) -> Result<&'static EndpointSpec> {
    BY_NAME
        .get(name)
        .copied()
        .ok_or_else(|| Error::UnknownOperation(name.to_string()))
}

/// All catalog entries in declaration order.
pub fn endpoints() -> &'static [EndpointSpec] {
    table::ENDPOINTS
}
