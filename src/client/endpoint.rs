//! URL resolution: path placeholder substitution, origin/version prefix and
//! RFC 3986 query encoding.

use super::args::json_type_name;
use crate::config::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_ORIGIN, DEFAULT_SCHEME};
use crate::registry::EndpointSpec;
use crate::{Error, ErrorContext, Result};
use serde_json::{Map, Value};
use url::form_urlencoded;
use url::Url;

/// Scheme, host and version prefix every endpoint path is appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBase {
    pub scheme: String,
    pub origin: String,
    pub version: String,
}

impl UrlBase {
    /// Empty overrides fall back to `https://api.mistral.ai/v1`.
    pub fn new(origin: &str, version: &str) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            origin: non_empty_or(origin, DEFAULT_ORIGIN),
            version: non_empty_or(version.trim_matches('/'), DEFAULT_API_VERSION),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            scheme: non_empty_or(&config.scheme, DEFAULT_SCHEME),
            ..Self::new(config.effective_origin(), config.effective_api_version())
        }
    }
}

impl Default for UrlBase {
    fn default() -> Self {
        Self::new("", "")
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Build the absolute URL for `spec`.
pub fn build_url(
    spec: &EndpointSpec,
    path_params: &Map<String, Value>,
    base: &UrlBase,
    query: &[(String, String)],
) -> Result<Url> {
    let path = resolve_path(spec, path_params)?;

    let mut url = Url::parse(&format!("{}://{}", base.scheme, base.origin)).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid API origin \"{}\": {}", base.origin, e),
            ErrorContext::new()
                .with_field_path("origin")
                .with_source("url_resolver"),
        )
    })?;
    url.set_path(&format!("/{}{}", base.version, path));
    if !query.is_empty() {
        url.set_query(Some(&encode_query(query)));
    }
    Ok(url)
}

/// Substitute every `{name}` in the template with its path parameter.
pub fn resolve_path(spec: &EndpointSpec, path_params: &Map<String, Value>) -> Result<String> {
    let mut path = spec.path_template.to_string();
    for name in spec.placeholders() {
        let value = path_params
            .get(name)
            .ok_or_else(|| Error::MissingPathParameter {
                operation: spec.name.to_string(),
                name: name.to_string(),
            })?;
        let segment = scalar_to_string(value).ok_or_else(|| Error::InvalidParameterType {
            name: name.to_string(),
            actual: json_type_name(value),
        })?;
        check_segment(name, &segment)?;
        path = path.replace(&format!("{{{}}}", name), &escape_segment(&segment));
    }
    Ok(path)
}

/// String form of a scalar, or `None` for null, arrays and objects.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// URL parsing drops `.`/`..` segments (and their `%2E` spellings) and an
// empty segment addresses the parent collection; none of them can stay in place.
fn check_segment(name: &str, segment: &str) -> Result<()> {
    if matches!(segment, "" | "." | "..") {
        return Err(Error::invalid_argument_with_context(
            format!("Parameter \"{}\" must name a single path segment.", name),
            ErrorContext::new()
                .with_field_path(format!("path_params.{}", name))
                .with_details(format!("{:?} given", segment))
                .with_source("url_resolver"),
        ));
    }
    Ok(())
}

// `Url::set_path` escapes everything else; a literal `/` would split the segment.
fn escape_segment(segment: &str) -> String {
    segment.replace('%', "%25").replace('/', "%2F")
}

/// `k=v&k2=v2` in input order, percent-encoded with `%20` for spaces.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", rfc3986(k), rfc3986(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn rfc3986(raw: &str) -> String {
    // form encoding differs from RFC 3986 only in `+` for space; a literal `+` is already `%2B`.
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
