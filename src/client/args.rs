//! Call arguments and the positional-argument normalizer.
//!
//! [`CallArgs`] is the typed surface: path parameters, options and an optional
//! frame callback as named fields. [`normalize`] turns the loosely-typed
//! positional form (`[params?, options?, callback?]`) into the same shape, using
//! the endpoint's path template to decide what the first map means.

use crate::registry::EndpointSpec;
use crate::{CallbackError, Error, ErrorContext, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Per-frame sink for streamed calls. Returning `Err` aborts the stream.
pub type FrameCallback<'a> =
    Box<dyn FnMut(Value) -> std::result::Result<(), CallbackError> + Send + 'a>;

/// Reserved option key whose map is sent as query parameters on body-carrying requests.
pub const QUERY_KEY: &str = "_query";

/// Arguments for one call.
///
/// Serialization failures in [`CallArgs::options`] and friends are kept and
/// reported when the call is made, before anything is sent.
#[derive(Default)]
pub struct CallArgs<'a> {
    pub path_params: Map<String, Value>,
    pub options: Map<String, Value>,
    pub callback: Option<FrameCallback<'a>>,
    deferred: Option<Error>,
}

impl<'a> CallArgs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one path parameter, e.g. `param("model_id", "mistral-small-latest")`.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Merge a serializable map into the path parameters.
    pub fn params<T: Serialize>(mut self, params: T) -> Self {
        match to_object(params, "params") {
            Ok(map) => self.path_params.extend(map),
            Err(e) => self.defer(e),
        }
        self
    }

    /// Set one option (body field, or query field for GET/DELETE).
    pub fn option<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.options.insert(key.into(), v);
            }
            Err(e) => self.defer(Error::Encoding(e)),
        }
        self
    }

    /// Merge a serializable map into the options.
    pub fn options<T: Serialize>(mut self, options: T) -> Self {
        match to_object(options, "options") {
            Ok(map) => self.options.extend(map),
            Err(e) => self.defer(e),
        }
        self
    }

    /// Add a query parameter alongside a body (`_query` on POST/PUT/PATCH).
    pub fn query<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Self {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                self.defer(Error::Encoding(e));
                return self;
            }
        };
        let entry = self
            .options
            .entry(QUERY_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match entry {
            Value::Object(map) => {
                map.insert(key.into(), value);
            }
            _ => self.defer(Error::invalid_argument_with_context(
                "Option \"_query\" must be a map.",
                ErrorContext::new()
                    .with_field_path("options._query")
                    .with_source("call_args"),
            )),
        }
        self
    }

    /// Register the frame callback. Frames are only delivered when `stream` is `true`.
    pub fn on_frame<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Value) -> std::result::Result<(), CallbackError> + Send + 'a,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// `true` when the options explicitly request streaming.
    pub fn stream_requested(&self) -> bool {
        self.options.get("stream") == Some(&Value::Bool(true))
    }

    fn defer(&mut self, err: Error) {
        if self.deferred.is_none() {
            self.deferred = Some(err);
        }
    }

    /// Surface deferred errors and apply endpoint defaults.
    pub(crate) fn finalize(mut self, spec: &EndpointSpec) -> Result<Self> {
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        if spec.streaming {
            self.options.insert("stream".to_string(), Value::Bool(true));
        }
        Ok(self)
    }
}

impl std::fmt::Debug for CallArgs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallArgs")
            .field("path_params", &self.path_params)
            .field("options", &self.options)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

fn to_object<T: Serialize>(value: T, what: &str) -> Result<Map<String, Value>> {
    match serde_json::to_value(value).map_err(Error::Encoding)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::invalid_argument_with_context(
            format!("{} must serialize to a map.", what),
            ErrorContext::new()
                .with_field_path(what)
                .with_details(format!("{} given", json_type_name(&other)))
                .with_source("call_args"),
        )),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One positional argument: a JSON value (expected to be a map) or a callback.
pub enum RawArg<'a> {
    Value(Value),
    Callback(FrameCallback<'a>),
}

impl<'a> RawArg<'a> {
    pub fn callback<F>(callback: F) -> Self
    where
        F: FnMut(Value) -> std::result::Result<(), CallbackError> + Send + 'a,
    {
        RawArg::Callback(Box::new(callback))
    }
}

impl From<Value> for RawArg<'_> {
    fn from(value: Value) -> Self {
        RawArg::Value(value)
    }
}

/// Disambiguate positional arguments into [`CallArgs`].
///
/// - the last argument, when it is a callback, becomes the frame callback
/// - the first argument, when present, must be a map
/// - templates with placeholders: `[params, options]`
/// - templates without: `[options]`, or `[params, options]` when two maps are given
/// - inherently streaming endpoints get `stream: true`
pub fn normalize<'a>(spec: &EndpointSpec, raw: Vec<RawArg<'a>>) -> Result<CallArgs<'a>> {
    if raw.len() > 3 {
        return Err(Error::invalid_argument_with_context(
            format!("Expected at most 3 arguments, {} given.", raw.len()),
            ErrorContext::new()
                .with_field_path("args")
                .with_source("argument_normalizer"),
        ));
    }

    let mut raw = raw;
    let callback = match raw.last() {
        Some(RawArg::Callback(_)) => match raw.pop() {
            Some(RawArg::Callback(cb)) => Some(cb),
            _ => None,
        },
        _ => None,
    };

    let mut maps = Vec::with_capacity(2);
    for (idx, arg) in raw.into_iter().enumerate() {
        match arg {
            RawArg::Value(Value::Object(map)) => maps.push(map),
            RawArg::Value(other) => {
                let message = if idx == 0 {
                    "First argument must be a map of parameters."
                } else {
                    "Second argument must be a map of options."
                };
                return Err(Error::invalid_argument_with_context(
                    message,
                    ErrorContext::new()
                        .with_field_path(format!("args[{}]", idx))
                        .with_details(format!("{} given", json_type_name(&other)))
                        .with_source("argument_normalizer"),
                ));
            }
            RawArg::Callback(_) => {
                return Err(Error::invalid_argument_with_context(
                    "Only the last argument may be a callback.",
                    ErrorContext::new()
                        .with_field_path(format!("args[{}]", idx))
                        .with_source("argument_normalizer"),
                ));
            }
        }
    }

    let mut maps = maps.into_iter();
    let (first, second) = (maps.next(), maps.next());
    let (path_params, options) = if spec.has_placeholders() {
        (first.unwrap_or_default(), second.unwrap_or_default())
    } else {
        match (first, second) {
            (Some(params), Some(options)) => (params, options),
            (Some(options), None) => (Map::new(), options),
            _ => (Map::new(), Map::new()),
        }
    };

    CallArgs {
        path_params,
        options,
        callback,
        deferred: None,
    }
    .finalize(spec)
}
