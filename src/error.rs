use crate::transport::TransportError;
use thiserror::Error;

/// Boxed error returned by a stream callback to abort the stream.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Structured error context for argument and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Option key or argument slot that caused the error (e.g. "args[0]", "options.file")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g. expected type, actual value)
    pub details: Option<String>,
    /// Component that raised the error (e.g. "argument_normalizer", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Every failure the client can surface. Nothing is retried or swallowed
/// internally; each variant is returned at the point of detection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid Mistral AI URL key \"{0}\".")]
    UnknownOperation(String),

    #[error("Missing path parameter \"{name}\".")]
    MissingPathParameter { operation: String, name: String },

    #[error("Parameter \"{name}\" must be a scalar value, {actual} given.")]
    InvalidParameterType { name: String, actual: &'static str },

    #[error("{message}{}", format_context(.context))]
    InvalidArgument {
        message: String,
        context: ErrorContext,
    },

    #[error("JSON encode error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Remote status >= 400, or a transport failure (`status == 0`).
    #[error("{body}")]
    Api {
        status: u16,
        body: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("JSON decode error: {source}")]
    StreamDecode {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    /// A buffered response body that is not the JSON the caller asked for.
    #[error("JSON decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Stream callback aborted: {0}")]
    Callback(#[source] CallbackError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Api {
            status: 0,
            body: err.to_string(),
            source: Some(err),
        }
    }
}

impl Error {
    pub fn invalid_argument_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidArgument {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Error::Api {
            status,
            body: body.into(),
            source: None,
        }
    }

    /// HTTP status of an [`Error::Api`]; `Some(0)` for transport failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidArgument { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
