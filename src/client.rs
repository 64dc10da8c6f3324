//! Client surface for the Mistral AI API.
//!
//! Keep the public surface small: one generic [`MistralClient::call`], a typed
//! wrapper per catalog entry, and the building blocks below for callers that
//! need to inspect or send requests themselves.

pub mod args;
pub mod builder;
pub mod core;
pub mod endpoint;
mod execution;
pub mod multipart;
pub mod request;
pub mod types;

pub use args::{CallArgs, FrameCallback, RawArg};
pub use builder::MistralClientBuilder;
pub use self::core::MistralClient;
pub use types::{ApiResponse, CallOutput};

pub use crate::pipeline::StreamSummary;
pub use crate::transport::PreparedRequest;
