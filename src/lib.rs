//! # mistral-ai
//!
//! Async client for the Mistral AI REST API.
//!
//! Every remote operation lives in a fixed endpoint catalog ([`registry`]). A call
//! names an operation, supplies path parameters and options, and the client
//! resolves the URL, decides between a JSON, multipart or query-string payload,
//! sends it through an injectable [`transport::Transport`] and either hands back
//! the buffered [`ApiResponse`] or feeds decoded server-sent-event frames to a
//! callback.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mistral_ai::{CallArgs, MistralClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> mistral_ai::Result<()> {
//!     let client = MistralClient::builder().api_key("your-api-key").build()?;
//!
//!     // Buffered call
//!     let models = client.list_models(CallArgs::new()).await?;
//!     println!("{}", models.into_response().map(|r| r.text()).unwrap_or_default());
//!
//!     // Streaming call: one callback invocation per `data: ` frame
//!     let args = CallArgs::new()
//!         .options(json!({
//!             "model": "mistral-small-latest",
//!             "messages": [{"role": "user", "content": "Tell me a story."}],
//!             "stream": true,
//!         }))
//!         .on_frame(|frame| {
//!             if let Some(text) = frame["choices"][0]["delta"]["content"].as_str() {
//!                 print!("{text}");
//!             }
//!             Ok(())
//!         });
//!     client.create_chat_completion(args).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | Static endpoint catalog and lookup |
//! | [`client`] | Client, argument normalization, URL and request building, dispatch |
//! | [`pipeline`] | Incremental SSE line decoding |
//! | [`transport`] | Transport seam and the default `reqwest` implementation |
//! | [`config`] | Construction-time configuration (key, origin, version, HTTP knobs) |

pub mod client;
pub mod config;
pub mod pipeline;
pub mod registry;
pub mod transport;

pub use client::{
    ApiResponse, CallArgs, CallOutput, MistralClient, MistralClientBuilder, PreparedRequest,
    RawArg, StreamSummary,
};
pub use config::ClientConfig;
pub use registry::{EndpointSpec, HttpMethod};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{CallbackError, Error, ErrorContext};
