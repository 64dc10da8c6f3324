//! Integration tests against a mock HTTP server, through the default reqwest transport.

mod calls;
mod files;
mod mock_server;
mod streaming;
