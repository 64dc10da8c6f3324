//! Mock HTTP server setup for integration tests

use mistral_ai::MistralClient;
use mockito::{Server, ServerGuard};

pub const API_KEY: &str = "jUsTaRaNdOmStRiNg";
pub const AUTHORIZATION: &str = "Bearer jUsTaRaNdOmStRiNg";

/// Test fixture that owns a mock server and a client pointed at it
pub struct MockApi {
    pub server: ServerGuard,
}

impl MockApi {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    /// Client whose origin is the mock server (plain http, `v1` prefix)
    pub fn client(&self) -> MistralClient {
        MistralClient::builder()
            .api_key(API_KEY)
            .scheme("http")
            .origin(self.server.host_with_port())
            .build()
            .expect("client builds")
    }

    /// Event-stream body with one `data: ` line per frame, blank-line separated
    pub fn sse_body(frames: &[&str]) -> String {
        frames
            .iter()
            .map(|frame| {
                if frame.starts_with("data: ") {
                    format!("{}\n\n", frame)
                } else {
                    format!("data: {}\n\n", frame)
                }
            })
            .collect()
    }
}

/// Client for an origin nothing listens on
pub fn unreachable_client() -> MistralClient {
    MistralClient::builder()
        .api_key(API_KEY)
        .scheme("http")
        .origin("127.0.0.1:1")
        .build()
        .expect("client builds")
}
