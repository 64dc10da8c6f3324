//! Streaming chat completion.
//!
//! Prerequisites:
//! - Set `MISTRAL_API_KEY` (or store it in the OS keyring under `mistral-ai` / `api_key`)
//!
//! Run:
//!   MISTRAL_API_KEY=your_key cargo run --example chat_stream

use mistral_ai::{CallArgs, MistralClient};
use serde_json::json;
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = MistralClient::from_env()?;

    let args = CallArgs::new()
        .options(json!({
            "model": "mistral-small-latest",
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": "Say hello in one short sentence, then list two numbers."}
            ],
            "temperature": 0.2,
            "max_tokens": 128,
            "stream": true,
        }))
        .on_frame(|frame| {
            if let Some(text) = frame["choices"][0]["delta"]["content"].as_str() {
                print!("{}", text);
                std::io::stdout().flush()?;
            }
            Ok(())
        });

    let out = client.create_chat_completion(args).await?;

    if let Some(summary) = out.stream_summary() {
        println!("\n\n--- {} frame(s), [DONE] seen: {} ---", summary.frames, summary.terminated_by_sentinel);
    }

    Ok(())
}
