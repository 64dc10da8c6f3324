//! Upload a fine-tuning dataset as `multipart/form-data`.
//!
//! Run:
//!   MISTRAL_API_KEY=your_key cargo run --example upload_file -- ./training.jsonl

use mistral_ai::{CallArgs, MistralClient};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: cargo run --example upload_file -- <path/to/file.jsonl>");
        std::process::exit(1);
    };

    let client = MistralClient::from_env()?;

    // An existing local path under `file` switches the body to multipart.
    let out = client
        .upload_file(
            CallArgs::new()
                .option("file", &path)
                .option("purpose", "fine-tune"),
        )
        .await?;

    if let Some(resp) = out.response() {
        let uploaded: Value = resp.json()?;
        println!("{}", serde_json::to_string_pretty(&uploaded)?);
    }

    Ok(())
}
