//! List models, then retrieve the first one by id.
//!
//! Run:
//!   MISTRAL_API_KEY=your_key cargo run --example retrieve_model

use mistral_ai::{CallArgs, MistralClient, RawArg};
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = MistralClient::from_env()?;

    let listed: Value = match client.list_models(CallArgs::new()).await?.into_response() {
        Some(resp) => resp.json()?,
        None => return Ok(()),
    };

    let Some(model_id) = listed["data"][0]["id"].as_str() else {
        println!("No models available.");
        return Ok(());
    };

    // Positional form: the first map fills `{model_id}`.
    let out = client
        .call_positional("retrieveModel", vec![RawArg::from(json!({ "model_id": model_id }))])
        .await?;

    if let Some(resp) = out.response() {
        let model: Value = resp.json()?;
        println!("{}", serde_json::to_string_pretty(&model)?);
    }

    Ok(())
}
