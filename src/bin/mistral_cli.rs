//! Mistral AI CLI: call any catalog operation from the shell.
//!
//! Usage:
//!   mistral-cli list                                         List all operations
//!   mistral-cli call <operation> [--params JSON] [--options JSON] [--stream]
//!   mistral-cli <operation> [...]                            Shorthand for `call`
//!
//! The API key is read from the keyring or `MISTRAL_API_KEY`.

use anyhow::{bail, Context};
use mistral_ai::{registry, CallArgs, CallOutput, MistralClient};
use serde_json::Value;
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "list" => {
            cmd_list();
            Ok(())
        }
        "call" => cmd_call(&args[2..]).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => cmd_call(&args[1..]).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"mistral-cli: command line client for the Mistral AI API

USAGE:
    mistral-cli <COMMAND> [OPTIONS]

COMMANDS:
    list                                   List every operation with its method and path
    call <operation> [OPTIONS]             Call an operation (the `call` keyword is optional)
    version                                Show version information
    help                                   Show this help message

OPTIONS:
    --params <JSON>     Path parameters, e.g. '{{"model_id":"mistral-small-latest"}}'
    --options <JSON>    Body fields (query fields for GET/DELETE)
    --stream            Request `stream: true` and print each frame as it arrives

ENVIRONMENT:
    MISTRAL_API_KEY         API key (after the OS keyring entry mistral-ai/api_key)
    MISTRAL_API_ORIGIN      Host override, default api.mistral.ai
    MISTRAL_API_VERSION     Version prefix override, default v1
    RUST_LOG                Log filter, e.g. mistral_ai=debug"#
    );
}

fn cmd_version() {
    println!("mistral-cli {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_list() {
    for spec in registry::endpoints() {
        let marker = if spec.streaming { "  (stream)" } else { "" };
        println!(
            "{:<32} {:<7} {}{}",
            spec.name,
            spec.method.as_str(),
            spec.path_template,
            marker
        );
    }
}

struct CallRequest {
    operation: String,
    params: Value,
    options: Value,
    stream: bool,
}

fn parse_call(args: &[String]) -> anyhow::Result<CallRequest> {
    let Some(operation) = args.first() else {
        bail!("missing operation name (see `mistral-cli list`)");
    };

    let mut req = CallRequest {
        operation: operation.clone(),
        params: Value::Null,
        options: Value::Null,
        stream: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--params" => {
                let raw = args.get(i + 1).context("--params requires a JSON value")?;
                req.params = serde_json::from_str(raw).context("--params is not valid JSON")?;
                i += 2;
            }
            "--options" => {
                let raw = args.get(i + 1).context("--options requires a JSON value")?;
                req.options = serde_json::from_str(raw).context("--options is not valid JSON")?;
                i += 2;
            }
            "--stream" => {
                req.stream = true;
                i += 1;
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(req)
}

async fn cmd_call(args: &[String]) -> anyhow::Result<()> {
    let req = parse_call(args)?;
    let client = MistralClient::from_env().context("cannot build client")?;

    let mut call_args = CallArgs::new().params(&req.params).options(&req.options);
    if req.stream {
        call_args = call_args.option("stream", true).on_frame(|frame| {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{frame}")?;
            out.flush()?;
            Ok(())
        });
    }

    match client.call(&req.operation, call_args).await? {
        CallOutput::Response(resp) => {
            if resp.is_json() {
                let value: Value = resp.json()?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                std::io::stdout().write_all(resp.bytes())?;
            }
        }
        CallOutput::Streamed(summary) => {
            eprintln!(
                "{} frame(s){}",
                summary.frames,
                if summary.terminated_by_sentinel {
                    ", terminated by [DONE]"
                } else {
                    ""
                }
            );
        }
    }

    Ok(())
}
