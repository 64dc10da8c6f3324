//! `multipart/form-data` encoding for file uploads.
//!
//! The `file` option names a local file whose bytes become the `file` part (with
//! a `filename` parameter and `application/octet-stream`). Every other option is
//! a plain form field: strings verbatim, booleans as `true`/`false`, numbers in
//! their JSON form, arrays and objects as JSON text, nulls omitted.

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::path::Path;
use uuid::Uuid;

pub const BOUNDARY_PREFIX: &str = "----MistralAI";
pub const FILE_FIELD: &str = "file";

/// Fresh boundary per request: prefix + 16 random bytes as 32 lowercase hex characters.
pub fn generate_boundary() -> String {
    format!("{}{}", BOUNDARY_PREFIX, Uuid::new_v4().simple())
}

pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={}", boundary)
}

/// The upload path when `options.file` names an existing local file.
pub fn file_path(options: &Map<String, Value>) -> Option<&Path> {
    match options.get(FILE_FIELD) {
        Some(Value::String(p)) if Path::new(p).is_file() => Some(Path::new(p)),
        _ => None,
    }
}

/// Encode every option as one part, reading the `file` part from disk.
pub async fn encode(options: &Map<String, Value>, boundary: &str) -> Result<Vec<u8>> {
    let mut body = Vec::new();

    for (name, value) in options {
        if name == FILE_FIELD {
            if let Some(path) = file_path(options) {
                let bytes = tokio::fs::read(path).await?;
                let filename = path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_else(|| FILE_FIELD.to_string());
                write_file_part(&mut body, boundary, name, &filename, &bytes);
                continue;
            }
        }

        if let Some(text) = field_text(value)? {
            write_field_part(&mut body, boundary, name, &text);
        }
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    Ok(body)
}

fn field_text(value: &Value) -> Result<Option<String>> {
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => {
            Some(serde_json::to_string(value).map_err(Error::Encoding)?)
        }
    })
}

fn write_file_part(body: &mut Vec<u8>, boundary: &str, name: &str, filename: &str, bytes: &[u8]) {
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            boundary,
            quote_safe(name),
            quote_safe(filename)
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
}

fn write_field_part(body: &mut Vec<u8>, boundary: &str, name: &str, text: &str) {
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            boundary,
            quote_safe(name),
            text
        )
        .as_bytes(),
    );
}

fn quote_safe(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
