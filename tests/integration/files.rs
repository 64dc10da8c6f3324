//! Integration tests for file upload and download

use crate::mock_server::{MockApi, AUTHORIZATION};
use mistral_ai::{CallArgs, RawArg};
use mockito::Matcher;
use serde_json::{json, Value};
use std::path::PathBuf;

fn dummy_file() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mistral-ai-it-{}", uuid::Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dummyFile.jsonl");
    std::fs::write(&path, "Dummy content").unwrap();
    path
}

#[tokio::test]
async fn test_upload_file_is_multipart() {
    let path = dummy_file();
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("POST", "/v1/files")
        .match_header("authorization", AUTHORIZATION)
        .match_header(
            "content-type",
            Matcher::Regex(r"^multipart/form-data; boundary=----MistralAI[0-9a-f]{32}$".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(
                "Content-Disposition: form-data; name=\"file\"; filename=\"dummyFile.jsonl\"\r\nContent-Type: application/octet-stream\r\n\r\nDummy content\r\n"
                    .replace('.', r"\.")
                    .into(),
            ),
            Matcher::Regex("Content-Disposition: form-data; name=\"purpose\"\r\n\r\nfine-tune\r\n".into()),
            Matcher::Regex(r"----MistralAI[0-9a-f]{32}--\r\n$".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"file-abc123","object":"file","filename":"dummyFile.jsonl","purpose":"fine-tune"}"#)
        .create_async()
        .await;

    let client = api.client();
    let out = client
        .call_positional(
            "uploadFile",
            vec![
                RawArg::from(json!({})),
                RawArg::from(json!({"file": path.to_string_lossy(), "purpose": "fine-tune"})),
            ],
        )
        .await
        .unwrap();

    mock.assert_async().await;
    let uploaded: Value = out.response().unwrap().json().unwrap();
    assert_eq!(uploaded["id"], "file-abc123");
    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let mut api = MockApi::new().await;
    let _mock = api
        .server
        .mock("GET", "/v1/files/file-abc123/content")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body("{\"prompt\":\"a\"}\n{\"prompt\":\"b\"}\n")
        .create_async()
        .await;

    let client = api.client();
    let resp = client
        .download_file(CallArgs::new().param("file_id", "file-abc123"))
        .await
        .unwrap()
        .into_response()
        .unwrap();

    assert!(!resp.is_json());
    assert_eq!(resp.text().lines().count(), 2);
}
