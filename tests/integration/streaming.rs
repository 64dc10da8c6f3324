//! Integration tests for streamed responses

use crate::mock_server::{MockApi, AUTHORIZATION};
use futures::StreamExt;
use mistral_ai::{CallArgs, Error, RawArg};
use mockito::Matcher;
use serde_json::{json, Value};

#[tokio::test]
async fn test_chat_completion_stream_delivers_frames() {
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", AUTHORIZATION)
        .match_header("accept", "text/event-stream")
        .match_body(Matcher::PartialJson(json!({"stream": true})))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(MockApi::sse_body(&[
            r#"{"choices":[{"delta":{"content":"Hello"},"index":0}]}"#,
            r#"{"choices":[{"delta":{"content":" World"},"index":0}]}"#,
            "data: [DONE]",
        ]))
        .create_async()
        .await;

    let client = api.client();
    let mut text = String::new();
    let out = client
        .create_chat_completion(
            CallArgs::new()
                .options(json!({
                    "model": "mistral-tiny",
                    "messages": [{"role": "user", "content": "Hello"}],
                    "stream": true,
                }))
                .on_frame(|frame| {
                    if let Some(delta) = frame["choices"][0]["delta"]["content"].as_str() {
                        text.push_str(delta);
                    }
                    Ok(())
                }),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    let summary = out.stream_summary().unwrap();
    assert_eq!(summary.frames, 2);
    assert!(summary.terminated_by_sentinel);
    assert_eq!(text, "Hello World");
}

#[tokio::test]
async fn test_streaming_variant_forces_stream_flag() {
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("POST", "/v1/conversations/conv_1")
        .match_body(Matcher::PartialJson(json!({"stream": true, "inputs": "Next"})))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(MockApi::sse_body(&[
            r#"{"type":"message.output.delta","content":"ok"}"#,
            "data: [DONE]",
        ]))
        .create_async()
        .await;

    let client = api.client();
    let mut frames = Vec::new();
    client
        .call_positional(
            "appendConversationStream",
            vec![
                json!({"conversation_id": "conv_1"}).into(),
                json!({"inputs": "Next"}).into(),
                RawArg::callback(|frame| {
                    frames.push(frame);
                    Ok(())
                }),
            ],
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(frames, vec![json!({"type": "message.output.delta", "content": "ok"})]);
}

#[tokio::test]
async fn test_stream_error_status_skips_callback() {
    let mut api = MockApi::new().await;
    let _mock = api
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(400)
        .with_body("Bad Request")
        .create_async()
        .await;

    let client = api.client();
    let mut calls = 0;
    let err = client
        .create_chat_completion(CallArgs::new().option("stream", true).on_frame(|_| {
            calls += 1;
            Ok(())
        }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 400, .. }));
    assert_eq!(err.to_string(), "Bad Request");
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_malformed_frame_aborts_stream() {
    let mut api = MockApi::new().await;
    let _mock = api
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body("data: {\"n\":1}\n\ndata: not_json\n\ndata: {\"n\":2}\n\n")
        .create_async()
        .await;

    let client = api.client();
    let mut frames = Vec::new();
    let err = client
        .create_chat_completion(CallArgs::new().option("stream", true).on_frame(|frame| {
            frames.push(frame);
            Ok(())
        }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::StreamDecode { ref line, .. } if line == "data: not_json"));
    assert!(err.to_string().starts_with("JSON decode error:"));
    assert_eq!(frames, vec![json!({"n": 1})]);
}

#[tokio::test]
async fn test_stream_without_sentinel_ends_at_body_end() {
    let mut api = MockApi::new().await;
    let _mock = api
        .server
        .mock("POST", "/v1/audio/transcriptions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body("event: transcription.text.delta\ndata: {\"text\":\"Hi\"}\n\ndata: {\"text\":\" there\"}")
        .create_async()
        .await;

    let client = api.client();
    let mut frames = Vec::new();
    let out = client
        .create_audio_transcription_stream(CallArgs::new().option("model", "voxtral-mini-latest").on_frame(
            |frame| {
                frames.push(frame);
                Ok(())
            },
        ))
        .await
        .unwrap();

    let summary = out.stream_summary().unwrap();
    assert_eq!(summary.frames, 2);
    assert!(!summary.terminated_by_sentinel);
    assert_eq!(frames[1], json!({"text": " there"}));
}

#[tokio::test]
async fn test_callback_error_aborts_stream() {
    let mut api = MockApi::new().await;
    let _mock = api
        .server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(MockApi::sse_body(&[r#"{"n":1}"#, r#"{"n":2}"#, "data: [DONE]"]))
        .create_async()
        .await;

    let client = api.client();
    let mut seen = 0;
    let err = client
        .create_chat_completion(CallArgs::new().option("stream", true).on_frame(|_| {
            seen += 1;
            Err("enough".into())
        }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Callback(_)));
    assert_eq!(seen, 1);
}

#[tokio::test]
async fn test_frames_as_stream() {
    let mut api = MockApi::new().await;
    let _mock = api
        .server
        .mock("POST", "/v1/fim/completions")
        .match_body(Matcher::PartialJson(json!({"stream": true})))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(MockApi::sse_body(&[r#"{"n":1}"#, r#"{"n":2}"#, "data: [DONE]"]))
        .create_async()
        .await;

    let client = api.client();
    let frames: Vec<Value> = client
        .frames(
            "createFimCompletion",
            CallArgs::new().options(json!({"model": "codestral-latest", "prompt": "def"})),
        )
        .await
        .unwrap()
        .map(|frame| frame.unwrap())
        .collect()
        .await;

    assert_eq!(frames, vec![json!({"n": 1}), json!({"n": 2})]);
}
