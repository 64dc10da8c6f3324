//! Integration tests for buffered JSON and query-string calls

use crate::mock_server::{unreachable_client, MockApi, AUTHORIZATION};
use mistral_ai::{CallArgs, Error, RawArg};
use mockito::Matcher;
use serde_json::{json, Value};

#[tokio::test]
async fn test_chat_completion_json_body() {
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", AUTHORIZATION)
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_body(Matcher::Json(json!({
            "model": "mistral-tiny",
            "messages": [{"role": "user", "content": "Hello"}],
            "safe_prompt": false,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"cmpl-1","object":"chat.completion","choices":[{"index":0,"message":{"role":"assistant","content":"Hi!"}}]}"#)
        .create_async()
        .await;

    let client = api.client();
    let out = client
        .create_chat_completion(CallArgs::new().options(json!({
            "model": "mistral-tiny",
            "messages": [{"role": "user", "content": "Hello"}],
            "safe_prompt": false,
        })))
        .await
        .unwrap();

    mock.assert_async().await;
    let resp = out.into_response().unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.is_json());
    let body: Value = resp.json().unwrap();
    assert_eq!(body["choices"][0]["message"]["content"], "Hi!");
}

#[tokio::test]
async fn test_get_sends_options_as_query() {
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("GET", "/v1/fine_tuning/jobs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "5".into()),
            Matcher::UrlEncoded("order".into(), "desc".into()),
        ]))
        .match_header("content-type", Matcher::Missing)
        .match_body("")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"list","data":[],"total":0}"#)
        .create_async()
        .await;

    let client = api.client();
    let out = client
        .call_positional(
            "listFineTuningJobs",
            vec![RawArg::from(json!({"limit": 5, "order": "desc"}))],
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(out.response().unwrap().json::<Value>().unwrap()["total"], 0);
}

#[tokio::test]
async fn test_path_parameter_substitution() {
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("GET", "/v1/models/mistral-small-latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"mistral-small-latest","object":"model"}"#)
        .create_async()
        .await;

    let client = api.client();
    let out = client
        .retrieve_model(CallArgs::new().param("model_id", "mistral-small-latest"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(out.response().unwrap().json::<Value>().unwrap()["object"], "model");
}

#[tokio::test]
async fn test_delete_has_no_body() {
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("DELETE", "/v1/files/file-abc123")
        .match_body("")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"file-abc123","object":"file","deleted":true}"#)
        .create_async()
        .await;

    let client = api.client();
    client
        .delete_file(CallArgs::new().param("file_id", "file-abc123"))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_body_with_reserved_query() {
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("PATCH", "/v1/agents/ag_1/version")
        .match_query(Matcher::UrlEncoded("version".into(), "2".into()))
        .match_body(Matcher::Json(json!({"description": "pinned"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"ag_1","version":2}"#)
        .create_async()
        .await;

    let client = api.client();
    client
        .update_agent_version(
            CallArgs::new()
                .param("agent_id", "ag_1")
                .option("description", "pinned")
                .query("version", 2),
        )
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_raised() {
    let mut api = MockApi::new().await;
    let _mock = api
        .server
        .mock("POST", "/v1/embeddings")
        .with_status(400)
        .with_body("Bad Request")
        .create_async()
        .await;

    let client = api.client();
    let err = client
        .create_embedding(CallArgs::new().options(json!({
            "model": "mistral-embed",
            "input": ["Hello world", "Test embedding"],
        })))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.to_string(), "Bad Request");
}

#[tokio::test]
async fn test_server_error_body_is_kept() {
    let mut api = MockApi::new().await;
    let _mock = api
        .server
        .mock("GET", "/v1/models")
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"error","message":"Service unavailable"}"#)
        .create_async()
        .await;

    let client = api.client();
    let err = client.list_models(CallArgs::new()).await.unwrap_err();
    match err {
        Error::Api { status, body, .. } => {
            assert_eq!(status, 503);
            assert!(body.contains("Service unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_origin_has_status_zero() {
    let client = unreachable_client();
    let err = client.list_models(CallArgs::new()).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 0, .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_invalid_arguments_never_reach_the_server() {
    let mut api = MockApi::new().await;
    let mock = api
        .server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = api.client();

    let err = client
        .call_positional("createChatCompletion", vec![RawArg::from(json!("invalid_argument"))])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = client.call("invalidMethod", CallArgs::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid Mistral AI URL key \"invalidMethod\".");

    let err = client
        .cancel_fine_tuning_job(CallArgs::new().param("job_id", json!(["a", "b"])))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parameter \"job_id\" must be a scalar value, array given."
    );

    mock.assert_async().await;
}
