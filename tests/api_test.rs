//! Integration tests for the relay HTTP API.

use axum::body::Body;
use axum::http::{ Request, StatusCode };
use http_body_util::BodyExt;
use serde_json::{ json, Value };
use tower::ServiceExt;

mod common;

use common::{ all_keys, secrets, test_app, FakeProvider };

fn chat(body: Value) -> Request<Body> {
    Request::post("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn read_text(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_openai_reply_is_relayed() {
    let fake = FakeProvider::replying_with("Hi there!");
    let app = test_app(&fake, all_keys()).await;

    let response = app
        .oneshot(chat(json!({ "message": "Hello", "provider": "openai" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "message": "Hi there!" }));
    assert_eq!(fake.last_body()["model"], "gpt-3.5-turbo");
}

#[tokio::test]
async fn test_provider_defaults_to_openai() {
    let fake = FakeProvider::replying_with("default");
    let app = test_app(&fake, all_keys()).await;

    let response = app.oneshot(chat(json!({ "message": "Hello" }))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fake.last_body()["model"], "gpt-3.5-turbo");
}

#[tokio::test]
async fn test_openai_empty_reply_uses_fallback() {
    let fake = FakeProvider::new(StatusCode::OK, json!({ "choices": [] }));
    let app = test_app(&fake, all_keys()).await;

    let response = app.oneshot(chat(json!({ "message": "Hello" }))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "message": "Sorry, I could not process that." })
    );
}

#[tokio::test]
async fn test_zhipu_without_model_sends_glm_4() {
    let fake = FakeProvider::replying_with("你好");
    let app = test_app(&fake, all_keys()).await;

    let response = app
        .oneshot(chat(json!({ "message": "Hi", "provider": "zhipu" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "message": "你好" }));

    let upstream = fake.last_body();
    assert_eq!(upstream["model"], "glm-4");
    assert_eq!(upstream["max_tokens"], 1500);
    assert_eq!(upstream["messages"], json!([{ "role": "user", "content": "Hi" }]));
}

#[tokio::test]
async fn test_zhipu_model_is_forwarded() {
    let fake = FakeProvider::replying_with("ok");
    let app = test_app(&fake, all_keys()).await;

    app.oneshot(chat(json!({ "message": "Hi", "provider": "zhipu", "model": "chatglm_turbo" })))
        .await
        .unwrap();

    assert_eq!(fake.last_body()["model"], "chatglm_turbo");
}

#[tokio::test]
async fn test_unsupported_provider_is_generic_failure() {
    let fake = FakeProvider::replying_with("unused");
    let app = test_app(&fake, all_keys()).await;

    let response = app
        .oneshot(chat(json!({ "message": "Hi", "provider": "gemini" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await, json!({ "error": "Failed to process message" }));
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn test_missing_key_does_not_leak() {
    let fake = FakeProvider::replying_with("unused");
    let app = test_app(&fake, secrets(&[("ZHIPU_API_KEY", "zk-secret-zhipu")])).await;

    let response = app
        .clone()
        .oneshot(chat(json!({ "message": "Hi", "provider": "openai" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_text(response).await;
    assert_eq!(body, r#"{"error":"Failed to process message"}"#);
    assert!(!body.contains("OPENAI_API_KEY"));
    assert!(!body.contains("zk-secret-zhipu"));
    assert_eq!(fake.calls(), 0);

    let app = test_app(&fake, secrets(&[("OPENAI_API_KEY", "sk-secret-openai")])).await;
    let response = app
        .oneshot(chat(json!({ "message": "Hi", "provider": "zhipu" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!read_text(response).await.contains("sk-secret-openai"));
}

#[tokio::test]
async fn test_upstream_error_is_not_leaked() {
    let fake = FakeProvider::new(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "message": "quota exceeded for org-123" } })
    );
    let app = test_app(&fake, all_keys()).await;

    let response = app
        .oneshot(chat(json!({ "message": "Hi", "provider": "zhipu" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_text(response).await;
    assert!(!body.contains("quota"));
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_generic_failure() {
    let fake = FakeProvider::replying_with("unused");
    let app = test_app(&fake, all_keys()).await;

    for raw in ["not json", r#"{"provider":"openai"}"#] {
        let response = app
            .clone()
            .oneshot(
                Request::post("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(raw))
                    .unwrap()
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await, json!({ "error": "Failed to process message" }));
    }
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn test_health() {
    let fake = FakeProvider::replying_with("unused");
    let app = test_app(&fake, all_keys()).await;

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "ok");
}
