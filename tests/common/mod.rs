#![allow(dead_code)]

use axum::{ extract::State, http::StatusCode, routing::post, Json, Router };
use chat_relay::config::SecretSource;
use chat_relay::llm::LlmConfig;
use chat_relay::relay::Relay;
use chat_relay::server::api::router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{ Arc, Mutex };

/// Fake provider: answers `POST /chat/completions` with a canned reply and
/// keeps every body it received.
#[derive(Clone)]
pub struct FakeProvider {
    status: StatusCode,
    reply: Value,
    pub bodies: Arc<Mutex<Vec<Value>>>,
}

impl FakeProvider {
    pub fn new(status: StatusCode, reply: Value) -> Self {
        Self { status, reply, bodies: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn replying_with(text: &str) -> Self {
        Self::new(
            StatusCode::OK,
            serde_json::json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] })
        )
    }

    pub fn calls(&self) -> usize {
        self.bodies.lock().unwrap().len()
    }

    pub fn last_body(&self) -> Value {
        self.bodies.lock().unwrap().last().cloned().expect("no upstream call recorded")
    }
}

async fn completions(State(fake): State<FakeProvider>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    fake.bodies.lock().unwrap().push(body);
    (fake.status, Json(fake.reply.clone()))
}

pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn spawn_provider(fake: &FakeProvider) -> String {
    let app = Router::new()
        .route("/chat/completions", post(completions))
        .with_state(fake.clone());
    serve(app).await
}

pub fn secrets(pairs: &[(&str, &str)]) -> Arc<dyn SecretSource> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Arc::new(map)
}

pub fn all_keys() -> Arc<dyn SecretSource> {
    secrets(&[("OPENAI_API_KEY", "sk-secret-openai"), ("ZHIPU_API_KEY", "zk-secret-zhipu")])
}

/// Relay router whose providers both point at `fake`.
pub async fn test_app(fake: &FakeProvider, keys: Arc<dyn SecretSource>) -> Router {
    let base = spawn_provider(fake).await;
    let config = LlmConfig { openai_base_url: base.clone(), zhipu_base_url: base };
    router(Relay::new(config, keys))
}
