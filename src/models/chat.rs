use serde::{ Deserialize, Serialize };

use crate::llm::Provider;

/// Body of the generic failure response. Callers never see the cause.
pub const RELAY_FAILURE_MESSAGE: &str = "Failed to process message";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

fn default_provider() -> String {
    Provider::default().as_str().to_string()
}

/// `POST /api/chat` request body. `provider` stays a raw string so an
/// unknown value can be reported by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Envelope returned by the relay: exactly one of `message` or `error`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Message { message: String },
    Error { error: String },
}

impl ChatResponse {
    pub fn failure() -> Self {
        ChatResponse::Error { error: RELAY_FAILURE_MESSAGE.to_string() }
    }
}
