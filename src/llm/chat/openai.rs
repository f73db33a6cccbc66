use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };

use super::{ completions_url, ChatClient };
use crate::llm::error::provider_error;
use crate::llm::{ Provider, RelayError };

pub const OPENAI_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const OPENAI_FALLBACK_REPLY: &str = "Sorry, I could not process that.";

pub struct OpenAIChatClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct OpenAIMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage<'a>>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIReply>,
}

#[derive(Deserialize)]
struct OpenAIReply {
    content: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(http: HttpClient, api_key: String, base_url: String) -> Self {
        Self { http, api_key, base_url }
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn send(&self, message: &str, _model: Option<&str>) -> Result<String, RelayError> {
        let url = completions_url(&self.base_url);
        let req = OpenAIChatRequest {
            model: OPENAI_CHAT_MODEL,
            messages: vec![OpenAIMessage { role: "user", content: message }],
        };

        debug!("Sending OpenAI chat completion to {} (model {})", url, OPENAI_CHAT_MODEL);
        let resp = self.http.post(&url).bearer_auth(&self.api_key).json(&req).send().await?;
        if !resp.status().is_success() {
            return Err(provider_error("OpenAI", resp).await);
        }

        let body = resp.json::<OpenAIResponse>().await?;
        let content = body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| OPENAI_FALLBACK_REPLY.to_string());

        Ok(content)
    }

    fn provider(&self) -> Provider {
        Provider::OpenAI
    }
}
