use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };

use super::{ completions_url, ChatClient };
use crate::llm::error::provider_error;
use crate::llm::{ Provider, RelayError, ZhipuModel };

const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.7;
const MAX_TOKENS: u32 = 1500;

pub struct ZhipuChatClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct ZhipuMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ZhipuRequest<'a> {
    model: &'a str,
    messages: Vec<ZhipuMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ZhipuResponse {
    #[serde(default)]
    choices: Vec<ZhipuChoice>,
}

#[derive(Deserialize)]
struct ZhipuChoice {
    message: Option<ZhipuReply>,
}

#[derive(Deserialize)]
struct ZhipuReply {
    content: Option<String>,
}

impl ZhipuChatClient {
    pub fn new(http: HttpClient, api_key: String, base_url: String) -> Self {
        Self { http, api_key, base_url }
    }
}

/// Model actually sent upstream; blank or absent selects `glm-4`.
pub fn effective_model(model: Option<&str>) -> &str {
    model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(ZhipuModel::default().as_str())
}

#[async_trait]
impl ChatClient for ZhipuChatClient {
    async fn send(&self, message: &str, model: Option<&str>) -> Result<String, RelayError> {
        let url = completions_url(&self.base_url);
        let req = ZhipuRequest {
            model: effective_model(model),
            messages: vec![ZhipuMessage {
                role: "user".to_string(),
                content: message.to_string(),
            }],
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_TOKENS,
        };

        debug!("Sending Zhipu chat completion to {} (model {})", url, req.model);
        let resp = self.http.post(&url).bearer_auth(&self.api_key).json(&req).send().await?;
        if !resp.status().is_success() {
            return Err(provider_error("Zhipu", resp).await);
        }

        let body = resp.json::<ZhipuResponse>().await?;
        let content = body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| RelayError::Provider("No response from Zhipu API".to_string()))?;

        Ok(content)
    }

    fn provider(&self) -> Provider {
        Provider::Zhipu
    }
}
