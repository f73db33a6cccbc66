use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use thiserror::Error;

use crate::models::chat::ChatRequest;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("request to relay failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay responded with status {0}")]
    Status(u16),
}

/// How the widget reaches the relay.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn post_chat(&self, request: &ChatRequest) -> Result<String, WidgetError>;
}

#[derive(Deserialize)]
struct RelayReply {
    message: String,
}

/// Posts to `{relay_url}/api/chat`.
#[derive(Clone)]
pub struct HttpRelayTransport {
    http: HttpClient,
    endpoint: String,
}

impl HttpRelayTransport {
    pub fn new(relay_url: &str) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint: format!("{}/api/chat", relay_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn post_chat(&self, request: &ChatRequest) -> Result<String, WidgetError> {
        debug!("POST {} (provider {})", self.endpoint, request.provider);
        let resp = self.http.post(&self.endpoint).json(request).send().await?;
        if !resp.status().is_success() {
            return Err(WidgetError::Status(resp.status().as_u16()));
        }
        let reply = resp.json::<RelayReply>().await?;
        Ok(reply.message)
    }
}
