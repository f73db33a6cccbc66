use log::{ debug, error };
use reqwest::Client as HttpClient;
use std::sync::Arc;

use crate::config::{ EnvSecrets, SecretSource };
use crate::llm::chat::new_client;
use crate::llm::{ LlmConfig, Provider, RelayError };
use crate::models::chat::ChatRequest;

/// Forwards one chat message to the requested provider. Holds no per-call
/// state; keys are re-read from `secrets` on every request.
#[derive(Clone)]
pub struct Relay {
    http: HttpClient,
    config: LlmConfig,
    secrets: Arc<dyn SecretSource>,
}

impl Relay {
    pub fn new(config: LlmConfig, secrets: Arc<dyn SecretSource>) -> Self {
        Self { http: HttpClient::new(), config, secrets }
    }

    pub fn from_env(config: LlmConfig) -> Self {
        Self::new(config, Arc::new(EnvSecrets))
    }

    pub async fn relay(&self, request: &ChatRequest) -> Result<String, RelayError> {
        let provider: Provider = request.provider.parse()?;
        let client = new_client(provider, &self.config, &self.http, self.secrets.as_ref())?;

        let model = if provider.supports_model_selection() {
            request.model.as_deref()
        } else {
            None
        };

        debug!(
            "Relaying {} chars to {} (model {:?})",
            request.message.chars().count(),
            client.provider(),
            model
        );
        client.send(&request.message, model).await.map_err(|e| {
            error!("{} API error: {}", client.provider(), e);
            e
        })
    }
}
