pub mod openai;
pub mod zhipu;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::sync::Arc;

use self::openai::OpenAIChatClient;
use self::zhipu::ZhipuChatClient;
use super::{ LlmConfig, Provider, RelayError };
use crate::config::SecretSource;

/// A provider adapter: forwards one user message and returns the reply text.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// `model` is ignored by providers without model selection.
    async fn send(&self, message: &str, model: Option<&str>) -> Result<String, RelayError>;

    fn provider(&self) -> Provider;
}

/// Builds the adapter for `provider`, reading its API key from `secrets`.
pub fn new_client(
    provider: Provider,
    config: &LlmConfig,
    http: &HttpClient,
    secrets: &dyn SecretSource
) -> Result<Arc<dyn ChatClient>, RelayError> {
    let api_key = secrets
        .non_empty(provider.api_key_var())
        .ok_or_else(|| {
            RelayError::Configuration(
                format!("Missing {} environment variable", provider.api_key_var())
            )
        })?;
    let base_url = config.base_url(provider).to_string();

    let client: Arc<dyn ChatClient> = match provider {
        Provider::OpenAI => {
            let specific_client = OpenAIChatClient::new(http.clone(), api_key, base_url);
            Arc::new(specific_client)
        }
        Provider::Zhipu => {
            let specific_client = ZhipuChatClient::new(http.clone(), api_key, base_url);
            Arc::new(specific_client)
        }
    };
    Ok(client)
}

pub(crate) fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}
