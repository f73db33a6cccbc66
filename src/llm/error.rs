use serde::Deserialize;
use thiserror::Error;

/// Failures the relay can hit while serving a chat request. All of them are
/// collapsed into the same response at the HTTP boundary.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct UpstreamErrorBody {
    error: Option<UpstreamErrorDetail>,
}

#[derive(Deserialize)]
struct UpstreamErrorDetail {
    message: Option<String>,
}

/// Pulls `error.message` out of an upstream error body, or "Unknown error".
pub fn upstream_error_message(body: &str) -> String {
    serde_json::from_str::<UpstreamErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|d| d.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Unknown error".to_string())
}

/// Turns a non-success upstream response into `RelayError::Provider`.
pub async fn provider_error(provider: &str, response: reqwest::Response) -> RelayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::error!("{} API error response ({}): {}", provider, status, body);
    RelayError::Provider(format!("{} API failed: {}", provider, upstream_error_message(&body)))
}
