pub mod chat;
pub mod error;

use std::fmt;
use std::str::FromStr;

pub use error::RelayError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ZHIPU_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const ZHIPU_API_KEY_VAR: &str = "ZHIPU_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    OpenAI,
    Zhipu,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::OpenAI, Provider::Zhipu];

    /// Wire name, as sent in the `provider` field of a chat request.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Zhipu => "zhipu",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Zhipu => "Zhipu AI (ChatGLM)",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::OpenAI => OPENAI_API_KEY_VAR,
            Provider::Zhipu => ZHIPU_API_KEY_VAR,
        }
    }

    pub fn supports_model_selection(&self) -> bool {
        matches!(self, Provider::Zhipu)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Provider::OpenAI),
            "zhipu" => Ok(Provider::Zhipu),
            _ => Err(RelayError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Models offered for Zhipu in the chat widget. The relay itself forwards any
/// model name it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZhipuModel {
    #[default]
    Glm4,
    Glm4Flash,
    ChatglmTurbo,
    ChatglmStd,
    ChatglmLite,
}

impl ZhipuModel {
    pub const ALL: [ZhipuModel; 5] = [
        ZhipuModel::Glm4,
        ZhipuModel::Glm4Flash,
        ZhipuModel::ChatglmTurbo,
        ZhipuModel::ChatglmStd,
        ZhipuModel::ChatglmLite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZhipuModel::Glm4 => "glm-4",
            ZhipuModel::Glm4Flash => "glm-4-flash",
            ZhipuModel::ChatglmTurbo => "chatglm_turbo",
            ZhipuModel::ChatglmStd => "chatglm_std",
            ZhipuModel::ChatglmLite => "chatglm_lite",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ZhipuModel::Glm4 => "GLM-4 (Most Capable)",
            ZhipuModel::Glm4Flash => "GLM-4-Flash (Fast)",
            ZhipuModel::ChatglmTurbo => "ChatGLM Turbo (Balanced)",
            ZhipuModel::ChatglmStd => "ChatGLM Standard",
            ZhipuModel::ChatglmLite => "ChatGLM Lite (Fast)",
        }
    }
}

impl fmt::Display for ZhipuModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseZhipuModelError {
    message: String,
}

impl fmt::Display for ParseZhipuModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseZhipuModelError {}

impl FromStr for ZhipuModel {
    type Err = ParseZhipuModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZhipuModel::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseZhipuModelError {
                message: format!("Invalid Zhipu model: '{}'", s),
            })
    }
}

/// Upstream endpoints for each provider. Keys are not part of this config;
/// they are looked up per request.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai_base_url: String,
    pub zhipu_base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            zhipu_base_url: DEFAULT_ZHIPU_BASE_URL.to_string(),
        }
    }
}

impl LlmConfig {
    pub fn base_url(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAI => &self.openai_base_url,
            Provider::Zhipu => &self.zhipu_base_url,
        }
    }
}
