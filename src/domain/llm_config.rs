use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum LLMProvider {
    OpenAI,
    OpenRouter,
    Local,
}

/// Settings for the summarization endpoint. Built once at startup and
/// passed to every call; nothing reads credentials from ambient state.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAI,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            api_key: None,
            max_tokens: Some(1024),
            temperature: Some(0.7),
            timeout_secs: 120,
        }
    }
}

impl LLMConfig {
    /// Local servers accept requests without a key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self.provider, LLMProvider::Local)
    }

    pub fn endpoint(&self, path: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
