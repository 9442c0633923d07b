pub mod openai;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;

pub use openai::OpenAIClient;

/// Request/response boundary to a summarization model.
///
/// Failures come back as `AppError::LLMError` with the provider's reason
/// intact; retrying is left to the caller.
#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String>;
}
