pub mod openai;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde_json::Value;

pub use openai::OpenAIClient;

/// One outbound call to a model API. Implementations return the reply body
/// untouched; making sense of its shape is the normalizer's job.
#[async_trait]
pub trait LLMClient {
    async fn respond(&self, config: &LLMConfig, payload: &Value) -> Result<Value>;
}

#[cfg(test)]
pub mod mock;
