use super::LLMClient;
use crate::domain::error::{AppError, Result, MISSING_API_KEY_MESSAGE};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the OpenAI Responses API. Requests are bounded by the configured
/// timeout and never retried, since every attempt is billed.
pub struct OpenAIClient {
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn api_key(config: &LLMConfig) -> Result<&str> {
        config
            .api_key()
            .ok_or_else(|| AppError::ConfigError(MISSING_API_KEY_MESSAGE.to_string()))
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn respond(&self, config: &LLMConfig, payload: &Value) -> Result<Value> {
        let api_key = Self::api_key(config)?;
        let url = config.responses_url();
        debug!("POST {} (model={})", url, config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            warn!("OpenAI returned {}: {}", status, detail);
            return Err(AppError::UpstreamError {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))
    }
}
