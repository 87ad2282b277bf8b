mod prompts;

use crate::domain::analysis::{AnalysisOutcome, AnalysisRequest, AnalysisResult};
use crate::domain::error::{AppError, Result, MISSING_API_KEY_MESSAGE};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::recover_json;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use prompts::build_analysis_payload;

pub const WORD_REQUIRED_MESSAGE: &str = "word is required";

fn word_required() -> AppError {
    AppError::ValidationError(WORD_REQUIRED_MESSAGE.to_string())
}

pub struct AnalyzeUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
}

impl AnalyzeUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, config: LLMConfig) -> Self {
        Self { llm_client, config }
    }

    fn ensure_configured(&self) -> Result<()> {
        match self.config.api_key() {
            Some(_) => Ok(()),
            None => Err(AppError::ConfigError(MISSING_API_KEY_MESSAGE.to_string())),
        }
    }

    /// Checks the credential before looking at the body, so a misconfigured
    /// server answers 500 whatever the caller sent.
    pub async fn execute(&self, body: &[u8]) -> Result<AnalysisOutcome> {
        self.ensure_configured()?;
        let request = AnalysisRequest::from_json_body(body).ok_or_else(word_required)?;
        request.validate().map_err(|_| word_required())?;
        // Stricter than a bare non-empty check: a whitespace-only word would
        // reach the model as an empty message.
        let word = request.trimmed_word();
        if word.is_empty() {
            return Err(word_required());
        }

        info!("Analyzing '{}' (model={})", word, self.config.model);
        let payload = build_analysis_payload(&self.config, word);
        let reply = self.llm_client.respond(&self.config, &payload).await?;

        let outcome = recover_json(&reply);
        match &outcome {
            AnalysisOutcome::Structured(value) if !AnalysisResult::conforms(value) => {
                warn!("Analysis of '{}' does not match the requested schema", word);
            }
            AnalysisOutcome::Fallback(envelope) => {
                warn!(
                    "Model did not return strict JSON for '{}' ({} bytes of raw text)",
                    word,
                    envelope.raw.len()
                );
            }
            AnalysisOutcome::Structured(_) => {}
        }
        Ok(outcome)
    }
}
