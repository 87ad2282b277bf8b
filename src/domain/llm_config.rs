use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 600;
pub const MIN_OUTPUT_TOKENS: u32 = 16;
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// How message content is laid out in the outbound payload.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    /// `{ role, content: "text" }`
    Plain,
    /// `{ role, content: [{ type: "input_text", text }] }`
    #[default]
    Typed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_output_tokens: u32,
    pub json_mode: bool,
    pub payload_shape: PayloadShape,
    pub request_timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-5-mini".to_string(),
            api_key: None,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            json_mode: true,
            payload_shape: PayloadShape::default(),
            request_timeout_secs: 30,
        }
    }
}

impl LLMConfig {
    /// The bearer token, if one is configured and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn token_budget(&self) -> u32 {
        self.max_output_tokens
            .clamp(MIN_OUTPUT_TOKENS, MAX_OUTPUT_TOKENS)
    }

    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}
