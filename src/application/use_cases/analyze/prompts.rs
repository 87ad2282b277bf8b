use crate::domain::llm_config::{LLMConfig, PayloadShape};
use serde_json::{json, Value};

pub(crate) const SYSTEM_PROMPT: &str =
    "You are a precise English morphology & etymology tutor. Return strict JSON only.";

pub(crate) const SCHEMA_PROMPT: &str = r#"Analyze the English word strictly as JSON with this schema:
{
  "word": string,
  "segments": { "prefix": string|null, "root": string|null, "suffix": string|null, "other_morphemes": string[] },
  "meaning": { "kr": string, "en": string },
  "etymology": string,
  "why_each_part": { "prefix": string, "root": string, "suffix": string },
  "mnemonic_image": string
}
Rules:
- If no clear prefix/suffix, set null.
- Keep it accurate; avoid hallucinating morphemes.
- 'etymology' 1-2 sentences.
- Output JSON only (no code fences)."#;

fn message(shape: PayloadShape, role: &str, text: &str) -> Value {
    match shape {
        PayloadShape::Plain => json!({ "role": role, "content": text }),
        PayloadShape::Typed => json!({
            "role": role,
            "content": [{ "type": "input_text", "text": text }]
        }),
    }
}

/// Responses API body for one word: persona, schema instructions, then the
/// word itself as the last user turn.
pub(crate) fn build_analysis_payload(config: &LLMConfig, word: &str) -> Value {
    let input: Vec<Value> = [
        ("system", SYSTEM_PROMPT),
        ("user", SCHEMA_PROMPT),
        ("user", word.trim()),
    ]
    .iter()
    .map(|(role, text)| message(config.payload_shape, role, text))
    .collect();

    let mut payload = json!({
        "model": config.model,
        "input": input,
        "max_output_tokens": config.token_budget(),
    });
    if config.json_mode {
        payload["text"] = json!({ "format": { "type": "json_object" } });
    }
    payload
}
