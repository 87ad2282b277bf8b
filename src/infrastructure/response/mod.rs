//! Flattens the variably shaped replies of the Responses API (and its
//! predecessors) into one text blob, then recovers JSON from it.

use crate::domain::analysis::{AnalysisOutcome, FallbackEnvelope};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static CODE_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?i:json)?[ \t]*\r?\n?([\s\S]*?)\s*```$").unwrap());

/// The reply shapes we know how to read, in the order they are tried.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyShape<'a> {
    /// Top-level `output_text` convenience field.
    OutputText(&'a Value),
    /// `output[*].content[*].text`, whatever the entry's `type` tag says.
    OutputItems(Vec<&'a str>),
    /// `choices[0].message.content` from the chat completions API.
    LegacyChoice(&'a str),
    /// Flat `summary_text`.
    Summary(&'a str),
    Unrecognized,
}

impl<'a> ReplyShape<'a> {
    pub fn resolve(reply: &'a Value) -> Self {
        if let Some(text) = reply.get("output_text").filter(|v| is_truthy(v)) {
            return ReplyShape::OutputText(text);
        }

        let fragments: Vec<&str> = reply
            .get("output")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|item| item.get("content").and_then(Value::as_array))
            .flatten()
            .filter_map(|entry| entry.get("text").and_then(Value::as_str))
            .collect();
        if !fragments.is_empty() {
            return ReplyShape::OutputItems(fragments);
        }

        if let Some(content) = reply
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
        {
            return ReplyShape::LegacyChoice(content);
        }

        if let Some(summary) = reply.get("summary_text").and_then(Value::as_str) {
            return ReplyShape::Summary(summary);
        }

        ReplyShape::Unrecognized
    }

    pub fn into_text(self) -> String {
        match self {
            ReplyShape::OutputText(Value::Array(parts)) => parts
                .iter()
                .map(coerce_to_string)
                .collect::<Vec<_>>()
                .join("\n"),
            ReplyShape::OutputText(value) => coerce_to_string(value),
            ReplyShape::OutputItems(fragments) => fragments.join("\n"),
            ReplyShape::LegacyChoice(text) | ReplyShape::Summary(text) => text.to_string(),
            ReplyShape::Unrecognized => String::new(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Normalized text of a raw reply, or an empty string when nothing is readable.
pub fn extract_text(reply: &Value) -> String {
    ReplyShape::resolve(reply).into_text()
}

/// Removes a wrapping ```` ```json ```` / ```` ``` ```` fence, if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    CODE_FENCE_PATTERN
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(trimmed)
}

/// Parses the model output strictly, falling back to a tagged envelope.
/// When no text could be extracted at all, the envelope carries the whole
/// reply so the caller can see what came back.
pub fn recover_json(reply: &Value) -> AnalysisOutcome {
    let text = extract_text(reply);
    let trimmed = text.trim();

    match serde_json::from_str::<Value>(strip_code_fence(trimmed)) {
        Ok(parsed) => AnalysisOutcome::Structured(parsed),
        Err(_) if trimmed.is_empty() => {
            AnalysisOutcome::Fallback(FallbackEnvelope::not_strict_json(reply.to_string()))
        }
        Err(_) => AnalysisOutcome::Fallback(FallbackEnvelope::not_strict_json(trimmed)),
    }
}
