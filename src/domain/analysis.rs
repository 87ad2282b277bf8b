use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

pub const NOT_STRICT_JSON_MESSAGE: &str = "Model did not return strict JSON";

/// Body of an inbound analysis request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(min = 1))]
    pub word: String,
}

impl AnalysisRequest {
    /// Reads a request body. Only a JSON object counts: serde's struct derive
    /// would also accept `["happy"]` as a positional `word`.
    pub fn from_json_body(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(body).ok()? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    pub fn trimmed_word(&self) -> &str {
        self.word.trim()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segments {
    pub prefix: Option<String>,
    pub root: Option<String>,
    pub suffix: Option<String>,
    #[serde(default)]
    pub other_morphemes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meaning {
    pub kr: String,
    pub en: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartRationale {
    pub prefix: Option<String>,
    pub root: Option<String>,
    pub suffix: Option<String>,
}

/// The shape the model is asked to produce. Only used to flag drift in logs;
/// responses pass the parsed JSON through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub word: String,
    pub segments: Segments,
    pub meaning: Meaning,
    pub etymology: String,
    pub why_each_part: PartRationale,
    pub mnemonic_image: String,
}

impl AnalysisResult {
    pub fn conforms(value: &Value) -> bool {
        serde_json::from_value::<AnalysisResult>(value.clone()).is_ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FallbackEnvelope {
    pub raw: String,
    pub error: String,
}

impl FallbackEnvelope {
    pub fn not_strict_json(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            error: NOT_STRICT_JSON_MESSAGE.to_string(),
        }
    }
}

/// What the caller receives with a 200: either the model's JSON or the raw
/// text tagged so it can be told apart.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Structured(Value),
    Fallback(FallbackEnvelope),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn happy() -> Value {
        json!({
            "word": "unhappiness",
            "segments": {
                "prefix": "un",
                "root": "happi",
                "suffix": "ness",
                "other_morphemes": []
            },
            "meaning": { "kr": "불행", "en": "the state of not being happy" },
            "etymology": "From Middle English 'hap', luck.",
            "why_each_part": {
                "prefix": "un- negates",
                "root": "happy, lucky",
                "suffix": "-ness forms a noun"
            },
            "mnemonic_image": "A frown under a rain cloud."
        })
    }

    #[test]
    fn test_request_rejects_empty_word() {
        let request: AnalysisRequest = serde_json::from_value(json!({ "word": "" })).unwrap();
        assert!(request.validate().is_err());

        let request: AnalysisRequest =
            serde_json::from_value(json!({ "word": "  happy " })).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.trimmed_word(), "happy");
    }

    #[test]
    fn test_request_requires_string_word() {
        assert!(serde_json::from_value::<AnalysisRequest>(json!({ "word": 42 })).is_err());
        assert!(serde_json::from_value::<AnalysisRequest>(json!({})).is_err());
    }

    #[test]
    fn test_body_must_be_an_object_with_string_word() {
        let request = AnalysisRequest::from_json_body(br#"{"word":"happy","extra":1}"#).unwrap();
        assert_eq!(request.word, "happy");

        assert!(AnalysisRequest::from_json_body(br#"["happy"]"#).is_none());
        assert!(AnalysisRequest::from_json_body(br#""happy""#).is_none());
        assert!(AnalysisRequest::from_json_body(br#"{"word":["happy"]}"#).is_none());
        assert!(AnalysisRequest::from_json_body(b"{word: happy").is_none());
        assert!(AnalysisRequest::from_json_body(b"").is_none());
    }

    #[test]
    fn test_conforms_accepts_full_schema() {
        assert!(AnalysisResult::conforms(&happy()));

        let mut nulls = happy();
        nulls["segments"]["prefix"] = Value::Null;
        nulls["segments"]["suffix"] = Value::Null;
        assert!(AnalysisResult::conforms(&nulls));
    }

    #[test]
    fn test_conforms_rejects_partial_object() {
        assert!(!AnalysisResult::conforms(&json!({ "word": "happy" })));
        assert!(!AnalysisResult::conforms(&json!([1, 2, 3])));
    }

    #[test]
    fn test_outcome_serializes_without_tag() {
        let fallback = AnalysisOutcome::Fallback(FallbackEnvelope::not_strict_json("not json"));
        assert_eq!(
            serde_json::to_value(&fallback).unwrap(),
            json!({ "raw": "not json", "error": "Model did not return strict JSON" })
        );

        let structured = AnalysisOutcome::Structured(json!({ "a": 1 }));
        assert_eq!(serde_json::to_value(&structured).unwrap(), json!({ "a": 1 }));
    }
}
