use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

pub const MISSING_API_KEY_MESSAGE: &str = "server misconfig: missing OPENAI_API_KEY";
pub const UPSTREAM_ERROR_MESSAGE: &str = "OpenAI error";

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ConfigError(String),
    ValidationError(String),
    LLMError(String),
    UpstreamError { status: u16, detail: String },
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::LLMError(msg) => write!(f, "LLM error: {}", msg),
            AppError::UpstreamError { status, detail } => {
                write!(f, "Upstream error ({}): {}", status, detail)
            }
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl AppError {
    /// The message placed in the `error` field of the response envelope.
    /// Callers see the bare message, not the `Display` prefix used in logs.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::Internal(msg)
            | AppError::ConfigError(msg)
            | AppError::ValidationError(msg)
            | AppError::LLMError(msg)
            | AppError::IoError(msg) => msg.as_str(),
            AppError::UpstreamError { .. } => UPSTREAM_ERROR_MESSAGE,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_)
            | AppError::ConfigError(_)
            | AppError::LLMError(_)
            | AppError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::UpstreamError { detail, .. } => json!({
                "error": UPSTREAM_ERROR_MESSAGE,
                "detail": detail,
            }),
            other => json!({ "error": other.public_message() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
