use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub enum MockReply {
    Body(Value),
    Upstream { status: u16, detail: String },
    Transport(String),
}

/// Canned replies plus a record of what was sent.
pub struct MockLLMClient {
    reply: MockReply,
    calls: AtomicUsize,
    last_payload: Mutex<Option<Value>>,
}

impl MockLLMClient {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn replying(body: Value) -> Self {
        Self::new(MockReply::Body(body))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<Value> {
        self.last_payload.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn respond(&self, _config: &LLMConfig, payload: &Value) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        match &self.reply {
            MockReply::Body(body) => Ok(body.clone()),
            MockReply::Upstream { status, detail } => Err(AppError::UpstreamError {
                status: *status,
                detail: detail.clone(),
            }),
            MockReply::Transport(msg) => Err(AppError::LLMError(msg.clone())),
        }
    }
}
