use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::AnalyzeUseCase;
use crate::domain::error::Result;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::llm_clients::OpenAIClient;
use crate::interfaces::http::start_server;

pub async fn run() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = ConfigService::new().load()?;
    if config.llm.api_key().is_none() {
        warn!("OPENAI_API_KEY is not set; /analyze will answer 500 until it is");
    }
    info!(
        model = %config.llm.model,
        base_url = %config.llm.base_url,
        timeout_secs = config.llm.request_timeout_secs,
        "LLM client configured"
    );

    let llm_client = Arc::new(OpenAIClient::new(&config.llm)?);
    let analyze_use_case = AnalyzeUseCase::new(llm_client, config.llm.clone());

    start_server(&config.server, analyze_use_case)?.await?;
    Ok(())
}
