pub mod analysis;
pub mod error;
pub mod llm_config;
