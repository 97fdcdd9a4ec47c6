use anyhow::Result;

use crate::llm::error::ProviderError;
use crate::llm::models::chat_session::ChatSession;
use crate::llm::models::provider_base::{
    ChatConfig, GenerateRequest, GenerateResponse, ProviderClient, ResponseStream,
};

const PROVIDER: &str = "claude";

/// Anthropic is not wired up yet; see `OpenAiClient`.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    pub base_url: String,
    pub api_key: String,
}

impl ClaudeClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self { base_url, api_key }
    }

    fn unimplemented(operation: &'static str) -> anyhow::Error {
        log::warn!("Claude adapter called for {}, which is not implemented", operation);
        ProviderError::Unimplemented {
            provider: PROVIDER.to_string(),
            operation,
        }
        .into()
    }
}

impl ProviderClient for ClaudeClient {
    async fn generate_content(&self, _request: GenerateRequest) -> Result<GenerateResponse> {
        Err(Self::unimplemented("generate_content"))
    }

    async fn generate_content_stream(&self, _request: GenerateRequest) -> Result<ResponseStream> {
        Err(Self::unimplemented("generate_content_stream"))
    }

    fn create_chat(&self, _config: ChatConfig) -> Result<ChatSession> {
        Err(Self::unimplemented("create_chat"))
    }
}
