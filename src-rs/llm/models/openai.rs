use anyhow::Result;

use crate::llm::error::ProviderError;
use crate::llm::models::chat_session::ChatSession;
use crate::llm::models::provider_base::{
    ChatConfig, GenerateRequest, GenerateResponse, ProviderClient, ResponseStream,
};

const PROVIDER: &str = "openai";

/// Placeholder adapter. It accepts the same settings as the Gemini client so the
/// registry can build it, but every operation fails before any network I/O.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    pub api_base: String,
    pub api_key: String,
}

impl OpenAiClient {
    pub fn new(api_base: String, api_key: String) -> Self {
        Self { api_base, api_key }
    }

    fn unimplemented(operation: &'static str) -> anyhow::Error {
        log::warn!("OpenAI adapter called for {}, which is not implemented", operation);
        ProviderError::Unimplemented {
            provider: PROVIDER.to_string(),
            operation,
        }
        .into()
    }
}

impl ProviderClient for OpenAiClient {
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
