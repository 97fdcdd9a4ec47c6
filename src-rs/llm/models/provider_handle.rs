use anyhow::Result;

use crate::config::AppConfig;
use crate::cons::provider_cons::LLMProvider;

use super::chat_session::ChatSession;
use super::claude::ClaudeClient;
use super::gemini::GeminiClient;
use super::openai::OpenAiClient;
pub use super::provider_base::{
    ChatConfig, Content, GenerateRequest, GenerateResponse, Part, ProviderClient, ResponseStream,
};

#[derive(Debug, Clone)]
pub enum AnyProviderClient {
    Gemini(GeminiClient),
    OpenAI(OpenAiClient),
    Claude(ClaudeClient),
}

impl AnyProviderClient {
    pub fn provider(&self) -> LLMProvider {
        match self {
            AnyProviderClient::Gemini(_) => LLMProvider::Gemini,
            AnyProviderClient::OpenAI(_) => LLMProvider::OpenAI,
            AnyProviderClient::Claude(_) => LLMProvider::Claude,
        }
    }
}

impl ProviderClient for AnyProviderClient {
    async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        match self {
            AnyProviderClient::Gemini(c) => c.generate_content(request).await,
            AnyProviderClient::OpenAI(c) => c.generate_content(request).await,
            AnyProviderClient::Claude(c) => c.generate_content(request).await,
        }
    }

    async fn generate_content_stream(&self, request: GenerateRequest) -> Result<ResponseStream> {
        match self {
            AnyProviderClient::Gemini(c) => c.generate_content_stream(request).await,
            AnyProviderClient::OpenAI(c) => c.generate_content_stream(request).await,
            AnyProviderClient::Claude(c) => c.generate_content_stream(request).await,
        }
    }

    fn create_chat(&self, config: ChatConfig) -> Result<ChatSession> {
        match self {
            AnyProviderClient::Gemini(c) => c.create_chat(config),
            AnyProviderClient::OpenAI(c) => c.create_chat(config),
            AnyProviderClient::Claude(c) => c.create_chat(config),
        }
    }
}

/// Base URL for `provider`: the configured one, else the vendor's public endpoint.
pub fn base_url_for(provider: LLMProvider, config: &AppConfig) -> String {
    config
        .provider(provider.provider_name())
        .map(|p| p.base_url.clone())
        .unwrap_or_else(|| provider.default_base_url().to_string())
}

pub fn create_client(provider: LLMProvider, base_url: String, api_key: String) -> AnyProviderClient {
    match provider {
        LLMProvider::Gemini => AnyProviderClient::Gemini(GeminiClient::new(base_url, api_key)),
        LLMProvider::OpenAI => AnyProviderClient::OpenAI(OpenAiClient::new(base_url, api_key)),
        LLMProvider::Claude => AnyProviderClient::Claude(ClaudeClient::new(base_url, api_key)),
    }
}
