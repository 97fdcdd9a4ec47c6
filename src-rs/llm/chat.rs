use anyhow::Result;
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;

use crate::config::AppConfig;
use crate::llm::models::chat_session::ChatSession;
use crate::llm::models::provider_handle::{
    ChatConfig, GenerateRequest, GenerateResponse, Part, ProviderClient, ResponseStream,
};
use crate::llm::models::provider_base::GenerationConfig;
use crate::llm::registry::ProviderRegistry;
use crate::llm::utils::string_util::log_preview;
use crate::reply::parse_reply;
use crate::session::history::ChatHistory;
use crate::session::types::{Attachment, ChatMessage};

/// Entry point used by the UI layer. Every call goes through the registry's
/// single provider client.
pub struct ChatService {
    registry: Arc<ProviderRegistry>,
    generation: GenerationConfig,
}

impl ChatService {
    pub fn new(registry: Arc<ProviderRegistry>, config: &AppConfig) -> Self {
        Self {
            registry,
            generation: GenerationConfig {
                system_instruction: config
                    .system_prompt
                    .as_ref()
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
                temperature: config.temperature,
                max_output_tokens: None,
            },
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    pub async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let client = self.registry.get()?;
        client.generate_content(request).await
    }

    pub async fn generate_content_stream(&self, request: GenerateRequest) -> Result<ResponseStream> {
        let client = self.registry.get()?;
        client.generate_content_stream(request).await
    }

    pub fn create_chat(&self, config: ChatConfig) -> Result<ChatSession> {
        let client = self.registry.get()?;
        client.create_chat(config)
    }

    /// One-shot prompt with the configured model and tutor instruction.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::from_prompt(self.registry.model(), prompt)
            .with_config(self.generation.clone());
        Ok(self.generate_content(request).await?.text)
    }

    pub async fn stream_text(
        &self,
        prompt: &str,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String>> + Send>>> {
        let request = GenerateRequest::from_prompt(self.registry.model(), prompt)
            .with_config(self.generation.clone());
        let stream = self.generate_content_stream(request).await?;
        Ok(Box::pin(futures::StreamExt::map(stream, |chunk| {
            chunk.map(|c| c.text)
        })))
    }

    /// Opens a tutoring conversation with an empty history.
    pub fn start_tutoring(&self) -> Result<TutorChat> {
        let session = self.create_chat(ChatConfig {
            model: self.registry.model().to_string(),
            config: self.generation.clone(),
            history: Vec::new(),
        })?;
        Ok(TutorChat {
            session,
            history: ChatHistory::new(),
        })
    }
}

/// Builds the parts sent for one user message.
pub fn message_parts(text: &str, attachment: Option<&Attachment>) -> Result<Vec<Part>> {
    let text = text.trim();
    let mut parts = Vec::new();

    let mut prompt = text.to_string();
    if let Some(Attachment::Pdf { name }) = attachment {
        if !prompt.is_empty() {
            prompt.push_str("\n\n");
        }
        prompt.push_str(&format!("(Attached PDF: {})", name));
    }
    if !prompt.is_empty() {
        parts.push(Part::text(prompt));
    }

    if let Some(Attachment::Image { mime_type, data }) = attachment {
        parts.push(Part::inline_data(mime_type.clone(), data.clone()));
    }

    if parts.is_empty() {
        anyhow::bail!("Message has neither text nor attachment");
    }
    Ok(parts)
}

/// A conversation as the UI sees it: the provider chat plus displayed messages.
pub struct TutorChat {
    session: ChatSession,
    history: ChatHistory,
}

impl TutorChat {
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn model(&self) -> &str {
        self.session.model()
    }

    /// Sends one user message and returns the bot reply.
    ///
    /// The user message is recorded before the request. On failure no bot
    /// message is added and the error is returned for the UI to display.
    pub async fn send_message(
        &mut self,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<ChatMessage> {
        let parts = message_parts(text, attachment.as_ref())?;
        self.history.push(ChatMessage::user(text.trim(), attachment));

        let response = match self.session.send_message(parts).await {
            Ok(r) => r,
            Err(e) => {
                log::error!("Tutor chat request failed: {:#}", e);
                return Err(e);
            }
        };

        log::debug!(
            "Tutor reply: {}",
            log_preview(&response.text, 200)
        );
        let parsed = parse_reply(&response.text);
        if parsed.quiz.is_some() {
            log::info!("Tutor reply carries a quiz");
        }

        let bot = ChatMessage::bot(parsed.text, parsed.quiz);
        self.history.push(bot.clone());
        Ok(bot)
    }
}
