use anyhow::Result;

use super::provider_base::{
    ChatConfig, Content, GenerateRequest, GenerateResponse, Part, ProviderClient,
};
use super::provider_handle::AnyProviderClient;

/// Stateful multi-turn conversation bound to one provider client.
///
/// The whole history is resent on every turn. A turn is only recorded once
/// the provider answered, so a failed `send_message` leaves the history as it
/// was.
pub struct ChatSession {
    client: AnyProviderClient,
    config: ChatConfig,
}

impl ChatSession {
    pub fn new(client: AnyProviderClient, config: ChatConfig) -> Self {
        Self { client, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn history(&self) -> &[Content] {
        &self.config.history
    }

    pub async fn send_message(&mut self, parts: Vec<Part>) -> Result<GenerateResponse> {
        let user_turn = Content::user(parts);
        let mut contents = self.config.history.clone();
        contents.push(user_turn.clone());

        let request = GenerateRequest {
            model: self.config.model.clone(),
            contents,
            config: self.config.config.clone(),
        };

        log::debug!(
            "ChatSession send, model={} turns={}",
            self.config.model,
            request.contents.len()
        );
        let response = self.client.generate_content(request).await?;

        self.config.history.push(user_turn);
        self.config.history.push(Content::model(response.text.clone()));
        Ok(response)
    }
}
