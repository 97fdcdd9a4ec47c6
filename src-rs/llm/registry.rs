use anyhow::Result;
use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::cons::provider_cons::LLMProvider;
use crate::llm::error::ProviderError;
use crate::llm::models::provider_handle::{base_url_for, create_client, AnyProviderClient};

/// Resolves the configured provider name, falling back to the primary vendor.
pub fn resolve_provider(name: &str) -> LLMProvider {
    match LLMProvider::from_name(name) {
        Some(p) => p,
        None => {
            let fallback = LLMProvider::primary();
            log::warn!(
                "Unknown provider '{}' in configuration, falling back to {}",
                name,
                fallback
            );
            fallback
        }
    }
}

fn model_for(provider: LLMProvider, config: &AppConfig) -> String {
    config
        .provider(provider.provider_name())
        .map(|p| p.default_model.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| provider.default_model().to_string())
}

/// Holds the single provider client for the process.
///
/// The client is built on the first `get` and reused afterwards. The selection
/// is fixed at construction; there is no way to switch or reset it.
pub struct ProviderRegistry {
    provider: LLMProvider,
    model: String,
    base_url: String,
    credential_env: String,
    credential: Option<String>,
    client: Mutex<Option<Arc<AnyProviderClient>>>,
}

impl ProviderRegistry {
    pub fn new(config: &AppConfig, credential: Option<String>) -> Self {
        let provider = resolve_provider(&config.active_provider);
        Self {
            provider,
            model: model_for(provider, config),
            base_url: base_url_for(provider, config),
            credential_env: config.credential_env.clone(),
            credential: credential.filter(|c| !c.trim().is_empty()),
            client: Mutex::new(None),
        }
    }

    /// Uses an already built client instead of creating one on first `get`.
    pub fn with_client(config: &AppConfig, client: AnyProviderClient) -> Self {
        let provider = client.provider();
        Self {
            provider,
            model: model_for(provider, config),
            base_url: base_url_for(provider, config),
            credential_env: config.credential_env.clone(),
            credential: None,
            client: Mutex::new(Some(Arc::new(client))),
        }
    }

    /// Reads the credential from the environment (after loading `.env`).
    pub fn from_env(config: &AppConfig) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }
        let credential = std::env::var(&config.credential_env).ok();
        Self::new(config, credential)
    }

    pub fn active_provider(&self) -> LLMProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn get(&self) -> Result<Arc<AnyProviderClient>> {
        let mut guard = self
            .client
            .lock()
            .map_err(|_| anyhow::anyhow!("Provider registry lock poisoned"))?;

        if let Some(existing) = guard.as_ref() {
            return Ok(Arc::clone(existing));
        }

        let Some(api_key) = self.credential.clone() else {
            log::error!(
                "Cannot create {} client: {} is not set",
                self.provider,
                self.credential_env
            );
            return Err(ProviderError::MissingCredential {
                var: self.credential_env.clone(),
            }
            .into());
        };

        log::info!(
            "Creating {} client (model={}, base_url={})",
            self.provider,
            self.model,
            self.base_url
        );
        let client = Arc::new(create_client(self.provider, self.base_url.clone(), api_key));
        *guard = Some(Arc::clone(&client));
        Ok(client)
    }
}
