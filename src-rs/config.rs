use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cons::provider_cons::LLMProvider;

/// User override configuration (restricted fields)
#[derive(Deserialize)]
pub struct UserOverrideConfig {
    pub active_provider: Option<String>,
    pub providers: Option<Vec<UserProviderConfig>>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
}

/// User provider configuration (matching user schema)
#[derive(Deserialize)]
pub struct UserProviderConfig {
    #[serde(rename = "provider_id", alias = "name")]
    pub provider_id: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(alias = "model_name")]
    pub default_model: String,
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name ("gemini", "openai", "claude")
    pub name: String,

    /// Base URL for the provider API
    pub base_url: String,

    /// Model used when the caller does not name one
    pub default_model: String,
}

fn default_active_provider() -> String {
    LLMProvider::primary().provider_name().to_string()
}

fn default_credential_env() -> String {
    "API_KEY".to_string()
}

/// Global application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider selected for the whole process
    #[serde(default = "default_active_provider")]
    pub active_provider: String,

    /// Environment variable holding the API key (shared by every provider)
    #[serde(default = "default_credential_env")]
    pub credential_env: String,

    /// Tutor persona and quiz contract sent as the system instruction
    #[serde(default)]
    pub system_prompt: Option<String>,

    #[serde(default)]
    pub temperature: Option<f32>,

    /// Per-provider endpoint and default model
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl AppConfig {
    /// Load configuration with layered strategy:
    /// 1. Defaults (Embedded Config.toml)
    /// 2. User Config (~/.tutorchat/tutorchat.json)
    /// 3. Project Config (./.tutorchat/tutorchat.json)
    pub fn load() -> Result<Self> {
        let mut config = Self::embedded()?;

        if let Some(home) = dirs::home_dir() {
            let user_path = home.join(".tutorchat").join("tutorchat.json");
            Self::apply_patch(&mut config, user_path);
        }

        let project_path = Path::new(".tutorchat").join("tutorchat.json");
        Self::apply_patch(&mut config, project_path);

        Ok(config)
    }

    /// The defaults compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let default_str = include_str!("../Config.toml");
        toml::from_str(default_str).context("Failed to parse embedded Config.toml")
    }

    pub(crate) fn apply_patch<P: AsRef<Path>>(config: &mut AppConfig, path: P) {
        let path = path.as_ref();
        if !path.exists() {
            return;
        }
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read config patch at {}: {}", path.display(), e);
                return;
            }
        };
        match serde_json::from_str::<UserOverrideConfig>(&content) {
            Ok(patch) => {
                log::debug!("Applying config patch from {}", path.display());
                config.merge(patch);
            }
            Err(e) => {
                log::warn!("Failed to parse config patch at {}: {}", path.display(), e);
            }
        }
    }

    pub(crate) fn merge(&mut self, patch: UserOverrideConfig) {
        if let Some(active) = patch.active_provider {
            let active = active.trim().to_string();
            if !active.is_empty() {
                self.active_provider = active;
            }
        }
        if let Some(prompt) = patch.system_prompt {
            self.system_prompt = Some(prompt);
        }
        if let Some(t) = patch.temperature {
            self.temperature = Some(t);
        }
        if let Some(providers) = patch.providers {
            for p in providers {
                if p.provider_id.trim().is_empty() || p.default_model.trim().is_empty() {
                    continue;
                }
                match self.providers.iter_mut().find(|c| c.name == p.provider_id) {
                    Some(existing) => {
                        existing.default_model = p.default_model;
                        if let Some(url) = p.base_url {
                            existing.base_url = url;
                        }
                    }
                    None => {
                        let Some(base_url) = p.base_url else {
                            log::warn!("Ignoring provider {} without base_url", p.provider_id);
                            continue;
                        };
                        self.providers.push(ProviderConfig {
                            name: p.provider_id,
                            base_url,
                            default_model: p.default_model,
                        });
                    }
                }
            }
        }
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn to_public(&self) -> PublicAppConfig {
        PublicAppConfig {
            active_provider: self.active_provider.clone(),
            temperature: self.temperature,
            providers: self
                .providers
                .iter()
                .map(|p| PublicProviderConfig {
                    name: p.name.clone(),
                    default_model: p.default_model.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicAppConfig {
    pub active_provider: String,
    pub temperature: Option<f32>,
    pub providers: Vec<PublicProviderConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicProviderConfig {
    pub name: String,
    pub default_model: String,
}
