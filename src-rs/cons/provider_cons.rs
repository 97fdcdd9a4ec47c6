use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    Gemini,
    OpenAI,
    Claude,
}

impl LLMProvider {
    /// Returns the unique identifier used in configuration (e.g., "gemini", "claude")
    pub fn provider_name(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "gemini",
            LLMProvider::OpenAI => "openai",
            LLMProvider::Claude => "claude",
        }
    }

    /// Helper to parse from a string (handles aliases)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(LLMProvider::Gemini),
            "openai" => Some(LLMProvider::OpenAI),
            "claude" | "anthropic" => Some(LLMProvider::Claude),
            _ => None,
        }
    }

    /// The only vendor with a working adapter; also the fallback for unknown names.
    pub fn primary() -> Self {
        LLMProvider::Gemini
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "gemini-2.5-flash",
            LLMProvider::OpenAI => "gpt-4o",
            LLMProvider::Claude => "claude-3-5-sonnet-latest",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            LLMProvider::OpenAI => "https://api.openai.com/v1",
            LLMProvider::Claude => "https://api.anthropic.com",
        }
    }

    pub fn all() -> [LLMProvider; 3] {
        [LLMProvider::Gemini, LLMProvider::OpenAI, LLMProvider::Claude]
    }
}

// Ensure Display trait matches provider_name for convenience
impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.provider_name())
    }
}
