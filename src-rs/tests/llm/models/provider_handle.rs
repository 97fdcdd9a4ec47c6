use crate::config::AppConfig;
use crate::cons::provider_cons::LLMProvider;
use crate::llm::error::ProviderError;
use crate::llm::models::provider_handle::{
    base_url_for, create_client, AnyProviderClient, GenerateRequest, ProviderClient,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_client_matches_requested_vendor() {
        for provider in LLMProvider::all() {
            let client = create_client(provider, "http://localhost".to_string(), "k".to_string());
            assert_eq!(client.provider(), provider);
        }
    }

    #[test]
    fn gemini_client_keeps_base_url_and_key() {
        let client = create_client(
            LLMProvider::Gemini,
            "http://localhost:8080/v1beta".to_string(),
            "secret".to_string(),
        );
        match client {
            AnyProviderClient::Gemini(c) => {
                assert_eq!(c.base_url, "http://localhost:8080/v1beta");
                assert_eq!(c.api_key, "secret");
            }
            other => panic!("expected gemini client, got {:?}", other.provider()),
        }
    }

    #[test]
    fn base_url_prefers_config_then_vendor_default() {
        let mut cfg = AppConfig::embedded().expect("embedded config");
        cfg.providers.retain(|p| p.name != "claude");
        if let Some(g) = cfg.providers.iter_mut().find(|p| p.name == "gemini") {
            g.base_url = "http://proxy.local/gemini".to_string();
        }

        assert_eq!(base_url_for(LLMProvider::Gemini, &cfg), "http://proxy.local/gemini");
        assert_eq!(
            base_url_for(LLMProvider::Claude, &cfg),
            LLMProvider::Claude.default_base_url()
        );
    }

    #[tokio::test]
    async fn dispatch_reaches_the_stub_adapter() {
        let client = create_client(LLMProvider::OpenAI, "http://127.0.0.1:9".to_string(), "k".to_string());
        let err = client
            .generate_content(GenerateRequest::from_prompt("gpt-4o", "hi"))
            .await
            .expect_err("should fail");
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Unimplemented { provider, .. }) if provider == "openai"
        ));
    }
}
