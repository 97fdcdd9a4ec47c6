#![deny(clippy::all)]

pub mod llm;
pub mod config;
pub mod cons {
    pub mod provider_cons;
}
mod ffi;
pub mod reply;
pub mod session;


use napi::bindgen_prelude::Result;
use napi_derive::napi;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        use log::LevelFilter;
        use log4rs::append::file::FileAppender;
        use log4rs::config::{Appender, Config, Root};
        use log4rs::encode::pattern::PatternEncoder;

        // Try to load log4rs configuration from file first
        let config_path = std::env::var("LOG4RS_CONFIG").unwrap_or_else(|_| "log4rs.yaml".to_string());
        let _ = std::fs::create_dir_all("logs");
        if log4rs::init_file(config_path.clone(), Default::default()).is_ok() {
            println!("[INIT] Logger initialized from {}", config_path);
            return;
        }

        let pattern = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}";

        let logfile = match FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build("logs/tutorchat.log") {
            Ok(f) => f,
            Err(e) => {
                println!("[INIT] Failed to create log file: {}", e);
                return;
            }
        };

        let config = match Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(logfile)))
            .build(Root::builder()
                .appender("logfile")
                .build(LevelFilter::Info)) {
            Ok(c) => c,
            Err(e) => {
                println!("[INIT] Failed to build config: {}", e);
                return;
            }
        };

        if let Err(e) = log4rs::init_config(config) {
            println!("[INIT] Failed to initialize logger: {}", e);
        }
    });
}

fn load_config() -> Result<config::AppConfig> {
    config::AppConfig::load()
        .map_err(|e| napi::Error::from_reason(format!("Failed to load config: {}", e)))
}

/// Public configuration as JSON; the credential never leaves the core.
#[napi]
pub fn get_app_config() -> String {
    init_logger();
    let config = match config::AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config: {:?}", e);
            return "{}".to_string();
        }
    };
    serde_json::to_string(&config.to_public()).unwrap_or_else(|_| "{}".to_string())
}

#[napi(object)]
pub struct CoreProviderInfo {
    pub provider: String,
    #[napi(js_name = "defaultModel")]
    pub default_model: String,
    pub active: bool,
}

#[napi]
pub fn list_providers() -> Result<Vec<CoreProviderInfo>> {
    init_logger();
    let cfg = load_config()?;
    let active = llm::registry::resolve_provider(&cfg.active_provider);
    Ok(cons::provider_cons::LLMProvider::all()
        .into_iter()
        .map(|p| CoreProviderInfo {
            provider: p.provider_name().to_string(),
            default_model: cfg
                .provider(p.provider_name())
                .map(|c| c.default_model.clone())
                .unwrap_or_else(|| p.default_model().to_string()),
            active: p == active,
        })
        .collect())
}

#[napi]
pub fn get_active_provider() -> Result<String> {
    init_logger();
    let service = ffi::session_util::chat_service()?;
    Ok(service.registry().active_provider().to_string())
}

/// Parses a raw model reply into `{ text, blocks, quiz? }` JSON.
#[napi]
pub fn parse_reply(raw: String) -> Result<String> {
    let parsed = reply::parse_reply(&raw);
    serde_json::to_string(&parsed).map_err(|e| napi::Error::from_reason(e.to_string()))
}

/// Single prompt, no conversation state.
#[napi]
pub async fn generate_text(prompt: String) -> Result<String> {
    init_logger();
    let service = ffi::session_util::chat_service()?;
    service
        .generate_text(&prompt)
        .await
        .map_err(ffi::session_util::to_napi_error)
}

// Re-export FFI functions and types
pub use ffi::*;
