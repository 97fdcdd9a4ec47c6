use napi::bindgen_prelude::*;
use napi_derive::napi;

use crate::config::AppConfig;
use crate::llm::chat::{ChatService, TutorChat};
use crate::llm::registry::ProviderRegistry;
use crate::reply::{parse_blocks, QuizPayload};
use crate::session::types::{Attachment, ChatMessage};
use crate::session::{validate_session_id, SESSION_MANAGER};

use lazy_static::lazy_static;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;

lazy_static! {
    static ref CHAT_SERVICE: StdMutex<Option<Arc<ChatService>>> = StdMutex::new(None);
}

pub(crate) fn to_napi_error(e: anyhow::Error) -> Error {
    Error::from_reason(format!("{:#}", e))
}

/// The process-wide service, built from configuration on first use.
pub(crate) fn chat_service() -> Result<Arc<ChatService>> {
    let mut guard = CHAT_SERVICE
        .lock()
        .map_err(|_| Error::from_reason("Chat service lock poisoned"))?;
    if let Some(existing) = guard.as_ref() {
        return Ok(Arc::clone(existing));
    }

    let config = AppConfig::load()
        .map_err(|e| Error::from_reason(format!("Failed to load config: {}", e)))?;
    let registry = Arc::new(ProviderRegistry::from_env(&config));
    log::info!(
        "Chat service ready, provider={} model={}",
        registry.active_provider(),
        registry.model()
    );
    let service = Arc::new(ChatService::new(registry, &config));
    *guard = Some(Arc::clone(&service));
    Ok(service)
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct CoreAttachment {
    /// "image" or "pdf"
    pub kind: String,
    #[napi(js_name = "mimeType")]
    pub mime_type: Option<String>,
    /// Base64 payload or data URL, images only
    pub data: Option<String>,
    /// File name, PDFs only
    pub name: Option<String>,
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct CoreQuiz {
    pub question: String,
    pub options: Vec<String>,
    #[napi(js_name = "correctAnswer")]
    pub correct_answer: String,
    pub explanation: String,
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct CoreChatMessage {
    /// "user" or "bot"
    pub sender: String,
    pub text: String,
    pub timestamp: i64,
    pub attachment: Option<CoreAttachment>,
    pub quiz: Option<CoreQuiz>,
}

#[napi(object)]
pub struct CoreReply {
    pub message: CoreChatMessage,
    /// JSON array of content blocks for `message.text`
    #[napi(js_name = "blocksJson")]
    pub blocks_json: String,
}

pub(crate) fn attachment_from_core(core: CoreAttachment) -> anyhow::Result<Attachment> {
    match core.kind.trim().to_lowercase().as_str() {
        "image" => {
            let data = core
                .data
                .filter(|d| !d.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("Image attachment without data"))?;
            let mime = core.mime_type.unwrap_or_else(|| "image/png".to_string());
            Ok(Attachment::image_from_data(&mime, &data))
        }
        "pdf" => {
            let name = core
                .name
                .filter(|n| !n.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("PDF attachment without name"))?;
            Ok(Attachment::Pdf { name })
        }
        other => anyhow::bail!("Unsupported attachment kind: {}", other),
    }
}

pub(crate) fn attachment_to_core(attachment: &Attachment) -> CoreAttachment {
    match attachment {
        Attachment::Image { mime_type, data } => CoreAttachment {
            kind: "image".to_string(),
            mime_type: Some(mime_type.clone()),
            data: Some(data.clone()),
            name: None,
        },
        Attachment::Pdf { name } => CoreAttachment {
            kind: "pdf".to_string(),
            mime_type: Some("application/pdf".to_string()),
            data: None,
            name: Some(name.clone()),
        },
    }
}

pub(crate) fn quiz_to_core(quiz: &QuizPayload) -> CoreQuiz {
    CoreQuiz {
        question: quiz.question.clone(),
        options: quiz.options.clone(),
        correct_answer: quiz.correct_answer.clone(),
        explanation: quiz.explanation.clone(),
    }
}

pub(crate) fn message_to_core(message: &ChatMessage) -> CoreChatMessage {
    CoreChatMessage {
        sender: message.sender.as_str().to_string(),
        text: message.text.clone(),
        timestamp: message.timestamp_ms,
        attachment: message.attachment.as_ref().map(attachment_to_core),
        quiz: message.quiz.as_ref().map(quiz_to_core),
    }
}

pub(crate) fn reply_to_core(message: &ChatMessage) -> anyhow::Result<CoreReply> {
    let blocks = parse_blocks(&message.text);
    Ok(CoreReply {
        message: message_to_core(message),
        blocks_json: serde_json::to_string(&blocks)?,
    })
}

pub(crate) fn open_session(session_id: &str) -> Result<Arc<Mutex<TutorChat>>> {
    validate_session_id(session_id).map_err(to_napi_error)?;

    if let Ok(manager) = SESSION_MANAGER.lock() {
        if let Some(existing) = manager.get(session_id) {
            return Ok(existing);
        }
    }

    let service = chat_service()?;
    let chat = service.start_tutoring().map_err(to_napi_error)?;

    let mut manager = SESSION_MANAGER
        .lock()
        .map_err(|_| Error::from_reason("Session manager lock poisoned"))?;
    log::info!(target: "tutor_session", "open session_id={} model={}", session_id, chat.model());
    Ok(manager.add(session_id.to_string(), chat))
}

pub(crate) async fn send_message(
    session_id: &str,
    chat: &Arc<Mutex<TutorChat>>,
    text: String,
    attachment: Option<CoreAttachment>,
) -> Result<CoreReply> {
    let attachment = attachment
        .map(attachment_from_core)
        .transpose()
        .map_err(to_napi_error)?;

    let mut guard = chat.lock().await;
    log::info!(
        target: "tutor_session",
        "send session_id={} chars={} attachment={}",
        session_id,
        text.len(),
        attachment.is_some()
    );
    let reply = guard
        .send_message(&text, attachment)
        .await
        .map_err(to_napi_error)?;
    reply_to_core(&reply).map_err(to_napi_error)
}

pub(crate) async fn get_history(chat: &Arc<Mutex<TutorChat>>) -> Vec<CoreChatMessage> {
    let guard = chat.lock().await;
    guard.history().messages().iter().map(message_to_core).collect()
}

pub(crate) fn close_session(session_id: &str) {
    if let Ok(mut manager) = SESSION_MANAGER.lock() {
        if manager.remove(session_id).is_some() {
            log::info!(target: "tutor_session", "close session_id={}", session_id);
        }
    }
}

pub(crate) fn get_sessions() -> Result<Vec<String>> {
    let manager = SESSION_MANAGER
        .lock()
        .map_err(|_| Error::from_reason("Session manager lock poisoned"))?;
    Ok(manager.list_ids())
}
