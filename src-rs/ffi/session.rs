use napi::bindgen_prelude::*;
use napi_derive::napi;

use crate::llm::chat::TutorChat;
use crate::session::generate_session_id;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::session_util::{self, CoreAttachment, CoreChatMessage, CoreReply};

#[napi]
pub fn create_session_id() -> String {
    generate_session_id()
}

#[napi]
pub struct TutorSession {
    inner: Arc<Mutex<TutorChat>>,
    session_id: String,
}

#[napi]
impl TutorSession {
    #[napi(factory)]
    pub fn open(session_id: String) -> Result<Self> {
        crate::init_logger();
        let inner = session_util::open_session(&session_id)?;
        Ok(Self { inner, session_id })
    }

    #[napi(getter)]
    pub fn session_id(&self) -> String {
        self.session_id.clone()
    }

    #[napi]
    pub async fn send(&self, text: String, attachment: Option<CoreAttachment>) -> Result<CoreReply> {
        session_util::send_message(&self.session_id, &self.inner, text, attachment).await
    }

    #[napi]
    pub async fn history(&self) -> Result<Vec<CoreChatMessage>> {
        Ok(session_util::get_history(&self.inner).await)
    }

    #[napi]
    pub fn close(&self) -> Result<()> {
        session_util::close_session(&self.session_id);
        Ok(())
    }

    #[napi]
    pub fn get_sessions() -> Result<Vec<String>> {
        session_util::get_sessions()
    }
}
