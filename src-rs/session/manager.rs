use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use lazy_static::lazy_static;
use tokio::sync::Mutex;

use crate::llm::chat::TutorChat;

/// Open conversations keyed by session id.
///
/// The async mutex around each chat serializes requests, so a session never
/// has more than one request in flight.
pub struct SessionManager {
    sessions: HashMap<String, Arc<Mutex<TutorChat>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    pub fn get(&self, session_id: &str) -> Option<Arc<Mutex<TutorChat>>> {
        self.sessions.get(session_id).cloned()
    }

    pub fn add(&mut self, session_id: String, chat: TutorChat) -> Arc<Mutex<TutorChat>> {
        let chat = Arc::new(Mutex::new(chat));
        self.sessions.insert(session_id, Arc::clone(&chat));
        chat
    }

    pub fn remove(&mut self, session_id: &str) -> Option<Arc<Mutex<TutorChat>>> {
        self.sessions.remove(session_id)
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.sessions.keys().cloned().collect()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    pub static ref SESSION_MANAGER: StdMutex<SessionManager> = StdMutex::new(SessionManager::new());
}
