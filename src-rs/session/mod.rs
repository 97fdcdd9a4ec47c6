pub mod history;
pub mod id;
pub mod manager;
pub mod types;

pub use history::ChatHistory;
pub use id::{generate_session_id, validate_session_id};
pub use manager::{SessionManager, SESSION_MANAGER};
pub use types::{Attachment, ChatMessage, Sender};
