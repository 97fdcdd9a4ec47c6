pub mod session;
pub(crate) mod session_util;

pub use session::*;
pub use session_util::{CoreAttachment, CoreChatMessage, CoreQuiz, CoreReply};
