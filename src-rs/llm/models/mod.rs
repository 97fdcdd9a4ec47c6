// Provider contract, vendor adapters and the chat session handle

pub mod provider_handle;
pub mod provider_base;
pub mod chat_session;
pub mod claude;

pub mod gemini;
pub mod openai;
