pub mod chat;
pub mod error;
pub mod models;
pub mod registry;
pub mod utils;
