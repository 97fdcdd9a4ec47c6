use crate::session::id::{generate_session_id, validate_session_id};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_prefix_and_are_valid() {
        let id = generate_session_id();
        assert!(id.starts_with("chat_"));
        let suffix = id.rsplit('_').next().expect("suffix");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(validate_session_id(&id).is_ok());
        assert_ne!(id, generate_session_id());
    }

    #[test]
    fn ids_with_path_characters_are_rejected() {
        assert!(validate_session_id("").is_err());
        assert!(validate_session_id("../etc").is_err());
        assert!(validate_session_id("a b").is_err());
        assert!(validate_session_id("chat-1_ok").is_ok());
    }
}
