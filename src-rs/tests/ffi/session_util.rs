use crate::config::AppConfig;
use crate::ffi::session_util::{
    attachment_from_core, attachment_to_core, close_session, get_sessions, message_to_core,
    reply_to_core, CoreAttachment,
};
use crate::llm::chat::ChatService;
use crate::llm::models::provider_handle::AnyProviderClient;
use crate::llm::registry::ProviderRegistry;
use crate::reply::QuizPayload;
use crate::session::types::{Attachment, ChatMessage};
use crate::session::SESSION_MANAGER;
use crate::tests::support::gemini_client;
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    fn core(kind: &str) -> CoreAttachment {
        CoreAttachment {
            kind: kind.to_string(),
            mime_type: None,
            data: None,
            name: None,
        }
    }

    #[test]
    fn image_attachment_defaults_mime_and_accepts_data_url() {
        let mut a = core("image");
        a.data = Some("QUJD".to_string());
        assert_eq!(
            attachment_from_core(a).expect("image"),
            Attachment::Image {
                mime_type: "image/png".to_string(),
                data: "QUJD".to_string(),
            }
        );

        let mut b = core("Image");
        b.mime_type = Some("image/png".to_string());
        b.data = Some("data:image/jpeg;base64,/9j/".to_string());
        assert_eq!(
            attachment_from_core(b).expect("image"),
            Attachment::Image {
                mime_type: "image/jpeg".to_string(),
                data: "/9j/".to_string(),
            }
        );
    }

    #[test]
    fn invalid_attachments_are_rejected() {
        assert!(attachment_from_core(core("image")).is_err());
        assert!(attachment_from_core(core("pdf")).is_err());
        assert!(attachment_from_core(core("video")).is_err());

        let mut pdf = core("pdf");
        pdf.name = Some("lesson.pdf".to_string());
        let att = attachment_from_core(pdf).expect("pdf");
        let back = attachment_to_core(&att);
        assert_eq!(back.kind, "pdf");
        assert_eq!(back.name.as_deref(), Some("lesson.pdf"));
        assert!(back.data.is_none());
    }

    #[test]
    fn bot_message_converts_with_quiz_and_blocks() {
        let quiz = QuizPayload {
            question: "Largest planet?".to_string(),
            options: vec!["Mars".to_string(), "Jupiter".to_string()],
            correct_answer: "Jupiter".to_string(),
            explanation: "By mass and volume.".to_string(),
        };
        let msg = ChatMessage::bot("# Planets\n- Jupiter", Some(quiz));

        let core_msg = message_to_core(&msg);
        assert_eq!(core_msg.sender, "bot");
        assert_eq!(core_msg.timestamp, msg.timestamp_ms);
        assert_eq!(
            core_msg.quiz.as_ref().map(|q| q.correct_answer.as_str()),
            Some("Jupiter")
        );

        let reply = reply_to_core(&msg).expect("reply");
        let blocks: serde_json::Value = serde_json::from_str(&reply.blocks_json).expect("json");
        assert_eq!(blocks[0]["type"], "heading");
        assert_eq!(blocks[1]["type"], "unordered_list");
    }

    #[test]
    fn close_session_removes_from_global_manager() {
        let cfg = AppConfig::embedded().expect("embedded config");
        let registry = ProviderRegistry::with_client(
            &cfg,
            AnyProviderClient::Gemini(gemini_client("http://127.0.0.1:9")),
        );
        let service = ChatService::new(Arc::new(registry), &cfg);
        let id = "chat_test_close_session".to_string();

        SESSION_MANAGER
            .lock()
            .expect("manager lock")
            .add(id.clone(), service.start_tutoring().expect("chat"));
        assert!(get_sessions().expect("sessions").contains(&id));

        close_session(&id);
        assert!(!get_sessions().expect("sessions").contains(&id));
    }
}
