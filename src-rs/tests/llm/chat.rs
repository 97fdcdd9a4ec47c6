use crate::config::AppConfig;
use crate::llm::chat::{message_parts, ChatService};
use crate::llm::models::provider_base::Part;
use crate::llm::models::provider_handle::AnyProviderClient;
use crate::llm::registry::ProviderRegistry;
use crate::session::types::{Attachment, Sender};
use crate::tests::support::{gemini_client, gemini_reply, serve, StubResponse};
use serde_json::json;
use std::sync::Arc;

#[cfg(test)]
mod tests {
    use super::*;

    fn service_for(base_url: &str) -> ChatService {
        let cfg = AppConfig::embedded().expect("embedded config");
        let registry = ProviderRegistry::with_client(
            &cfg,
            AnyProviderClient::Gemini(gemini_client(base_url)),
        );
        ChatService::new(Arc::new(registry), &cfg)
    }

    const QUIZ_REPLY: &str = "Water boils at **100°C** at sea level.\n\n```json\n{\"quiz\": {\"question\": \"At what temperature does water boil?\", \"options\": [\"90°C\", \"100°C\"], \"correctAnswer\": \"100°C\", \"explanation\": \"At 1 atm.\"}}\n```";

    #[test]
    fn message_parts_puts_text_first_then_image() {
        let image = Attachment::image_from_data("image/png", "data:image/jpeg;base64,QUJD");
        let parts = message_parts("  What is this?  ", Some(&image)).expect("parts");
        assert_eq!(
            parts,
            vec![Part::text("What is this?"), Part::inline_data("image/jpeg", "QUJD")]
        );
    }

    #[test]
    fn message_parts_notes_pdf_by_name() {
        let pdf = Attachment::Pdf {
            name: "notes.pdf".to_string(),
        };
        let parts = message_parts("Summarize", Some(&pdf)).expect("parts");
        assert_eq!(parts, vec![Part::text("Summarize\n\n(Attached PDF: notes.pdf)")]);

        let parts = message_parts("", Some(&pdf)).expect("parts");
        assert_eq!(parts, vec![Part::text("(Attached PDF: notes.pdf)")]);
    }

    #[test]
    fn message_parts_rejects_empty_message() {
        assert!(message_parts("   ", None).is_err());
    }

    #[test]
    fn generation_config_carries_prompt_and_temperature() {
        let service = service_for("http://127.0.0.1:9");
        let gen = service.generation_config();
        assert!(gen
            .system_instruction
            .as_deref()
            .is_some_and(|s| s.starts_with("You are a friendly and patient tutor")));
        assert_eq!(gen.temperature, Some(0.7));
    }

    #[tokio::test]
    async fn generate_text_sends_tutor_instruction() {
        let mut server = serve(vec![StubResponse::json(gemini_reply("42"))]).await;
        let service = service_for(&server.base_url);

        let text = service.generate_text("What is 6 x 7?").await.expect("text");
        assert_eq!(text, "42");

        let captured = server.requests.recv().await.expect("request");
        assert!(captured.request_line.contains("/models/gemini-2.5-flash:generateContent"));
        assert!(captured.body.pointer("/systemInstruction/parts/0/text").is_some());
        assert!(captured.body.pointer("/generationConfig/temperature").is_some());
    }

    #[tokio::test]
    async fn stream_text_yields_chunk_texts() {
        let events = vec![
            json!({ "candidates": [{ "content": { "parts": [{ "text": "Step 1. " }] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "Step 2." }] }, "finishReason": "STOP" }] }),
        ];
        let server = serve(vec![StubResponse::sse(&events)]).await;
        let service = service_for(&server.base_url);

        let mut stream = service.stream_text("Explain").await.expect("stream");
        let mut joined = String::new();
        while let Some(chunk) = tokio_stream::StreamExt::next(&mut stream).await {
            joined.push_str(&chunk.expect("chunk"));
        }
        assert_eq!(joined, "Step 1. Step 2.");
    }

    #[tokio::test]
    async fn tutor_chat_records_user_and_bot_messages_with_quiz() {
        let server = serve(vec![StubResponse::json(gemini_reply(QUIZ_REPLY))]).await;
        let service = service_for(&server.base_url);
        let mut chat = service.start_tutoring().expect("tutor chat");
        assert_eq!(chat.model(), "gemini-2.5-flash");

        let bot = chat
            .send_message(" How hot does water boil? ", None)
            .await
            .expect("reply");
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.text, "Water boils at **100°C** at sea level.");
        let quiz = bot.quiz.as_ref().expect("quiz");
        assert_eq!(quiz.answer_index(), Some(1));

        let messages = chat.history().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "How hot does water boil?");
        assert_eq!(messages[1], bot);
    }

    #[tokio::test]
    async fn tutor_chat_failure_keeps_only_user_message() {
        let server = serve(vec![StubResponse::error(500, "boom")]).await;
        let service = service_for(&server.base_url);
        let mut chat = service.start_tutoring().expect("tutor chat");

        let pdf = Attachment::Pdf {
            name: "worksheet.pdf".to_string(),
        };
        assert!(chat.send_message("Check this", Some(pdf.clone())).await.is_err());

        let messages = chat.history().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].attachment.as_ref(), Some(&pdf));
    }

    #[tokio::test]
    async fn empty_message_is_rejected_before_recording() {
        let service = service_for("http://127.0.0.1:9");
        let mut chat = service.start_tutoring().expect("tutor chat");
        assert!(chat.send_message("  ", None).await.is_err());
        assert!(chat.history().is_empty());
    }

    #[test]
    fn missing_credential_blocks_tutoring() {
        let cfg = AppConfig::embedded().expect("embedded config");
        let service = ChatService::new(Arc::new(ProviderRegistry::new(&cfg, None)), &cfg);
        assert!(service.start_tutoring().is_err());
    }
}
