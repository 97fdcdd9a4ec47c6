use crate::reply::quiz::{extract_quiz, QuizExtraction};

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ_JSON: &str = r#"{"quiz": {"question": "2 + 2?", "options": ["3", "4", "5"], "correctAnswer": "4", "explanation": "Basic addition."}}"#;

    #[test]
    fn quiz_fence_is_cut_out_and_text_trimmed() {
        let raw = format!("Let's practice.\n\n```json\n{}\n```\n", QUIZ_JSON);
        match extract_quiz(&raw) {
            QuizExtraction::Found { text, quiz } => {
                assert_eq!(text, "Let's practice.");
                assert_eq!(quiz.question, "2 + 2?");
                assert_eq!(quiz.options, vec!["3", "4", "5"]);
                assert_eq!(quiz.answer_index(), Some(1));
                assert!(quiz.is_correct("4"));
                assert!(!quiz.is_correct("5"));
                assert_eq!(quiz.explanation, "Basic addition.");
            }
            QuizExtraction::Absent => panic!("quiz should be found"),
        }
    }

    #[test]
    fn fence_tag_is_case_insensitive() {
        let raw = format!("```JSON {} ```", QUIZ_JSON);
        assert!(matches!(extract_quiz(&raw), QuizExtraction::Found { .. }));
    }

    #[test]
    fn malformed_json_is_not_a_quiz() {
        let raw = "Try this:\n```json\n{\"quiz\": {\"question\": \"oops\",}}\n```";
        assert_eq!(extract_quiz(raw), QuizExtraction::Absent);
    }

    #[test]
    fn json_without_quiz_key_is_skipped_for_a_later_fence() {
        let raw = format!(
            "Data:\n```json\n{{\"x\": 1}}\n```\nNow a question:\n```json\n{}\n```",
            QUIZ_JSON
        );
        match extract_quiz(&raw) {
            QuizExtraction::Found { text, quiz } => {
                assert_eq!(text, "Data:\n```json\n{\"x\": 1}\n```\nNow a question:");
                assert_eq!(quiz.correct_answer, "4");
            }
            QuizExtraction::Absent => panic!("second fence should match"),
        }
    }

    #[test]
    fn answer_missing_from_options_has_no_index() {
        let raw = "```json\n{\"quiz\": {\"question\": \"q\", \"options\": [\"a\"], \"correctAnswer\": \"b\", \"explanation\": \"\"}}\n```";
        match extract_quiz(raw) {
            QuizExtraction::Found { text, quiz } => {
                assert!(text.is_empty());
                assert_eq!(quiz.answer_index(), None);
            }
            QuizExtraction::Absent => panic!("quiz should be found"),
        }
    }

    #[test]
    fn reply_without_fence_is_absent() {
        assert_eq!(extract_quiz("No quiz today."), QuizExtraction::Absent);
    }

    #[test]
    fn truncated_fence_does_not_hide_a_later_quiz() {
        let raw = format!(
            "Example:\n```json\n{{\"a\": 1\n```\nNow try:\n```json\n{}\n```",
            QUIZ_JSON
        );
        match extract_quiz(&raw) {
            QuizExtraction::Found { text, quiz } => {
                assert_eq!(text, "Example:\n```json\n{\"a\": 1\n```\nNow try:");
                assert_eq!(quiz.question, "2 + 2?");
            }
            QuizExtraction::Absent => panic!("quiz after a broken fence should be found"),
        }
    }

    #[test]
    fn only_whitespace_at_the_cut_is_removed() {
        let raw = format!("  Intro line\n\n```json\n{}\n```\n\nOutro  ", QUIZ_JSON);
        match extract_quiz(&raw) {
            QuizExtraction::Found { text, .. } => assert_eq!(text, "  Intro line\n\nOutro  "),
            QuizExtraction::Absent => panic!("quiz should be found"),
        }
    }
}
