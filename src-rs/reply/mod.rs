//! Turns a raw model reply into display blocks and an optional quiz.
//!
//! The quiz fence is cut out first, then the remaining text is scanned line by
//! line. Code fences are copied verbatim; every other line is classified and
//! its text run through inline formatting.

pub mod blocks;
pub mod inline;
pub mod lines;
pub mod quiz;

use serde::{Deserialize, Serialize};

pub use blocks::{parse_blocks, ContentBlock};
pub use inline::{parse_inline, render_inline_html, InlineSpan};
pub use lines::{classify_line, LineKind};
pub use quiz::{extract_quiz, QuizExtraction, QuizPayload};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReply {
    /// Reply text as displayed, quiz fence removed.
    pub text: String,
    pub blocks: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizPayload>,
}

pub fn parse_reply(raw: &str) -> ParsedReply {
    let (text, quiz) = match extract_quiz(raw) {
        QuizExtraction::Found { text, quiz } => (text, Some(quiz)),
        QuizExtraction::Absent => (raw.to_string(), None),
    };
    let blocks = parse_blocks(&text);
    ParsedReply { text, blocks, quiz }
}
