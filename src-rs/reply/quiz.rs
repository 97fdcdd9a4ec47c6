use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // Body stops at the first closing marker, so one fence never spans another.
    static ref QUIZ_FENCE_RE: Regex =
        Regex::new(r"(?s)```(?i:json)[ \t]*\r?\n?(.*?)```").unwrap();
}

/// Multiple-choice question embedded by the model in a json fence.
///
/// `correct_answer` is supposed to equal one of `options`; that is part of the
/// prompt given to the model and is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl QuizPayload {
    pub fn answer_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.correct_answer)
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }
}

#[derive(Deserialize)]
struct QuizEnvelope {
    quiz: QuizPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizExtraction {
    /// `text` is the reply with the quiz fence cut out.
    Found { text: String, quiz: QuizPayload },
    Absent,
}

/// Finds the first json fence holding `{"quiz": {...}}` and cuts it out.
///
/// Fences that do not parse are left in place and scanning moves on to the
/// next one. Only the whitespace touching the cut is dropped; the two sides
/// are rejoined with a blank line when both have content.
pub fn extract_quiz(raw: &str) -> QuizExtraction {
    for caps in QUIZ_FENCE_RE.captures_iter(raw) {
        let (Some(fence), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let body = body.as_str().trim();
        if !(body.starts_with('{') && body.ends_with('}')) {
            continue;
        }

        match serde_json::from_str::<QuizEnvelope>(body) {
            Ok(envelope) => {
                return QuizExtraction::Found {
                    text: join_around_cut(&raw[..fence.start()], &raw[fence.end()..]),
                    quiz: envelope.quiz,
                };
            }
            Err(e) => {
                log::debug!("Ignoring json fence without a valid quiz: {}", e);
            }
        }
    }
    QuizExtraction::Absent
}

fn join_around_cut(before: &str, after: &str) -> String {
    let before = before.trim_end();
    let after = after.trim_start();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{}\n\n{}", before, after),
    }
}
