use serde::{Deserialize, Serialize};

use crate::reply::quiz::QuizPayload;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// File attached to a user message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attachment {
    /// Base64 image data sent inline to the model.
    Image {
        #[serde(rename = "mimeType")]
        mime_type: String,
        data: String,
    },
    /// Only the file name travels; the document itself is never uploaded.
    Pdf { name: String },
}

impl Attachment {
    /// Accepts raw base64 or a `data:<mime>;base64,<payload>` URL.
    pub fn image_from_data(mime_type: &str, data: &str) -> Self {
        match split_data_url(data) {
            Some((mime, payload)) => Attachment::Image {
                mime_type: mime.to_string(),
                data: payload.to_string(),
            },
            None => Attachment::Image {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            },
        }
    }
}

pub(crate) fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    if mime.is_empty() {
        return None;
    }
    Some((mime, payload))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizPayload>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, attachment: Option<Attachment>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp_ms: now_ms(),
            attachment,
            quiz: None,
        }
    }

    pub fn bot(text: impl Into<String>, quiz: Option<QuizPayload>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            timestamp_ms: now_ms(),
            attachment: None,
            quiz,
        }
    }
}

pub(crate) fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
