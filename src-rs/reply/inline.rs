use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // Alternation order decides ties at the same position: bold, italic, code.
    static ref INLINE_RE: Regex = Regex::new(
        r"\*\*(?P<bold>.+?)\*\*|\*(?P<italic>[^*\s](?:[^*]*[^*\s])?)\*|`(?P<code>[^`]+)`"
    )
    .unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum InlineSpan {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last = 0usize;

    for caps in INLINE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            spans.push(InlineSpan::Text(text[last..whole.start()].to_string()));
        }

        let span = if let Some(m) = caps.name("bold") {
            InlineSpan::Bold(m.as_str().to_string())
        } else if let Some(m) = caps.name("italic") {
            InlineSpan::Italic(m.as_str().to_string())
        } else if let Some(m) = caps.name("code") {
            InlineSpan::Code(m.as_str().to_string())
        } else {
            InlineSpan::Text(whole.as_str().to_string())
        };
        spans.push(span);
        last = whole.end();
    }

    if last < text.len() {
        spans.push(InlineSpan::Text(text[last..].to_string()));
    }
    spans
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_inline_html(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            InlineSpan::Text(t) => out.push_str(&escape_html(t)),
            InlineSpan::Bold(t) => {
                out.push_str("<strong>");
                out.push_str(&escape_html(t));
                out.push_str("</strong>");
            }
            InlineSpan::Italic(t) => {
                out.push_str("<em>");
                out.push_str(&escape_html(t));
                out.push_str("</em>");
            }
            InlineSpan::Code(t) => {
                out.push_str("<code>");
                out.push_str(&escape_html(t));
                out.push_str("</code>");
            }
        }
    }
    out
}

/// Concatenated text with markers removed.
pub fn plain_text(spans: &[InlineSpan]) -> String {
    spans
        .iter()
        .map(|s| match s {
            InlineSpan::Text(t) | InlineSpan::Bold(t) | InlineSpan::Italic(t) | InlineSpan::Code(t) => {
                t.as_str()
            }
        })
        .collect()
}
