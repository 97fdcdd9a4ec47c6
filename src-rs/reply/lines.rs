use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"^(#{1,4})\s+(.*)$").unwrap();
    static ref QUOTE_RE: Regex = Regex::new(r"^>\s+(.*)$").unwrap();
    static ref BULLET_RE: Regex = Regex::new(r"^[-*]\s+(.*)$").unwrap();
    static ref NUMBERED_RE: Regex = Regex::new(r"^\d+\.\s+(.*)$").unwrap();
}

pub const FENCE: &str = "```";

/// Shape of one reply line outside a code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Fence { language: &'a str },
    Blank,
    Heading { level: u8, text: &'a str },
    Quote(&'a str),
    Rule,
    Bullet(&'a str),
    Numbered(&'a str),
    Text(&'a str),
}

pub fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Checked in order; anything unmatched is `Text`.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let t = line.trim();

    if let Some(rest) = t.strip_prefix(FENCE) {
        return LineKind::Fence {
            language: rest.trim(),
        };
    }
    if t.is_empty() {
        return LineKind::Blank;
    }
    if let Some(caps) = HEADING_RE.captures(t) {
        if let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2)) {
            return LineKind::Heading {
                level: hashes.as_str().len() as u8,
                text: text.as_str(),
            };
        }
    }
    if let Some(text) = QUOTE_RE.captures(t).and_then(|c| c.get(1)) {
        return LineKind::Quote(text.as_str());
    }
    if matches!(t, "---" | "___" | "***") {
        return LineKind::Rule;
    }
    if let Some(text) = BULLET_RE.captures(t).and_then(|c| c.get(1)) {
        return LineKind::Bullet(text.as_str());
    }
    if let Some(text) = NUMBERED_RE.captures(t).and_then(|c| c.get(1)) {
        return LineKind::Numbered(text.as_str());
    }
    LineKind::Text(t)
}
