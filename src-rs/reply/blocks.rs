use serde::{Deserialize, Serialize};

use super::inline::{parse_inline, InlineSpan};
use super::lines::{classify_line, is_fence, LineKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading { level: u8, spans: Vec<InlineSpan> },
    Paragraph { spans: Vec<InlineSpan> },
    /// Spacer rendered for a blank line that follows a paragraph.
    ParagraphBreak,
    Blockquote { spans: Vec<InlineSpan> },
    HorizontalRule,
    UnorderedList { items: Vec<Vec<InlineSpan>> },
    OrderedList { items: Vec<Vec<InlineSpan>> },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

struct OpenList {
    kind: ListKind,
    items: Vec<Vec<InlineSpan>>,
}

struct OpenFence {
    language: Option<String>,
    lines: Vec<String>,
}

#[derive(Default)]
struct BlockScanner {
    blocks: Vec<ContentBlock>,
    list: Option<OpenList>,
    fence: Option<OpenFence>,
}

impl BlockScanner {
    fn feed(&mut self, line: &str) {
        if self.fence.is_some() {
            if is_fence(line) {
                self.close_fence();
            } else if let Some(fence) = self.fence.as_mut() {
                fence.lines.push(line.to_string());
            }
            return;
        }

        match classify_line(line) {
            LineKind::Fence { language } => {
                self.flush_list();
                self.fence = Some(OpenFence {
                    language: (!language.is_empty()).then(|| language.to_string()),
                    lines: Vec::new(),
                });
            }
            LineKind::Heading { level, text } => {
                self.flush_list();
                self.blocks.push(ContentBlock::Heading {
                    level,
                    spans: parse_inline(text),
                });
            }
            LineKind::Quote(text) => {
                self.flush_list();
                self.blocks.push(ContentBlock::Blockquote {
                    spans: parse_inline(text),
                });
            }
            LineKind::Rule => {
                self.flush_list();
                self.blocks.push(ContentBlock::HorizontalRule);
            }
            LineKind::Bullet(text) => self.push_item(ListKind::Unordered, text),
            LineKind::Numbered(text) => self.push_item(ListKind::Ordered, text),
            LineKind::Blank => {
                self.flush_list();
                if matches!(self.blocks.last(), Some(ContentBlock::Paragraph { .. })) {
                    self.blocks.push(ContentBlock::ParagraphBreak);
                }
            }
            LineKind::Text(text) => {
                self.flush_list();
                self.blocks.push(ContentBlock::Paragraph {
                    spans: parse_inline(text),
                });
            }
        }
    }

    fn push_item(&mut self, kind: ListKind, text: &str) {
        if self.list.as_ref().is_some_and(|l| l.kind != kind) {
            self.flush_list();
        }
        self.list
            .get_or_insert_with(|| OpenList {
                kind,
                items: Vec::new(),
            })
            .items
            .push(parse_inline(text));
    }

    fn flush_list(&mut self) {
        if let Some(list) = self.list.take() {
            self.blocks.push(match list.kind {
                ListKind::Unordered => ContentBlock::UnorderedList { items: list.items },
                ListKind::Ordered => ContentBlock::OrderedList { items: list.items },
            });
        }
    }

    fn close_fence(&mut self) {
        if let Some(fence) = self.fence.take() {
            self.blocks.push(ContentBlock::Code {
                language: fence.language,
                text: fence.lines.join("\n"),
            });
        }
    }

    fn finish(mut self) -> Vec<ContentBlock> {
        // An unterminated fence keeps everything after it as code.
        self.close_fence();
        self.flush_list();
        self.blocks
    }
}

pub fn parse_blocks(text: &str) -> Vec<ContentBlock> {
    let mut scanner = BlockScanner::default();
    for line in text.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}
