//! Line-oriented markdown parser.
//!
//! Every physical input line maps to exactly one [`Block`]. Paragraphs are
//! further split into bold/italic/plain [`InlineSpan`]s. The parser is
//! total: anything it does not recognize degrades to literal text.

use regex::Regex;

use crate::model::{Block, InlineSpan};

/// Markdown block and inline parser.
pub struct MarkdownParser {
    rule_regex: Regex,
    heading_regex: Regex,
    unordered_regex: Regex,
    ordered_regex: Regex,
    emphasis_regex: Regex,
}

impl MarkdownParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            rule_regex: Regex::new(r"^(?:-{3,}|\*{3,})$").unwrap(),
            heading_regex: Regex::new(r"^(#{1,3})\s+(.*)$").unwrap(),
            unordered_regex: Regex::new(r"^[-*+]\s+(.*)$").unwrap(),
            ordered_regex: Regex::new(r"^(\d+)\.\s+(.*)$").unwrap(),
            emphasis_regex: Regex::new(r"\*\*(.+?)\*\*|\*(.+?)\*").unwrap(),
        }
    }

    /// Parse markdown text into blocks.
    pub fn parse(&self, text: &str) -> Vec<Block> {
        let blocks: Vec<Block> = text.lines().map(|line| self.parse_line(line)).collect();
        log::debug!("Parsed {} blocks", blocks.len());
        blocks
    }

    /// Classify a single physical line.
    pub fn parse_line(&self, line: &str) -> Block {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Block::blank();
        }

        if self.rule_regex.is_match(trimmed) {
            return Block::HorizontalRule;
        }

        if let Some(caps) = self.heading_regex.captures(trimmed) {
            let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u8;
            let text = caps.get(2).map_or("", |m| m.as_str());
            return Block::heading(level, text);
        }

        if let Some(caps) = self.unordered_regex.captures(trimmed) {
            let text = caps.get(1).map_or("", |m| m.as_str());
            return Block::UnorderedListItem {
                text: text.to_string(),
            };
        }

        if let Some(caps) = self.ordered_regex.captures(trimmed) {
            let index = caps.get(1).map_or("", |m| m.as_str());
            let text = caps.get(2).map_or("", |m| m.as_str());
            return Block::OrderedListItem {
                index: index.to_string(),
                text: text.to_string(),
            };
        }

        let spans = self.parse_inline(trimmed);
        Block::Paragraph {
            text: crate::model::spans_text(&spans),
            spans,
        }
    }

    /// Split paragraph text into emphasis spans.
    ///
    /// `**bold**` is tried before `*italic*` at each position; matching is
    /// left to right and non-overlapping. Unterminated markers stay in the
    /// surrounding plain text.
    pub fn parse_inline(&self, text: &str) -> Vec<InlineSpan> {
        let mut spans = Vec::new();
        let mut last = 0;

        for caps in self.emphasis_regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                spans.push(InlineSpan::plain(&text[last..whole.start()]));
            }
            if let Some(bold) = caps.get(1) {
                spans.push(InlineSpan::bold(bold.as_str()));
            } else if let Some(italic) = caps.get(2) {
                spans.push(InlineSpan::italic(italic.as_str()));
            }
            last = whole.end();
        }

        if last < text.len() {
            spans.push(InlineSpan::plain(&text[last..]));
        }

        spans
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse markdown text into blocks.
pub fn parse(text: &str) -> Vec<Block> {
    MarkdownParser::new().parse(text)
}

/// Parse text without interpreting any markup.
///
/// Blank lines still become spacers; every other line is a plain paragraph.
pub fn parse_plain(text: &str) -> Vec<Block> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                Block::blank()
            } else {
                Block::plain_paragraph(trimmed)
            }
        })
        .collect()
}
