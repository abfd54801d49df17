//! Plain-text extraction from rich (HTML) editor content.
//!
//! Block-level tags become line breaks and list items are prefixed with
//! `"  - "`, so the result can be fed straight into the markdown parser.

use regex::{Captures, Regex};

/// Marks the start of a list item until lines are assembled.
const LIST_ITEM_MARK: char = '\u{1}';

/// Stands in for a block boundary until adjacent boundaries are merged.
const BLOCK_BREAK: &str = "\u{2}";

/// Prefix written in front of each extracted list item.
pub const LIST_ITEM_PREFIX: &str = "  - ";

/// HTML to plain-text extractor.
pub struct RichTextExtractor {
    whitespace_regex: Regex,
    script_regex: Regex,
    list_item_regex: Regex,
    line_break_regex: Regex,
    block_tag_regex: Regex,
    block_run_regex: Regex,
    item_start_regex: Regex,
    any_tag_regex: Regex,
    entity_regex: Regex,
}

impl RichTextExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            whitespace_regex: Regex::new(r"\s+").unwrap(),
            script_regex: Regex::new(r"(?is)<(script|style)\b.*?</(script|style)\s*>").unwrap(),
            list_item_regex: Regex::new(r"(?i)<li\b[^>]*>").unwrap(),
            line_break_regex: Regex::new(r"(?i)<br\s*/?>").unwrap(),
            block_tag_regex: Regex::new(
                r"(?i)</?(p|div|h[1-6]|blockquote|ul|ol|li|pre|tr|table|section|article|header|footer)\b[^>]*>",
            )
            .unwrap(),
            block_run_regex: Regex::new(r"\x02(?: *\x02)*").unwrap(),
            item_start_regex: Regex::new(r"\x01[ \x02]*").unwrap(),
            any_tag_regex: Regex::new(r"<[^>]*>").unwrap(),
            entity_regex: Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|amp|lt|gt|quot|apos|nbsp);")
                .unwrap(),
        }
    }

    /// Extract plain text from HTML.
    pub fn extract(&self, html: &str) -> String {
        // Source whitespace (including newlines) collapses like a browser would
        let text = self.whitespace_regex.replace_all(html, " ");
        let text = self.script_regex.replace_all(&text, "");
        let text = self
            .list_item_regex
            .replace_all(&text, format!("{}{}", BLOCK_BREAK, LIST_ITEM_MARK).as_str());
        let text = self.line_break_regex.replace_all(&text, "\n");
        let text = self.block_tag_regex.replace_all(&text, BLOCK_BREAK);
        let text = self
            .item_start_regex
            .replace_all(&text, LIST_ITEM_MARK.to_string().as_str());
        // `</p><p>` is one boundary, not an empty line
        let text = self.block_run_regex.replace_all(&text, "\n");
        let text = self.any_tag_regex.replace_all(&text, "");
        let text = self.decode_entities(&text);

        let mut lines: Vec<String> = Vec::new();
        for raw in text.lines() {
            let line = raw.trim();
            let line = match line.strip_prefix(LIST_ITEM_MARK) {
                Some(item) => format!("{}{}", LIST_ITEM_PREFIX, item.trim()),
                None => line.to_string(),
            };
            let blank = line.is_empty();
            if blank && lines.last().map_or(true, |l| l.is_empty()) {
                continue;
            }
            lines.push(line);
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }

    fn decode_entities(&self, text: &str) -> String {
        self.entity_regex
            .replace_all(text, |caps: &Captures| {
                let name = &caps[1];
                match name {
                    "amp" => "&".to_string(),
                    "lt" => "<".to_string(),
                    "gt" => ">".to_string(),
                    "quot" => "\"".to_string(),
                    "apos" => "'".to_string(),
                    "nbsp" => " ".to_string(),
                    _ => decode_numeric(name).unwrap_or_else(|| caps[0].to_string()),
                }
            })
            .into_owned()
    }
}

impl Default for RichTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_numeric(reference: &str) -> Option<String> {
    let digits = reference.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code).map(|c| c.to_string())
}

/// Extract plain text from HTML.
pub fn extract_text(html: &str) -> String {
    RichTextExtractor::new().extract(html)
}
