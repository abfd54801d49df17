//! Text parsing: markdown blocks and inline emphasis, plus plain-text
//! extraction from rich editor content.

mod markdown;
mod rich;

pub use markdown::{parse, parse_plain, MarkdownParser};
pub use rich::{extract_text, RichTextExtractor, LIST_ITEM_PREFIX};
