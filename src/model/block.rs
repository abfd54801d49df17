//! Block and inline-level types produced by the parser.

use serde::{Deserialize, Serialize};

/// Height of the spacer produced by a blank input line.
pub const BLANK_LINE_HEIGHT: f32 = 10.0;

/// A parsed structural unit of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-3)
    Heading {
        /// Heading level, 1 to 3
        level: u8,
        /// Heading text without the `#` markers
        text: String,
    },

    /// A bulleted list item
    UnorderedListItem {
        /// Item text without the marker
        text: String,
    },

    /// A numbered list item
    OrderedListItem {
        /// Item number exactly as written in the source
        index: String,
        /// Item text without the marker
        text: String,
    },

    /// A horizontal rule / separator
    HorizontalRule,

    /// Vertical spacing from a blank line
    BlankSpace {
        /// Height in points
        height: f32,
    },

    /// A paragraph with inline formatting
    Paragraph {
        /// Display text (emphasis markers removed)
        text: String,
        /// Inline spans covering `text`
        spans: Vec<InlineSpan>,
    },
}

impl Block {
    /// Create a heading block, clamping the level to 1-3.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
        }
    }

    /// Create a paragraph holding a single plain span.
    pub fn plain_paragraph(text: impl Into<String>) -> Self {
        let text = text.into();
        Block::Paragraph {
            spans: vec![InlineSpan::plain(text.clone())],
            text,
        }
    }

    /// Create a blank spacer of the default height.
    pub fn blank() -> Self {
        Block::BlankSpace {
            height: BLANK_LINE_HEIGHT,
        }
    }

    /// Text carried by the block, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::UnorderedListItem { text }
            | Block::OrderedListItem { text, .. }
            | Block::Paragraph { text, .. } => Some(text),
            Block::HorizontalRule | Block::BlankSpace { .. } => None,
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            Block::UnorderedListItem { .. } | Block::OrderedListItem { .. }
        )
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph { .. })
    }
}

/// Inline formatting of a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStyle {
    /// Regular text
    #[default]
    Plain,
    /// `**bold**`
    Bold,
    /// `*italic*`
    Italic,
}

/// An inline-formatted fragment of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    /// Formatting
    pub style: SpanStyle,
    /// The text content
    pub text: String,
}

impl InlineSpan {
    /// Create a span with the given style.
    pub fn new(style: SpanStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    /// Create a plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SpanStyle::Plain, text)
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(SpanStyle::Bold, text)
    }

    /// Create an italic span.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(SpanStyle::Italic, text)
    }

    /// Number of characters in the span.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Concatenate the text of a span sequence.
pub fn spans_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
