//! Document composition: text in, PDF out.
//!
//! A [`Composer`] runs the whole pipeline: the body is parsed into blocks
//! (after HTML extraction for rich content), the blocks are laid out on
//! pages under a title, and the pages are serialized.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{LayoutOptions, Paginator};
use crate::model::{Block, Page, PageGeometry};
use crate::parser::{parse_plain, MarkdownParser, RichTextExtractor};
use crate::render::{PdfOptions, PdfWriter};

/// How the body text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    /// Line-oriented markdown subset
    #[default]
    Markdown,
    /// Literal text, no markup
    PlainText,
    /// Rich editor content (HTML)
    Html,
}

/// Options for composing documents.
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Layout configuration
    pub layout: LayoutOptions,

    /// PDF output configuration
    pub pdf: PdfOptions,
}

impl ComposeOptions {
    /// Create new compose options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set the PDF options.
    pub fn with_pdf(mut self, pdf: PdfOptions) -> Self {
        self.pdf = pdf;
        self
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.layout = self.layout.with_geometry(geometry);
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.pdf = self.pdf.with_compression(compress);
        self
    }

    /// Enable or disable the information dictionary.
    pub fn with_info(mut self, include: bool) -> Self {
        self.pdf = self.pdf.with_info(include);
        self
    }
}

/// A document to compose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeInput {
    /// Document title, drawn at the top of the first page
    pub title: String,
    /// Body text
    pub body: String,
    /// Body interpretation
    #[serde(default)]
    pub format: BodyFormat,
}

impl ComposeInput {
    /// Create a markdown input.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            format: BodyFormat::Markdown,
        }
    }

    /// Set the body format.
    pub fn with_format(mut self, format: BodyFormat) -> Self {
        self.format = format;
        self
    }
}

/// A composed PDF.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    /// Serialized PDF
    pub bytes: Vec<u8>,
    /// Number of pages
    pub page_count: usize,
    /// Number of text lines across all pages
    pub line_count: usize,
}

impl ComposedDocument {
    /// Base64 (standard alphabet, padded) encoding of the PDF.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Size of the PDF in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the PDF is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Composes titled text into PDF documents.
pub struct Composer {
    options: ComposeOptions,
    parser: MarkdownParser,
    extractor: RichTextExtractor,
}

impl Composer {
    /// Create a composer with the given options.
    pub fn new(options: ComposeOptions) -> Self {
        Self {
            options,
            parser: MarkdownParser::new(),
            extractor: RichTextExtractor::new(),
        }
    }

    /// Get the compose options.
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Parse a body into blocks according to its format.
    pub fn parse_body(&self, body: &str, format: BodyFormat) -> Vec<Block> {
        match format {
            BodyFormat::Markdown => self.parser.parse(body),
            BodyFormat::PlainText => parse_plain(body),
            BodyFormat::Html => self.parser.parse(&self.extractor.extract(body)),
        }
    }

    /// Parse and lay out a document without serializing it.
    pub fn layout(&self, input: &ComposeInput) -> Result<Vec<Page>> {
        let title = validate_title(&input.title)?;
        let blocks = self.parse_body(&input.body, input.format);
        Ok(Paginator::new(self.options.layout.clone()).paginate(title, &blocks))
    }

    /// Compose a document into PDF bytes.
    pub fn compose(&self, input: &ComposeInput) -> Result<ComposedDocument> {
        let pages = self.layout(input)?;
        let line_count = pages.iter().map(|p| p.lines().count()).sum();
        let bytes = PdfWriter::new(self.options.pdf.clone()).serialize(&pages, input.title.trim())?;

        log::info!(
            "Composed \"{}\": {} pages, {} lines, {} bytes",
            input.title.trim(),
            pages.len(),
            line_count,
            bytes.len()
        );

        Ok(ComposedDocument {
            bytes,
            page_count: pages.len(),
            line_count,
        })
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(ComposeOptions::default())
    }
}

fn validate_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("Document title is required".to_string()));
    }
    Ok(title)
}

/// Compose a markdown document into PDF bytes with default options.
///
/// # Example
///
/// ```
/// let pdf = arxiu::compose_pdf("Notes", "# Heading\n\nSome **bold** text.")?;
/// assert!(pdf.starts_with(b"%PDF-1.4"));
/// # Ok::<(), arxiu::Error>(())
/// ```
pub fn compose_pdf(title: &str, body: &str) -> Result<Vec<u8>> {
    Ok(Composer::default().compose(&ComposeInput::new(title, body))?.bytes)
}

/// Compose a markdown document and return it base64-encoded.
pub fn compose_pdf_base64(title: &str, body: &str) -> Result<String> {
    Ok(Composer::default()
        .compose(&ComposeInput::new(title, body))?
        .to_base64())
}
