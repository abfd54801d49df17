//! # arxiu
//!
//! Core of a document gallery backed by a Git-hosted JSON index.
//!
//! The centerpiece is a dependency-free PDF composer: a title and markdown
//! (or plain or rich) text are parsed into blocks, wrapped and paginated
//! onto A4 pages, and written out as a PDF 1.4 file with an exact
//! cross-reference table. Around it sit the gallery index model, the
//! browser-independent gallery state, the upload workflow, and the upload
//! proxy with its content store.
//!
//! ## Quick Start
//!
//! ```
//! use arxiu::{ComposeInput, Composer};
//!
//! fn main() -> arxiu::Result<()> {
//!     let input = ComposeInput::new("Notes", "# Heading\n\nSome **bold** text.");
//!     let document = Composer::default().compose(&input)?;
//!     assert_eq!(document.page_count, 1);
//!
//!     // Ready to send through the upload proxy
//!     let encoded = document.to_base64();
//!     assert!(!encoded.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Markdown subset**: headings, lists, rules, bold and italic spans
//! - **Pagination**: greedy wrapping on character budgets, multi-page output
//! - **Deterministic output**: identical input gives identical bytes
//! - **Upload proxy**: JSON actions over any [`store::ContentStore`]
//! - **`http` feature**: GitHub contents store and HTTP proxy client

pub mod compose;
pub mod error;
pub mod gallery;
pub mod layout;
pub mod model;
pub mod parser;
pub mod proxy;
pub mod render;
pub mod store;
pub mod upload;

// Re-export commonly used types
pub use compose::{
    compose_pdf, compose_pdf_base64, BodyFormat, ComposeInput, ComposeOptions, ComposedDocument,
    Composer,
};
pub use error::{Error, Result};
pub use gallery::{Action, GalleryController, GalleryState, GalleryView, RenderPort};
pub use layout::{LayoutOptions, Paginator};
pub use model::{
    Block, FontFace, GalleryIndex, IndexEntry, InlineSpan, LaidOutLine, Page, PageGeometry,
    PageItem, Segment, SpanStyle,
};
pub use parser::{extract_text, parse, parse_plain};
pub use proxy::{ProxyConfig, ProxyRequest, ProxyResponse, UploadProxy};
pub use render::{PdfOptions, PdfWriter};
pub use store::{ContentStore, MemoryStore, StoredFile};
pub use upload::{GalleryBackend, ProxyBackend, UploadRequest, UploadWorkflow};

/// Compose a document with custom options.
///
/// # Example
///
/// ```
/// use arxiu::{compose_pdf_with_options, ComposeOptions};
///
/// let options = ComposeOptions::new().with_compression(true).with_info(true);
/// let pdf = compose_pdf_with_options("Notes", "Some *text*.", &options)?;
/// assert!(pdf.starts_with(b"%PDF-1.4"));
/// # Ok::<(), arxiu::Error>(())
/// ```
pub fn compose_pdf_with_options(title: &str, body: &str, options: &ComposeOptions) -> Result<Vec<u8>> {
    let composer = Composer::new(options.clone());
    Ok(composer.compose(&ComposeInput::new(title, body))?.bytes)
}

/// Compose a document from rich editor content (HTML).
pub fn compose_html_pdf(title: &str, html: &str) -> Result<Vec<u8>> {
    let input = ComposeInput::new(title, html).with_format(BodyFormat::Html);
    Ok(Composer::default().compose(&input)?.bytes)
}
