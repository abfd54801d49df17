//! Model types shared by the composer and the gallery.
//!
//! Blocks and spans are what the parser produces, pages and laid-out lines
//! are what the paginator hands to the PDF writer, and the index types
//! mirror the gallery's `data.json`.

mod block;
mod index;
mod page;

pub use block::{spans_text, Block, InlineSpan, SpanStyle, BLANK_LINE_HEIGHT};
pub use index::{GalleryIndex, IndexEntry};
pub use page::{FontFace, LaidOutLine, Page, PageGeometry, PageItem, Segment};
