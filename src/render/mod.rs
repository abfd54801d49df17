//! Rendering laid-out pages to PDF bytes.

mod content;
mod encoding;
mod options;
mod pdf;

pub use content::{fmt_num, page_content};
pub use encoding::{encode_text, fold_typography};
pub use options::{PdfOptions, DEFAULT_PRODUCER};
pub use pdf::{serialize, ObjectId, PdfObject, PdfWriter};
