//! Line breaking and pagination.

mod options;
mod paginate;
mod wrap;

pub use options::LayoutOptions;
pub use paginate::{face_for, paginate, Paginator};
pub use wrap::{max_chars, wrap, wrap_rich, wrap_with_prefix, AVERAGE_GLYPH_WIDTH};
