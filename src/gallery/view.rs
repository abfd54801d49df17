//! Display projection of the gallery state.

use serde::Serialize;

use super::GalleryState;
use crate::model::IndexEntry;

/// Hashtags shown on a card.
pub const CARD_TAG_LIMIT: usize = 3;

/// Message shown when no file is visible.
pub const EMPTY_MESSAGE: &str = "No files here yet.";

/// Message shown when the index could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load files.";

/// One document tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Link to the document
    pub href: String,
    /// File name without the `.pdf` extension
    pub label: String,
    /// Author, if any
    pub author: Option<String>,
    /// Up to three `#tag` labels
    pub tags: Vec<String>,
    /// Adult content marker
    pub is_18_plus: bool,
}

impl Card {
    /// Build the card for an index entry.
    pub fn from_entry(entry: &IndexEntry) -> Self {
        Self {
            href: format!("data/{}", entry.filename),
            label: strip_pdf_extension(&entry.filename).to_string(),
            author: entry.author.clone(),
            tags: entry
                .hashtags
                .iter()
                .take(CARD_TAG_LIMIT)
                .map(|t| format!("#{}", t))
                .collect(),
            is_18_plus: entry.is_18_plus,
        }
    }
}

/// One filter button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    /// Button text
    pub label: String,
    /// Tag selected by the button; `None` for "all"
    pub tag: Option<String>,
    /// Button matches the active filter
    pub active: bool,
}

/// What the gallery should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    /// Visible document cards
    pub cards: Vec<Card>,
    /// Filter bar
    pub filters: Vec<FilterButton>,
    /// Status bar count, e.g. `"3 files"`
    pub count_label: String,
    /// Message replacing the list when there is nothing to show
    pub message: Option<String>,
    /// Adult mode is on
    pub adult_mode: bool,
    /// Age veil is showing
    pub veil_visible: bool,
    /// Upload panel is open
    pub upload_open: bool,
}

impl GalleryView {
    /// Project a state.
    pub fn from_state(state: &GalleryState) -> Self {
        let visible = state.visible_files();
        let message = if state.load_error.is_some() {
            Some(LOAD_ERROR_MESSAGE.to_string())
        } else if visible.is_empty() {
            Some(EMPTY_MESSAGE.to_string())
        } else {
            None
        };

        Self {
            cards: visible.iter().map(|e| Card::from_entry(e)).collect(),
            filters: filter_buttons(&state.hashtags, state.active_tag.as_deref()),
            count_label: count_label(visible.len()),
            message,
            adult_mode: state.adult_mode,
            veil_visible: state.veil_visible,
            upload_open: state.upload_open,
        }
    }
}

/// `"1 file"` or `"N files"`.
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", count)
    }
}

/// The "all" button followed by one button per hashtag.
pub fn filter_buttons(hashtags: &[String], active: Option<&str>) -> Vec<FilterButton> {
    let mut buttons = Vec::with_capacity(hashtags.len() + 1);
    buttons.push(FilterButton {
        label: "all".to_string(),
        tag: None,
        active: active.is_none(),
    });
    for tag in hashtags {
        buttons.push(FilterButton {
            label: format!("#{}", tag),
            tag: Some(tag.clone()),
            active: active == Some(tag.as_str()),
        });
    }
    buttons
}

fn strip_pdf_extension(filename: &str) -> &str {
    let len = filename.len();
    if len >= 4 && filename.is_char_boundary(len - 4) && filename[len - 4..].eq_ignore_ascii_case(".pdf") {
        &filename[..len - 4]
    } else {
        filename
    }
}
