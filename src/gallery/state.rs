//! Gallery state and the actions that change it.

use crate::model::{GalleryIndex, IndexEntry};

/// A user or system event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The index was fetched
    IndexLoaded(GalleryIndex),
    /// Fetching the index failed
    LoadFailed(String),
    /// Filter by a hashtag, or show everything with `None`
    SelectTag(Option<String>),
    /// The adult-mode button was pressed
    ToggleAdultMode,
    /// The age gate was confirmed
    ConfirmAge,
    /// The age gate was declined
    DeclineAge,
    /// Open the upload panel
    OpenUpload,
    /// Close the upload panel
    CloseUpload,
    /// Escape was pressed
    Escape,
}

/// Everything the gallery shows, independent of how it is drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryState {
    /// Indexed documents
    pub files: Vec<IndexEntry>,
    /// Known hashtags
    pub hashtags: Vec<String>,
    /// Active hashtag filter
    pub active_tag: Option<String>,
    /// Adult entries are shown
    pub adult_mode: bool,
    /// Age confirmation veil is showing
    pub veil_visible: bool,
    /// Upload panel is open
    pub upload_open: bool,
    /// Last load failure, cleared by a successful load
    pub load_error: Option<String>,
}

impl GalleryState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::IndexLoaded(index) => {
                self.files = index.files;
                self.hashtags = index.hashtags;
                self.load_error = None;
            }
            Action::LoadFailed(message) => self.load_error = Some(message),
            Action::SelectTag(tag) => self.active_tag = tag,
            Action::ToggleAdultMode => {
                if self.adult_mode {
                    self.adult_mode = false;
                } else {
                    self.veil_visible = true;
                }
            }
            Action::ConfirmAge => {
                self.veil_visible = false;
                self.adult_mode = true;
            }
            Action::DeclineAge => self.veil_visible = false,
            Action::OpenUpload => self.upload_open = true,
            Action::CloseUpload => self.upload_open = false,
            Action::Escape => {
                self.upload_open = false;
                self.veil_visible = false;
            }
        }
    }

    /// Files that pass the adult gate and the active filter, in index order.
    pub fn visible_files(&self) -> Vec<&IndexEntry> {
        self.files
            .iter()
            .filter(|f| self.adult_mode || !f.is_18_plus)
            .filter(|f| match &self.active_tag {
                Some(tag) => f.has_tag(tag),
                None => true,
            })
            .collect()
    }
}
