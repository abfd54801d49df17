//! Drives a display through the [`RenderPort`] trait.

use super::{Action, Card, FilterButton, GalleryState, GalleryView};
use crate::model::GalleryIndex;

/// Overlays the gallery can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// The upload form
    Upload,
    /// The age confirmation veil
    AgeVeil,
}

/// Display surface the controller renders into.
pub trait RenderPort {
    /// Replace the document list. `message` is set when the list is empty
    /// or could not be loaded.
    fn render_list(&mut self, cards: &[Card], message: Option<&str>);

    /// Replace the filter bar.
    fn render_filters(&mut self, filters: &[FilterButton]);

    /// Show an overlay.
    fn show_panel(&mut self, panel: Panel);

    /// Hide an overlay.
    fn hide_panel(&mut self, panel: Panel);

    /// Update the status bar.
    fn set_status(&mut self, status: &str);
}

/// Owns the gallery state and re-renders after every action.
pub struct GalleryController<P: RenderPort> {
    state: GalleryState,
    port: P,
}

impl<P: RenderPort> GalleryController<P> {
    /// Create a controller with an empty gallery.
    pub fn new(port: P) -> Self {
        Self {
            state: GalleryState::new(),
            port,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Get the display port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Get the display port mutably.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Current view projection.
    pub fn view(&self) -> GalleryView {
        GalleryView::from_state(&self.state)
    }

    /// Load an index and render everything.
    pub fn load(&mut self, index: GalleryIndex) {
        log::info!("Loaded {} files", index.file_count());
        self.dispatch(Action::IndexLoaded(index));
    }

    /// Apply an action and re-render what it affects.
    pub fn dispatch(&mut self, action: Action) {
        let reload = matches!(action, Action::IndexLoaded(_) | Action::LoadFailed(_));
        let before = self.state.clone();
        self.state.apply(action);
        let view = self.view();

        if reload
            || before.files != self.state.files
            || before.hashtags != self.state.hashtags
            || before.active_tag != self.state.active_tag
            || before.load_error != self.state.load_error
            || before.adult_mode != self.state.adult_mode
        {
            self.render_content(&view);
        }

        self.sync_panel(Panel::Upload, before.upload_open, view.upload_open);
        self.sync_panel(Panel::AgeVeil, before.veil_visible, view.veil_visible);
    }

    /// Render the list, filters and status unconditionally.
    pub fn render(&mut self) {
        let view = self.view();
        self.render_content(&view);
    }

    fn render_content(&mut self, view: &GalleryView) {
        self.port.render_filters(&view.filters);
        self.port.render_list(&view.cards, view.message.as_deref());
        self.port.set_status(&view.count_label);
    }

    fn sync_panel(&mut self, panel: Panel, was_visible: bool, visible: bool) {
        match (was_visible, visible) {
            (false, true) => self.port.show_panel(panel),
            (true, false) => self.port.hide_panel(panel),
            _ => {}
        }
    }
}
